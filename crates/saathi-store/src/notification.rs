//! Notification slice.
//!
//! The unread count exists twice: derived from the list, and as an
//! authoritative server-supplied total (the list is paginated, so the two
//! can legitimately differ). The server value wins whenever it is present.

use saathi_shared::types::NotificationId;

use crate::models::Notification;

#[derive(Debug, Default)]
pub struct NotificationState {
    pub items: Vec<Notification>,
    pub unread_count: u32,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum NotificationAction {
    Pending,
    Loaded {
        items: Vec<Notification>,
        /// Authoritative total when the server supplies one.
        server_unread: Option<u32>,
    },
    MarkedRead(NotificationId),
    AllMarkedRead,
    Rejected(String),
}

pub fn reduce(state: &mut NotificationState, action: NotificationAction) {
    match action {
        NotificationAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        NotificationAction::Loaded {
            items,
            server_unread,
        } => {
            state.loading = false;
            state.unread_count =
                server_unread.unwrap_or_else(|| items.iter().filter(|n| !n.read).count() as u32);
            state.items = items;
        }
        NotificationAction::MarkedRead(id) => {
            if let Some(item) = state.items.iter_mut().find(|n| n.id == id) {
                if !item.read {
                    item.read = true;
                    state.unread_count = state.unread_count.saturating_sub(1);
                }
            }
        }
        NotificationAction::AllMarkedRead => {
            for item in state.items.iter_mut() {
                item.read = true;
            }
            state.unread_count = 0;
        }
        NotificationAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;
    use chrono::Utc;

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            id: id.into(),
            kind: NotificationKind::ProfileView,
            read,
            related_user: None,
            message: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_server_unread_count_wins_over_local_count() {
        let mut state = NotificationState::default();
        reduce(
            &mut state,
            NotificationAction::Loaded {
                items: vec![
                    notification("n1", true),
                    notification("n2", true),
                    notification("n3", false),
                ],
                server_unread: Some(5),
            },
        );
        assert_eq!(state.unread_count, 5);
    }

    #[test]
    fn test_local_count_is_the_fallback() {
        let mut state = NotificationState::default();
        reduce(
            &mut state,
            NotificationAction::Loaded {
                items: vec![notification("n1", false), notification("n2", true)],
                server_unread: None,
            },
        );
        assert_eq!(state.unread_count, 1);
    }

    #[test]
    fn test_marked_read_never_goes_negative() {
        let mut state = NotificationState::default();
        reduce(
            &mut state,
            NotificationAction::Loaded {
                items: vec![notification("n1", false)],
                server_unread: Some(0),
            },
        );

        reduce(&mut state, NotificationAction::MarkedRead("n1".into()));
        assert_eq!(state.unread_count, 0);

        // marking an already-read item changes nothing
        reduce(&mut state, NotificationAction::MarkedRead("n1".into()));
        assert_eq!(state.unread_count, 0);
    }

    #[test]
    fn test_all_marked_read_zeroes_count() {
        let mut state = NotificationState::default();
        reduce(
            &mut state,
            NotificationAction::Loaded {
                items: vec![notification("n1", false), notification("n2", false)],
                server_unread: Some(7),
            },
        );
        reduce(&mut state, NotificationAction::AllMarkedRead);
        assert_eq!(state.unread_count, 0);
        assert!(state.items.iter().all(|n| n.read));
    }
}
