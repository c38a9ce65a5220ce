//! Admin slice: dashboard stats and the user-management listing.

use saathi_shared::types::UserId;

use crate::models::{AccountStatus, AdminStats, AdminUserRow};

#[derive(Debug, Default)]
pub struct AdminState {
    pub stats: Option<AdminStats>,
    pub users: Vec<AdminUserRow>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AdminAction {
    Pending,
    StatsLoaded(AdminStats),
    UsersLoaded(Vec<AdminUserRow>),
    UserApproved(UserId),
    UserSuspended(UserId),
    Rejected(String),
}

pub fn reduce(state: &mut AdminState, action: AdminAction) {
    match action {
        AdminAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        AdminAction::StatsLoaded(stats) => {
            state.loading = false;
            state.stats = Some(stats);
        }
        AdminAction::UsersLoaded(users) => {
            state.loading = false;
            state.users = users;
        }
        AdminAction::UserApproved(id) => {
            state.loading = false;
            set_status(state, &id, AccountStatus::Active);
        }
        AdminAction::UserSuspended(id) => {
            state.loading = false;
            set_status(state, &id, AccountStatus::Suspended);
        }
        AdminAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}

fn set_status(state: &mut AdminState, id: &UserId, status: AccountStatus) {
    if let Some(row) = state.users.iter_mut().find(|u| u.id == *id) {
        row.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(id: &str, status: AccountStatus) -> AdminUserRow {
        AdminUserRow {
            id: id.into(),
            full_name: "Someone".into(),
            email: "someone@example.com".into(),
            status,
            joined_at: Utc::now(),
            is_premium: false,
        }
    }

    #[test]
    fn test_approve_and_suspend_update_the_row() {
        let mut state = AdminState::default();
        reduce(
            &mut state,
            AdminAction::UsersLoaded(vec![
                row("u1", AccountStatus::PendingApproval),
                row("u2", AccountStatus::Active),
            ]),
        );

        reduce(&mut state, AdminAction::UserApproved("u1".into()));
        assert_eq!(state.users[0].status, AccountStatus::Active);

        reduce(&mut state, AdminAction::UserSuspended("u2".into()));
        assert_eq!(state.users[1].status, AccountStatus::Suspended);
    }
}
