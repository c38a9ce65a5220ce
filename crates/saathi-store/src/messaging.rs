//! Messaging slice: chat rooms, per-counterpart message buckets, read
//! state, and optimistic sends.
//!
//! Buckets are keyed by the counterpart's id; a message lives in exactly
//! one bucket. History fetches replace a bucket wholesale. An optimistic
//! send appends a `Pending` entry that is either upgraded in place when the
//! server confirms, or removed again when the send fails — the compensating
//! revert is part of the reducer, not left to the view.

use std::collections::HashMap;

use saathi_shared::types::{MessageId, UserId};
use uuid::Uuid;

use crate::models::{ChatRoom, DeliveryState, Message, Reaction};

#[derive(Debug, Default)]
pub struct MessagingState {
    pub rooms: Vec<ChatRoom>,
    pub buckets: HashMap<UserId, Vec<Message>>,
    pub active_chat: Option<UserId>,
    pub loading: bool,
    pub error: Option<String>,
}

impl MessagingState {
    pub fn messages_with(&self, peer: &UserId) -> &[Message] {
        self.buckets.get(peer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn unread_for(&self, peer: &UserId) -> u32 {
        self.rooms
            .iter()
            .find(|r| r.peer_id == *peer)
            .map(|r| r.unread)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub enum MessagingAction {
    Pending,
    RoomsLoaded(Vec<ChatRoom>),
    /// Replaces the peer's bucket with the server-returned sequence,
    /// discarding any optimistic entries not present in it.
    HistoryLoaded {
        peer: UserId,
        messages: Vec<Message>,
    },
    /// Local append of a not-yet-confirmed outgoing message.
    OptimisticAppended {
        peer: UserId,
        message: Message,
    },
    /// The send call resolved; the server's message replaces the optimistic
    /// entry in place.
    SendConfirmed {
        peer: UserId,
        local_id: Uuid,
        message: Message,
    },
    /// The send call failed; the optimistic entry is removed again.
    SendFailed {
        peer: UserId,
        local_id: Uuid,
        error: String,
    },
    /// Removes the id from every bucket. The slice does not track which
    /// bucket a message id belongs to, so this is a scan across all open
    /// conversations.
    MessageDeleted(MessageId),
    /// A read-receipt call succeeded: every message in the peer's bucket is
    /// flipped to read and the room's unread counter drops to zero.
    MessagesRead(UserId),
    ReactionsUpdated {
        id: MessageId,
        reactions: Vec<Reaction>,
    },
    ActiveChatSet(Option<UserId>),
    Rejected(String),
}

pub fn reduce(state: &mut MessagingState, action: MessagingAction) {
    match action {
        MessagingAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        MessagingAction::RoomsLoaded(rooms) => {
            state.loading = false;
            state.rooms = rooms;
        }
        MessagingAction::HistoryLoaded { peer, messages } => {
            state.loading = false;
            state.buckets.insert(peer, messages);
        }
        MessagingAction::OptimisticAppended { peer, message } => {
            state.buckets.entry(peer).or_default().push(message);
        }
        MessagingAction::SendConfirmed {
            peer,
            local_id,
            message,
        } => {
            state.loading = false;
            let bucket = state.buckets.entry(peer.clone()).or_default();
            match bucket.iter_mut().find(|m| m.local_id == Some(local_id)) {
                Some(entry) => {
                    *entry = Message {
                        delivery: DeliveryState::Confirmed,
                        ..message
                    };
                }
                // history replaced the bucket while the send was in
                // flight; the confirmed message still belongs in it
                None => bucket.push(message),
            }
            update_room_preview(&mut state.rooms, &peer, bucket.last());
        }
        MessagingAction::SendFailed {
            peer,
            local_id,
            error,
        } => {
            state.loading = false;
            if let Some(bucket) = state.buckets.get_mut(&peer) {
                bucket.retain(|m| m.local_id != Some(local_id));
            }
            state.error = Some(error);
        }
        MessagingAction::MessageDeleted(id) => {
            for bucket in state.buckets.values_mut() {
                bucket.retain(|m| m.id != id);
            }
        }
        MessagingAction::MessagesRead(peer) => {
            if let Some(bucket) = state.buckets.get_mut(&peer) {
                for message in bucket.iter_mut() {
                    message.read = true;
                }
            }
            if let Some(room) = state.rooms.iter_mut().find(|r| r.peer_id == peer) {
                room.unread = 0;
            }
        }
        MessagingAction::ReactionsUpdated { id, reactions } => {
            for bucket in state.buckets.values_mut() {
                if let Some(message) = bucket.iter_mut().find(|m| m.id == id) {
                    message.reactions = reactions;
                    return;
                }
            }
        }
        MessagingAction::ActiveChatSet(peer) => {
            state.active_chat = peer;
        }
        MessagingAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}

/// Keep the room list's preview in step with a newly confirmed message, so
/// the overview and the open conversation cannot diverge.
fn update_room_preview(rooms: &mut [ChatRoom], peer: &UserId, latest: Option<&Message>) {
    let Some(latest) = latest else { return };
    if let Some(room) = rooms.iter_mut().find(|r| r.peer_id == *peer) {
        room.last_message = Some(latest.content.clone());
        room.last_message_at = Some(latest.sent_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(id: &str, from: &str, to: &str, content: &str) -> Message {
        Message {
            id: id.into(),
            sender_id: from.into(),
            receiver_id: to.into(),
            content: content.into(),
            sent_at: Utc::now(),
            read: false,
            reactions: Vec::new(),
            delivery: DeliveryState::Confirmed,
            local_id: None,
        }
    }

    fn pending(local_id: Uuid, from: &str, to: &str, content: &str) -> Message {
        Message {
            id: MessageId(local_id.to_string()),
            delivery: DeliveryState::Pending,
            local_id: Some(local_id),
            ..message("", from, to, content)
        }
    }

    fn room(peer: &str, unread: u32) -> ChatRoom {
        ChatRoom {
            peer_id: peer.into(),
            peer_name: peer.to_string(),
            peer_photo_url: None,
            peer_online: false,
            last_message: None,
            last_message_at: None,
            unread,
        }
    }

    #[test]
    fn test_history_replaces_bucket_discarding_optimistic_entries() {
        let mut state = MessagingState::default();
        let local = Uuid::new_v4();
        reduce(
            &mut state,
            MessagingAction::OptimisticAppended {
                peer: "bob".into(),
                message: pending(local, "me", "bob", "optimistic"),
            },
        );

        let server = vec![
            message("m1", "bob", "me", "hello"),
            message("m2", "me", "bob", "hi"),
        ];
        reduce(
            &mut state,
            MessagingAction::HistoryLoaded {
                peer: "bob".into(),
                messages: server.clone(),
            },
        );

        assert_eq!(state.messages_with(&"bob".into()), server.as_slice());
    }

    #[test]
    fn test_send_confirm_upgrades_optimistic_entry_in_place() {
        let mut state = MessagingState::default();
        let local = Uuid::new_v4();
        reduce(
            &mut state,
            MessagingAction::OptimisticAppended {
                peer: "bob".into(),
                message: pending(local, "me", "bob", "hi"),
            },
        );
        assert_eq!(
            state.messages_with(&"bob".into())[0].delivery,
            DeliveryState::Pending
        );

        reduce(
            &mut state,
            MessagingAction::SendConfirmed {
                peer: "bob".into(),
                local_id: local,
                message: message("m9", "me", "bob", "hi"),
            },
        );

        let bucket = state.messages_with(&"bob".into());
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].id, "m9".into());
        assert_eq!(bucket[0].delivery, DeliveryState::Confirmed);
    }

    #[test]
    fn test_send_failure_removes_optimistic_entry() {
        let mut state = MessagingState::default();
        let local = Uuid::new_v4();
        reduce(
            &mut state,
            MessagingAction::OptimisticAppended {
                peer: "bob".into(),
                message: pending(local, "me", "bob", "hi"),
            },
        );

        reduce(
            &mut state,
            MessagingAction::SendFailed {
                peer: "bob".into(),
                local_id: local,
                error: "Failed to send message".into(),
            },
        );

        assert!(state.messages_with(&"bob".into()).is_empty());
        assert_eq!(state.error.as_deref(), Some("Failed to send message"));
    }

    #[test]
    fn test_delete_scans_every_bucket() {
        let mut state = MessagingState::default();
        reduce(
            &mut state,
            MessagingAction::HistoryLoaded {
                peer: "bob".into(),
                messages: vec![message("m1", "bob", "me", "a"), message("m2", "me", "bob", "b")],
            },
        );
        reduce(
            &mut state,
            MessagingAction::HistoryLoaded {
                peer: "carol".into(),
                messages: vec![message("m3", "carol", "me", "c")],
            },
        );

        // the deleted id lives in the non-active conversation
        reduce(&mut state, MessagingAction::ActiveChatSet(Some("bob".into())));
        reduce(&mut state, MessagingAction::MessageDeleted("m3".into()));

        assert!(state.messages_with(&"carol".into()).is_empty());
        assert_eq!(state.messages_with(&"bob".into()).len(), 2);
    }

    #[test]
    fn test_messages_read_flips_bucket_and_zeroes_counter() {
        let mut state = MessagingState::default();
        reduce(
            &mut state,
            MessagingAction::RoomsLoaded(vec![room("bob", 3), room("carol", 1)]),
        );
        reduce(
            &mut state,
            MessagingAction::HistoryLoaded {
                peer: "bob".into(),
                messages: vec![message("m1", "bob", "me", "a"), message("m2", "bob", "me", "b")],
            },
        );

        reduce(&mut state, MessagingAction::MessagesRead("bob".into()));
        assert!(state.messages_with(&"bob".into()).iter().all(|m| m.read));
        assert_eq!(state.unread_for(&"bob".into()), 0);
        assert_eq!(state.unread_for(&"carol".into()), 1);

        // repeated receipts stay at zero, never negative
        reduce(&mut state, MessagingAction::MessagesRead("bob".into()));
        assert_eq!(state.unread_for(&"bob".into()), 0);
    }

    #[test]
    fn test_confirmed_send_updates_room_preview() {
        let mut state = MessagingState::default();
        reduce(&mut state, MessagingAction::RoomsLoaded(vec![room("bob", 0)]));

        let local = Uuid::new_v4();
        reduce(
            &mut state,
            MessagingAction::OptimisticAppended {
                peer: "bob".into(),
                message: pending(local, "me", "bob", "see you at 7"),
            },
        );
        reduce(
            &mut state,
            MessagingAction::SendConfirmed {
                peer: "bob".into(),
                local_id: local,
                message: message("m5", "me", "bob", "see you at 7"),
            },
        );

        assert_eq!(
            state.rooms[0].last_message.as_deref(),
            Some("see you at 7")
        );
    }

    #[test]
    fn test_reactions_rewrite_one_message() {
        let mut state = MessagingState::default();
        reduce(
            &mut state,
            MessagingAction::HistoryLoaded {
                peer: "bob".into(),
                messages: vec![message("m1", "bob", "me", "a")],
            },
        );

        reduce(
            &mut state,
            MessagingAction::ReactionsUpdated {
                id: "m1".into(),
                reactions: vec![Reaction {
                    emoji: "❤️".into(),
                    count: 2,
                }],
            },
        );

        let bucket = state.messages_with(&"bob".into());
        assert_eq!(bucket[0].reactions.len(), 1);
        assert_eq!(bucket[0].reactions[0].count, 2);
    }
}
