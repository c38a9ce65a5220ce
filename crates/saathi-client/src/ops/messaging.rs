use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use saathi_shared::constants::MAX_MESSAGE_LEN;
use saathi_shared::error::{ApiError, Result};
use saathi_shared::types::{MessageId, UserId};
use saathi_store::messaging::MessagingAction;
use saathi_store::{Action, ChatRoom, DeliveryState, Message, Reaction};

use crate::SaathiClient;

impl SaathiClient {
    pub async fn fetch_chat_rooms(&self) -> Result<Vec<ChatRoom>> {
        self.dispatch(Action::Messaging(MessagingAction::Pending));

        match self
            .api()
            .get::<Vec<ChatRoom>>("/chat/rooms", "Failed to load conversations")
            .await
        {
            Ok(rooms) => {
                self.dispatch(Action::Messaging(MessagingAction::RoomsLoaded(
                    rooms.clone(),
                )));
                Ok(rooms)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Messaging(MessagingAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    /// Loads the full history for one conversation. The response replaces
    /// the local bucket wholesale.
    pub async fn fetch_chat_history(&self, peer: &UserId) -> Result<Vec<Message>> {
        self.dispatch(Action::Messaging(MessagingAction::Pending));

        match self
            .api()
            .get::<Vec<Message>>(
                &format!("/chat/history/{peer}"),
                "Failed to load messages",
            )
            .await
        {
            Ok(messages) => {
                self.dispatch(Action::Messaging(MessagingAction::HistoryLoaded {
                    peer: peer.clone(),
                    messages: messages.clone(),
                }));
                Ok(messages)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Messaging(MessagingAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    /// Optimistic send: the message appears in the bucket immediately as
    /// `Pending`, is upgraded in place when the server confirms, and is
    /// removed again if the call fails.
    pub async fn send_message(&self, peer: &UserId, content: &str) -> Result<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ApiError::Validation("Message cannot be empty".into()));
        }
        if content.len() > MAX_MESSAGE_LEN {
            return Err(ApiError::Validation("Message is too long".into()));
        }
        let Some(self_id) = self.current_user_id() else {
            return Err(ApiError::Unauthorized);
        };

        let local_id = Uuid::new_v4();
        let optimistic = Message {
            id: MessageId(local_id.to_string()),
            sender_id: self_id,
            receiver_id: peer.clone(),
            content: content.to_string(),
            sent_at: Utc::now(),
            read: false,
            reactions: Vec::new(),
            delivery: DeliveryState::Pending,
            local_id: Some(local_id),
        };
        self.dispatch(Action::Messaging(MessagingAction::OptimisticAppended {
            peer: peer.clone(),
            message: optimistic,
        }));

        let body = json!({ "receiverId": peer, "content": content });
        match self
            .api()
            .post::<Message>("/chat/messages", &body, "Failed to send message")
            .await
        {
            Ok(message) => {
                debug!(peer = %peer, id = %message.id, "Message sent");
                self.dispatch(Action::Messaging(MessagingAction::SendConfirmed {
                    peer: peer.clone(),
                    local_id,
                    message: message.clone(),
                }));
                Ok(message)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Messaging(MessagingAction::SendFailed {
                        peer: peer.clone(),
                        local_id,
                        error: e.to_string(),
                    }),
                );
                Err(e)
            }
        }
    }

    /// Deletes one message. The reducer drops the id from every bucket; the
    /// slice does not track which conversation it belonged to.
    pub async fn delete_message(&self, id: &MessageId) -> Result<()> {
        match self
            .api()
            .delete_ack(
                &format!("/chat/messages/{id}"),
                "Failed to delete message",
            )
            .await
        {
            Ok(()) => {
                info!(id = %id, "Message deleted");
                self.dispatch(Action::Messaging(MessagingAction::MessageDeleted(
                    id.clone(),
                )));
                Ok(())
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Messaging(MessagingAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    /// Sends the read receipt for one conversation, then flips the local
    /// bucket and zeroes the room's unread counter.
    pub async fn mark_messages_read(&self, peer: &UserId) -> Result<()> {
        let body = json!({ "peerId": peer });

        match self
            .api()
            .post_ack("/chat/read", &body, "Failed to update read state")
            .await
        {
            Ok(()) => {
                self.dispatch(Action::Messaging(MessagingAction::MessagesRead(
                    peer.clone(),
                )));
                Ok(())
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Messaging(MessagingAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    /// Adds or removes this user's reaction; the server answers with the
    /// message's full reaction list, which replaces the local one.
    pub async fn toggle_reaction(&self, id: &MessageId, emoji: &str) -> Result<Vec<Reaction>> {
        let body = json!({ "emoji": emoji });

        match self
            .api()
            .post::<Vec<Reaction>>(
                &format!("/chat/messages/{id}/reactions"),
                &body,
                "Failed to update reaction",
            )
            .await
        {
            Ok(reactions) => {
                self.dispatch(Action::Messaging(MessagingAction::ReactionsUpdated {
                    id: id.clone(),
                    reactions: reactions.clone(),
                }));
                Ok(reactions)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Messaging(MessagingAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    /// Local selection of the open conversation; no network call.
    pub fn set_active_chat(&self, peer: Option<UserId>) {
        self.dispatch(Action::Messaging(MessagingAction::ActiveChatSet(peer)));
    }
}
