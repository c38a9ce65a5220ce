use serde::Deserialize;
use serde_json::json;

use saathi_shared::error::Result;
use saathi_shared::types::NotificationId;
use saathi_store::notification::NotificationAction;
use saathi_store::{Action, Notification};

use crate::SaathiClient;

/// The listing payload: the page of notifications plus, when the server
/// computes it, the authoritative unread total across all pages.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationsPayload {
    notifications: Vec<Notification>,
    unread_count: Option<u32>,
}

impl SaathiClient {
    pub async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        self.dispatch(Action::Notification(NotificationAction::Pending));

        match self
            .api()
            .get::<NotificationsPayload>("/notifications", "Failed to load notifications")
            .await
        {
            Ok(payload) => {
                self.dispatch(Action::Notification(NotificationAction::Loaded {
                    items: payload.notifications.clone(),
                    server_unread: payload.unread_count,
                }));
                Ok(payload.notifications)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Notification(NotificationAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    pub async fn mark_notification_read(&self, id: &NotificationId) -> Result<()> {
        match self
            .api()
            .post_ack(
                &format!("/notifications/{id}/read"),
                &json!({}),
                "Failed to update notification",
            )
            .await
        {
            Ok(()) => {
                self.dispatch(Action::Notification(NotificationAction::MarkedRead(
                    id.clone(),
                )));
                Ok(())
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Notification(NotificationAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    pub async fn mark_all_notifications_read(&self) -> Result<()> {
        match self
            .api()
            .post_ack(
                "/notifications/read-all",
                &json!({}),
                "Failed to update notifications",
            )
            .await
        {
            Ok(()) => {
                self.dispatch(Action::Notification(NotificationAction::AllMarkedRead));
                Ok(())
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Notification(NotificationAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }
}
