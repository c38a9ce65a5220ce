use serde_json::json;
use tracing::info;

use saathi_shared::error::Result;
use saathi_shared::types::UserId;
use saathi_store::admin::AdminAction;
use saathi_store::{Action, AdminStats, AdminUserRow};

use crate::SaathiClient;

impl SaathiClient {
    pub async fn fetch_admin_dashboard(&self) -> Result<AdminStats> {
        self.dispatch(Action::Admin(AdminAction::Pending));

        match self
            .api()
            .get::<AdminStats>("/admin/stats", "Failed to load dashboard")
            .await
        {
            Ok(stats) => {
                self.dispatch(Action::Admin(AdminAction::StatsLoaded(stats.clone())));
                Ok(stats)
            }
            Err(e) => {
                self.fail(&e, Action::Admin(AdminAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    pub async fn fetch_admin_users(&self) -> Result<Vec<AdminUserRow>> {
        self.dispatch(Action::Admin(AdminAction::Pending));

        match self
            .api()
            .get::<Vec<AdminUserRow>>("/admin/users", "Failed to load users")
            .await
        {
            Ok(users) => {
                self.dispatch(Action::Admin(AdminAction::UsersLoaded(users.clone())));
                Ok(users)
            }
            Err(e) => {
                self.fail(&e, Action::Admin(AdminAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    pub async fn approve_user(&self, id: &UserId) -> Result<()> {
        match self
            .api()
            .post_ack(
                &format!("/admin/users/{id}/approve"),
                &json!({}),
                "Failed to approve user",
            )
            .await
        {
            Ok(()) => {
                info!(user = %id, "User approved");
                self.dispatch(Action::Admin(AdminAction::UserApproved(id.clone())));
                Ok(())
            }
            Err(e) => {
                self.fail(&e, Action::Admin(AdminAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    pub async fn suspend_user(&self, id: &UserId) -> Result<()> {
        match self
            .api()
            .post_ack(
                &format!("/admin/users/{id}/suspend"),
                &json!({}),
                "Failed to suspend user",
            )
            .await
        {
            Ok(()) => {
                info!(user = %id, "User suspended");
                self.dispatch(Action::Admin(AdminAction::UserSuspended(id.clone())));
                Ok(())
            }
            Err(e) => {
                self.fail(&e, Action::Admin(AdminAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }
}
