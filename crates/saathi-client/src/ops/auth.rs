use serde::Deserialize;
use serde_json::json;
use tracing::info;

use saathi_shared::error::{ApiError, Result};
use saathi_store::auth::AuthAction;
use saathi_store::{Action, UserAccount};

use crate::SaathiClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthPayload {
    user: UserAccount,
    access_token: String,
    refresh_token: String,
}

impl SaathiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".into(),
            ));
        }

        self.dispatch(Action::Auth(AuthAction::Pending));
        let body = json!({ "email": email, "password": password });

        match self
            .api()
            .post::<AuthPayload>("/auth/login", &body, "Login failed")
            .await
        {
            Ok(payload) => {
                self.remember_login(&payload);
                info!(user = %payload.user.id, "Logged in");
                self.dispatch(Action::Auth(AuthAction::LoggedIn(payload.user.clone())));
                Ok(payload.user)
            }
            Err(e) => {
                self.fail(&e, Action::Auth(AuthAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserAccount> {
        if password != confirm_password {
            return Err(ApiError::Validation("Passwords do not match".into()));
        }
        if full_name.trim().is_empty() || email.trim().is_empty() {
            return Err(ApiError::Validation("Name and email are required".into()));
        }

        self.dispatch(Action::Auth(AuthAction::Pending));
        let body = json!({
            "fullName": full_name,
            "email": email,
            "password": password,
        });

        match self
            .api()
            .post::<AuthPayload>("/auth/register", &body, "Registration failed")
            .await
        {
            Ok(payload) => {
                self.remember_login(&payload);
                info!(user = %payload.user.id, "Registered");
                self.dispatch(Action::Auth(AuthAction::LoggedIn(payload.user.clone())));
                Ok(payload.user)
            }
            Err(e) => {
                self.fail(&e, Action::Auth(AuthAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    /// Startup check of the persisted credentials. Restores the cached user
    /// record when a live token is around; either way the session leaves
    /// the "not yet checked" state.
    pub fn restore_session(&self) -> bool {
        let credentials = self.api().credentials();
        let has_token =
            credentials.access_token().is_some() || credentials.refresh_token().is_some();

        let restored = has_token
            .then(|| credentials.cached_user())
            .flatten()
            .and_then(|record| serde_json::from_value::<UserAccount>(record).ok());

        match restored {
            Some(user) => {
                info!(user = %user.id, "Session restored from persisted credentials");
                self.dispatch(Action::Auth(AuthAction::SessionChecked(Some(user))));
                true
            }
            None => {
                self.dispatch(Action::Auth(AuthAction::SessionChecked(None)));
                false
            }
        }
    }

    /// Ends the session. The server call is best-effort; credentials are
    /// dropped and every slice is purged regardless, so nothing cached for
    /// this user survives into the next login.
    pub async fn logout(&self) {
        let _ = self
            .api()
            .post_ack("/auth/logout", &json!({}), "Logout failed")
            .await;

        self.api().credentials().clear();
        self.dispatch(Action::ResetAll);
        info!("Logged out");
    }

    fn remember_login(&self, payload: &AuthPayload) {
        let record = serde_json::to_value(&payload.user).unwrap_or_default();
        self.api()
            .credentials()
            .store_login(&payload.access_token, &payload.refresh_token, &record);
    }
}
