use serde::Deserialize;
use serde_json::json;
use tracing::info;

use saathi_shared::error::Result;
use saathi_store::profile::ProfileAction;
use saathi_store::{Action, ProfileDetails};

use crate::SaathiClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhotoPayload {
    url: String,
}

impl SaathiClient {
    pub async fn fetch_profile(&self) -> Result<ProfileDetails> {
        self.dispatch(Action::Profile(ProfileAction::Pending));

        match self
            .api()
            .get::<ProfileDetails>("/profile/me", "Failed to load profile")
            .await
        {
            Ok(details) => {
                self.dispatch(Action::Profile(ProfileAction::Loaded(details.clone())));
                Ok(details)
            }
            Err(e) => {
                self.fail(&e, Action::Profile(ProfileAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    /// Sends the full edited profile; the server's copy replaces the local
    /// one.
    pub async fn update_profile(&self, details: &ProfileDetails) -> Result<ProfileDetails> {
        self.dispatch(Action::Profile(ProfileAction::Pending));
        let body = serde_json::to_value(details).unwrap_or_default();

        match self
            .api()
            .put::<ProfileDetails>("/profile/me", &body, "Failed to update profile")
            .await
        {
            Ok(details) => {
                info!(user = %details.id, "Profile updated");
                self.dispatch(Action::Profile(ProfileAction::Updated(details.clone())));
                Ok(details)
            }
            Err(e) => {
                self.fail(&e, Action::Profile(ProfileAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    /// Uploads one photo as a data URL and appends the hosted URL the
    /// server answers with.
    pub async fn upload_photo(&self, data_url: &str) -> Result<String> {
        self.dispatch(Action::Profile(ProfileAction::Pending));
        let body = json!({ "photo": data_url });

        match self
            .api()
            .post::<PhotoPayload>("/profile/photos", &body, "Failed to upload photo")
            .await
        {
            Ok(payload) => {
                self.dispatch(Action::Profile(ProfileAction::PhotoAdded(
                    payload.url.clone(),
                )));
                Ok(payload.url)
            }
            Err(e) => {
                self.fail(&e, Action::Profile(ProfileAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{client_with, log_in, ScriptedTransport};

    #[tokio::test]
    async fn test_photo_upload_appends_hosted_url() {
        let transport = ScriptedTransport::new(vec![
            (
                200,
                r#"{"success":true,"data":{
                    "id":"u1","fullName":"Asha","birthDate":"1995-02-01",
                    "photos":["a.jpg"]
                }}"#,
            ),
            (
                200,
                r#"{"success":true,"data":{"url":"https://cdn.test/b.jpg"}}"#,
            ),
        ]);
        let client = client_with(transport);
        log_in(&client, "u1");

        client.fetch_profile().await.unwrap();
        let url = client.upload_photo("data:image/jpeg;base64,...").await.unwrap();
        assert_eq!(url, "https://cdn.test/b.jpg");

        let state = client.store().lock().unwrap();
        let photos = &state.profile.details.as_ref().unwrap().photos;
        assert_eq!(photos.len(), 2);
    }
}
