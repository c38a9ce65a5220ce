use serde::Deserialize;
use serde_json::json;
use tracing::info;

use saathi_shared::error::Result;
use saathi_store::verification::VerificationAction;
use saathi_store::{Action, DocumentKind, DocumentStatus};

use crate::SaathiClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerificationPayload {
    documents: Vec<DocumentStatus>,
    #[serde(default)]
    profile_verified: bool,
}

impl SaathiClient {
    pub async fn fetch_verification_status(&self) -> Result<Vec<DocumentStatus>> {
        self.dispatch(Action::Verification(VerificationAction::Pending));

        match self
            .api()
            .get::<VerificationPayload>(
                "/verification/status",
                "Failed to load verification status",
            )
            .await
        {
            Ok(payload) => {
                self.dispatch(Action::Verification(VerificationAction::StatusLoaded {
                    documents: payload.documents.clone(),
                    profile_verified: payload.profile_verified,
                }));
                Ok(payload.documents)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Verification(VerificationAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }

    /// Uploads one document (as a data URL) for manual review. The server
    /// answers with the new status row for that document kind.
    pub async fn submit_document(
        &self,
        kind: DocumentKind,
        data_url: &str,
    ) -> Result<DocumentStatus> {
        self.dispatch(Action::Verification(VerificationAction::Pending));
        let body = json!({ "kind": kind, "document": data_url });

        match self
            .api()
            .post::<DocumentStatus>(
                "/verification/documents",
                &body,
                "Failed to submit document",
            )
            .await
        {
            Ok(status) => {
                info!(kind = ?status.kind, "Document submitted");
                self.dispatch(Action::Verification(VerificationAction::DocumentSubmitted(
                    status.clone(),
                )));
                Ok(status)
            }
            Err(e) => {
                self.fail(
                    &e,
                    Action::Verification(VerificationAction::Rejected(e.to_string())),
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{client_with, log_in, ScriptedTransport};
    use saathi_store::VerificationState;

    #[tokio::test]
    async fn test_submission_lands_in_slice() {
        let transport = ScriptedTransport::new(vec![(
            200,
            r#"{"success":true,"data":{"kind":"idProof","state":"pending"}}"#,
        )]);
        let client = client_with(transport);
        log_in(&client, "u1");

        let status = client
            .submit_document(DocumentKind::IdProof, "data:application/pdf;base64,...")
            .await
            .unwrap();
        assert_eq!(status.state, VerificationState::Pending);

        let state = client.store().lock().unwrap();
        assert_eq!(state.verification.documents.len(), 1);
    }
}
