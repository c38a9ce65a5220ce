//! Verification slice: document submission status.

use crate::models::DocumentStatus;

#[derive(Debug, Default)]
pub struct VerificationStateSlice {
    pub documents: Vec<DocumentStatus>,
    pub profile_verified: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum VerificationAction {
    Pending,
    StatusLoaded {
        documents: Vec<DocumentStatus>,
        profile_verified: bool,
    },
    /// A document upload was accepted; its status row replaces any previous
    /// one of the same kind.
    DocumentSubmitted(DocumentStatus),
    Rejected(String),
}

pub fn reduce(state: &mut VerificationStateSlice, action: VerificationAction) {
    match action {
        VerificationAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        VerificationAction::StatusLoaded {
            documents,
            profile_verified,
        } => {
            state.loading = false;
            state.documents = documents;
            state.profile_verified = profile_verified;
        }
        VerificationAction::DocumentSubmitted(status) => {
            state.loading = false;
            match state.documents.iter_mut().find(|d| d.kind == status.kind) {
                Some(existing) => *existing = status,
                None => state.documents.push(status),
            }
        }
        VerificationAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}
