//! # saathi-client
//!
//! The operations layer: asynchronous units of work that call the backend
//! through [`saathi_api::ApiClient`] and settle the result into the store
//! through slice reducers. A UI binding holds one [`SaathiClient`] and the
//! matching [`Store`] handle for the lifetime of the page session.

pub mod config;
pub mod ops;
pub mod payment;

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use saathi_api::{ApiClient, CredentialStore};
use saathi_shared::error::ApiError;
use saathi_shared::types::UserId;
use saathi_store::{new_store, Action, Store};

use crate::config::ClientConfig;

pub struct SaathiClient {
    api: ApiClient,
    store: Store,
}

impl SaathiClient {
    pub fn new(config: ClientConfig) -> Self {
        let credentials = Arc::new(match config.data_dir {
            Some(ref dir) => CredentialStore::open_at(dir.join("credentials.json")),
            None => CredentialStore::open(),
        });
        Self {
            api: ApiClient::new(config.base_url, credentials),
            store: new_store(),
        }
    }

    /// Assemble from pre-built parts. Used by tests to inject a scripted
    /// transport.
    pub fn with_parts(api: ApiClient, store: Store) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn dispatch(&self, action: Action) {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .dispatch(action);
    }

    /// Settle a failed operation: record the slice-local error, and if the
    /// session is gone, purge every slice first so the recorded error lands
    /// in the logged-out state.
    pub(crate) fn fail(&self, error: &ApiError, rejected: Action) {
        if matches!(error, ApiError::SessionExpired) {
            self.dispatch(Action::ResetAll);
        }
        self.dispatch(rejected);
    }

    pub(crate) fn current_user_id(&self) -> Option<UserId> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .auth
            .session
            .user()
            .map(|u| u.id.clone())
    }
}

/// Initialise logging for an embedding application. Call once at startup.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("saathi_client=debug,saathi_api=debug,saathi_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
