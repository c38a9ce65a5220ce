//! Persisted credentials and the cached session record.
//!
//! The access token, the refresh token, and the logged-in user's profile
//! record live together in one JSON file under the platform data directory,
//! written through [`CredentialStore`]. Tokens carry their own expiry and
//! are never handed out once stale.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use saathi_shared::constants::{ACCESS_TOKEN_TTL_HOURS, APP_NAME, REFRESH_TOKEN_TTL_DAYS};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl StoredToken {
    fn live(&self) -> Option<&str> {
        (Utc::now() < self.expires_at).then_some(self.value.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Credentials {
    access_token: Option<StoredToken>,
    refresh_token: Option<StoredToken>,
    user: Option<Value>,
}

/// File-backed store for the access token, refresh token, and the cached
/// user record. All mutation goes through `&self`; the inner mutex is only
/// held for the duration of the in-memory update.
pub struct CredentialStore {
    path: Option<PathBuf>,
    inner: Mutex<Credentials>,
}

impl CredentialStore {
    /// Open the store at the platform data directory, loading any
    /// previously persisted credentials.
    pub fn open() -> Self {
        let path = ProjectDirs::from("app", "saathi", APP_NAME)
            .map(|dirs| dirs.data_dir().join("credentials.json"));
        match path {
            Some(path) => Self::open_at(path),
            None => {
                warn!("Could not determine data directory, credentials will not persist");
                Self::in_memory()
            }
        }
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: PathBuf) -> Self {
        let creds = fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();
        Self {
            path: Some(path),
            inner: Mutex::new(creds),
        }
    }

    /// A store that never touches disk. Used in tests and when no data
    /// directory is available.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: Mutex::new(Credentials::default()),
        }
    }

    /// Record a fresh login: both tokens plus the user's profile record.
    pub fn store_login(&self, access: &str, refresh: &str, user: &Value) {
        let now = Utc::now();
        let creds = {
            let mut guard = self.lock();
            guard.access_token = Some(StoredToken {
                value: access.to_string(),
                expires_at: now + Duration::hours(ACCESS_TOKEN_TTL_HOURS),
            });
            guard.refresh_token = Some(StoredToken {
                value: refresh.to_string(),
                expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            });
            guard.user = Some(user.clone());
            guard.clone()
        };
        self.persist(&creds);
    }

    /// Replace only the access token, with the fixed expiry. Used by the
    /// 401 refresh path.
    pub fn store_access(&self, access: &str) {
        let creds = {
            let mut guard = self.lock();
            guard.access_token = Some(StoredToken {
                value: access.to_string(),
                expires_at: Utc::now() + Duration::hours(ACCESS_TOKEN_TTL_HOURS),
            });
            guard.clone()
        };
        self.persist(&creds);
    }

    /// The access token, if present and not yet expired.
    pub fn access_token(&self) -> Option<String> {
        self.lock()
            .access_token
            .as_ref()
            .and_then(|t| t.live())
            .map(String::from)
    }

    /// The refresh token, if present and not yet expired.
    pub fn refresh_token(&self) -> Option<String> {
        self.lock()
            .refresh_token
            .as_ref()
            .and_then(|t| t.live())
            .map(String::from)
    }

    /// Overwrite the cached user record (profile updates).
    pub fn save_user(&self, user: &Value) {
        let creds = {
            let mut guard = self.lock();
            guard.user = Some(user.clone());
            guard.clone()
        };
        self.persist(&creds);
    }

    /// The cached user record from the last login, if any.
    pub fn cached_user(&self) -> Option<Value> {
        self.lock().user.clone()
    }

    /// Drop everything: both tokens and the user record. Called on logout
    /// and when a refresh attempt fails.
    pub fn clear(&self) {
        *self.lock() = Credentials::default();
        if let Some(ref path) = self.path {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(error = %e, "Failed to remove credential file");
                }
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Credentials> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, creds: &Credentials) {
        let Some(ref path) = self.path else { return };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(error = %e, "Failed to create credential directory");
                return;
            }
        }
        match serde_json::to_vec_pretty(creds) {
            Ok(bytes) => {
                if let Err(e) = fs::write(path, bytes) {
                    warn!(error = %e, "Failed to persist credentials");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialise credentials"),
        }
    }
}
