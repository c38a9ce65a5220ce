//! Client configuration loaded from environment variables.
//!
//! Everything has a sensible default so an embedding application can start
//! with zero configuration.

use std::path::PathBuf;

use saathi_shared::constants::DEFAULT_API_BASE_URL;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the saathi REST backend.
    /// Env: `SAATHI_API_URL`
    pub base_url: String,

    /// Directory for the persisted credential file. Defaults to the
    /// platform data directory.
    /// Env: `SAATHI_DATA_DIR`
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SAATHI_API_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }

        if let Ok(dir) = std::env::var("SAATHI_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        config
    }
}
