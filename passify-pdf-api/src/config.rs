//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Default upload limit (25 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Environment variables read by [`ApiConfig::from_env`]
pub const ENV_BIND: &str = "PASSIFYPDF_BIND";
pub const ENV_MAX_UPLOAD_BYTES: &str = "PASSIFYPDF_MAX_UPLOAD_BYTES";
pub const ENV_STAGING_DIR: &str = "PASSIFYPDF_STAGING_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PASSIFYPDF_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("PASSIFYPDF_MAX_UPLOAD_BYTES is not a valid byte count: {0}")]
    InvalidUploadLimit(String),
}

/// Runtime settings for the web form server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the server listens on
    pub bind: SocketAddr,
    /// Largest request body accepted, in bytes
    pub max_upload_bytes: usize,
    /// Directory for staged uploads and outputs; the system temp dir when unset
    pub staging_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            staging_dir: None,
        }
    }
}

impl ApiConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup(ENV_BIND) {
            config.bind = bind
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;
        }

        if let Some(limit) = lookup(ENV_MAX_UPLOAD_BYTES) {
            config.max_upload_bytes = limit
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidUploadLimit(limit.clone()))?;
        }

        if let Some(dir) = lookup(ENV_STAGING_DIR) {
            if !dir.trim().is_empty() {
                config.staging_dir = Some(PathBuf::from(dir));
            }
        }

        Ok(config)
    }
}
