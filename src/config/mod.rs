//! Configuration module for the DocShare client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ClientError;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the DocShare service
    pub api_url: String,
    /// Path to the SQLite file holding the persisted session
    pub session_db_path: PathBuf,
    /// Directory downloads are saved into
    pub download_dir: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("DOCSHARE_API_URL").unwrap_or_else(|| "http://localhost:8000".to_string());

        let session_db_path = lookup("DOCSHARE_SESSION_DB")
            .unwrap_or_else(|| "./data/session.sqlite".to_string())
            .into();

        let download_dir = lookup("DOCSHARE_DOWNLOAD_DIR")
            .unwrap_or_else(|| ".".to_string())
            .into();

        let timeout_secs = match lookup("DOCSHARE_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Configuration(format!("Invalid DOCSHARE_TIMEOUT_SECS: {}", raw))
            })?,
            None => 30,
        };

        let log_level = lookup("DOCSHARE_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_json = lookup("DOCSHARE_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            api_url,
            session_db_path,
            download_dir,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level,
            log_json,
        })
    }
}
