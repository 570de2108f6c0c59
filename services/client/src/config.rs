//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// The file name the exported itinerary is saved under unless overridden.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "Moj_Plan_Podrozy.pdf";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the planner service, without a trailing slash.
    pub api_url: String,
    pub log_level: Level,
    pub request_timeout: Duration,
    pub export_dir: PathBuf,
    pub export_file_name: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("PLANNER_API_URL")
            .unwrap_or_else(|| "http://127.0.0.1:8000".to_string())
            .trim_end_matches('/')
            .to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "PLANNER_API_URL".to_string(),
                format!("'{}' is not an http(s) URL", api_url),
            ));
        }

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let timeout_str = lookup("REQUEST_TIMEOUT_SECS").unwrap_or_else(|| "120".to_string());
        let request_timeout = match timeout_str.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(ConfigError::InvalidValue(
                    "REQUEST_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                ))
            }
        };

        let export_dir = lookup("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let export_file_name = lookup("EXPORT_FILE_NAME")
            .unwrap_or_else(|| DEFAULT_EXPORT_FILE_NAME.to_string());
        let has_separator = export_file_name.contains(|c: char| c == '/' || c == '\\');
        if export_file_name.trim().is_empty() || has_separator {
            return Err(ConfigError::InvalidValue(
                "EXPORT_FILE_NAME".to_string(),
                format!("'{}' is not a plain file name", export_file_name),
            ));
        }

        Ok(Self {
            api_url,
            log_level,
            request_timeout,
            export_dir,
            export_file_name,
        })
    }
}
