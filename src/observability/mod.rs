//! Logging setup
//!
//! Installs a `tracing-subscriber` formatter once per process. `RUST_LOG`
//! wins over the configured level when set.
//!
//! # Usage
//!
//! ```ignore
//! use product_api::observability::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default())?;
//! tracing::info!(path = "/products", "request");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "product_api=debug" (default: "info")
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text (default: false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Logging could not be installed
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Resolve the filter: `RUST_LOG` if set, otherwise the configured level
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidFilter {
        filter: config.level.clone(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
    }

    #[test]
    fn test_invalid_level_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LogConfig {
            level: "product_api=notalevel".to_string(),
            json: false,
        };
        assert!(matches!(
            env_filter(&config),
            Err(LoggingError::InvalidFilter { .. })
        ));
    }
}
