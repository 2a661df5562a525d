//! CLI errors
//!
//! Any of these ends the process with exit code 1.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("PRODUCT_API_CONFIG_ERROR: {0}")]
    Config(String),

    #[error("PRODUCT_API_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("PRODUCT_API_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging, store or runtime setup failed
    #[error("PRODUCT_API_BOOT_FAILED: {0}")]
    Boot(String),

    #[error("PRODUCT_API_SERVE_FAILED: {0}")]
    Serve(String),
}

pub type CliResult<T> = Result<T, CliError>;
