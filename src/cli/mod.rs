//! CLI module for the product API
//!
//! Provides command-line interface for:
//! - serve: Load configuration and run the HTTP server
//! - check-config: Validate configuration and print it

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, serve, Config};
pub use errors::{CliError, CliResult};
