//! CLI argument definitions using clap
//!
//! Commands:
//! - product-api serve [--config <path>] [--port <port>] [--api-key <key>]
//! - product-api check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Product API - an in-memory product catalog over HTTP
#[derive(Parser, Debug)]
#[command(name = "product-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults are used when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding the configuration file
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// API key expected on product routes, overriding the configuration file
        #[arg(long, env = "PRODUCT_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Validate the configuration and print it with secrets redacted
    CheckConfig {
        /// Path to configuration file (defaults are used when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "product-api",
            "serve",
            "--config",
            "api.json",
            "--port",
            "8080",
            "--api-key",
            "k",
        ])
        .unwrap();

        match cli.command {
            Command::Serve {
                config,
                port,
                api_key,
            } => {
                assert_eq!(config, Some(PathBuf::from("api.json")));
                assert_eq!(port, Some(8080));
                assert_eq!(api_key.as_deref(), Some("k"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_check_config_parses() {
        let cli = Cli::try_parse_from(["product-api", "check-config"]).unwrap();
        assert!(matches!(cli.command, Command::CheckConfig { config: None }));
    }
}
