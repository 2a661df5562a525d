//! CLI command implementations

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::ProductStore;
use crate::http_server::{ApiKeyGate, AppState, AuthConfig, HttpServer, HttpServerConfig};
use crate::observability::{init_logging, LogConfig};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub log: LogConfig,

    /// Load the three sample products at startup (default: true)
    #[serde(default = "default_seed")]
    pub seed_sample_products: bool,
}

fn default_seed() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            auth: AuthConfig::default(),
            log: LogConfig::default(),
            seed_sample_products: default_seed(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("Invalid config JSON: {}", e)))
    }

    /// Load from `path` when given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line and environment overrides
    pub fn with_overrides(mut self, port: Option<u16>, api_key: Option<String>) -> Self {
        if let Some(port) = port {
            self.http.port = port;
        }
        if let Some(api_key) = api_key {
            self.auth.api_key = api_key;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::Config("http.port must be > 0".to_string()));
        }

        self.gate()?;
        Ok(())
    }

    /// Build the API key gate described by `auth`
    pub fn gate(&self) -> CliResult<ApiKeyGate> {
        ApiKeyGate::from_config(&self.auth).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Store contents at startup
    pub fn initial_store(&self) -> ProductStore {
        if self.seed_sample_products {
            ProductStore::seeded()
        } else {
            ProductStore::new()
        }
    }

    /// Copy safe to print
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth.api_key.is_empty() {
            copy.auth.api_key = "<redacted>".to_string();
        }
        copy
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            api_key,
        } => {
            let config = Config::load_or_default(config.as_deref())?.with_overrides(port, api_key);
            serve(config)
        }
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Start the HTTP server and run until it stops
pub fn serve(config: Config) -> CliResult<()> {
    config.validate()?;

    init_logging(&config.log).map_err(|e| CliError::Boot(e.to_string()))?;

    let state = AppState::new(config.initial_store(), config.gate()?);
    let product_count = state
        .store
        .len()
        .map_err(|e| CliError::Boot(e.to_string()))?;
    tracing::info!(products = product_count, "product store ready");

    let server = HttpServer::new(config.http.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Boot(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::Serve(format!("HTTP server failed: {}", e)))
    })
}

/// Validate the configuration and print it as JSON
pub fn check_config(path: Option<&Path>) -> CliResult<()> {
    let config = Config::load_or_default(path)?;
    config.validate()?;

    let rendered = serde_json::to_string_pretty(&config.redacted())?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.auth.header, "x-api-key");
        assert!(config.seed_sample_products);
    }

    #[test]
    fn test_load_partial_file() {
        let file =
            write_config(r#"{ "auth": { "api_key": "abc" }, "seed_sample_products": false }"#);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.auth.api_key, "abc");
        assert_eq!(config.auth.header, "x-api-key");
        assert_eq!(config.http.port, 3000);
        assert!(!config.seed_sample_products);
        assert!(config.validate().is_ok());
        assert!(config.initial_store().is_empty().unwrap());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let file = write_config("{ not json");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn test_zero_port_fails_validation() {
        let config = Config::default().with_overrides(Some(0), Some("k".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().with_overrides(Some(8081), Some("override".to_string()));
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.auth.api_key, "override");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redacted_hides_key() {
        let config = Config::default().with_overrides(None, Some("s3cret".to_string()));
        let rendered = serde_json::to_string(&config.redacted()).unwrap();
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_seeded_store_by_default() {
        let store = Config::default().initial_store();
        assert_eq!(store.len().unwrap(), 3);
    }
}
