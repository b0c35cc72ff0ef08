use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

// Default timeout functions
fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with FACTURIER_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the FACTURIER_ prefix and are separated by double underscores:
  /// - `FACTURIER_SERVER__HOST=0.0.0.0`
  /// - `FACTURIER_SERVER__PORT=8080`
  /// - `FACTURIER_DATABASE__URL=sqlite://facturier.db?mode=rwc`
  /// - `FACTURIER_DATABASE__MAX_CONNECTIONS=5`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if:
  /// - Required configuration files are missing
  /// - Configuration files contain invalid TOML
  /// - Required configuration values are missing
  /// - Configuration values have invalid types
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      // Start with default configuration
      .add_source(File::with_name("config/default").required(true))
      // Add optional local configuration (for local development overrides)
      .add_source(File::with_name("config/local").required(false))
      // Add optional environment-specific configuration
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // Add environment variables with FACTURIER_ prefix
      // Use double underscore as separator: FACTURIER_SERVER__PORT=8080
      .add_source(
        Environment::with_prefix("FACTURIER")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
