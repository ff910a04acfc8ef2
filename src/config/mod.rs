//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ICER_ENGINE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use icer_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Policies read from {}", config.policy.directory.display());
//! ```

mod analysis;
mod error;
mod policy;
mod server;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use policy::PolicyConfig;
pub use server::{CorsOrigins, Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Policy artifact location
    #[serde(default)]
    pub policy: PolicyConfig,

    /// PSA limits and parallelism
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ICER_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ICER_ENGINE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ICER_ENGINE__POLICY__DIRECTORY=/etc/icer/policies` -> `policy.directory = ...`
    /// - `ICER_ENGINE__ANALYSIS__WORKERS=4` -> `analysis.workers = 4`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ICER_ENGINE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.policy.validate()?;
        self.analysis.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "ICER_ENGINE__SERVER__PORT",
        "ICER_ENGINE__SERVER__ENVIRONMENT",
        "ICER_ENGINE__POLICY__DIRECTORY",
        "ICER_ENGINE__POLICY__DEFAULT_CURRENCY",
        "ICER_ENGINE__ANALYSIS__MAX_SAMPLES",
        "ICER_ENGINE__ANALYSIS__WORKERS",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.policy.directory, PathBuf::from("policies"));
        assert_eq!(config.analysis.max_samples, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ICER_ENGINE__SERVER__PORT", "3000");
        env::set_var("ICER_ENGINE__POLICY__DIRECTORY", "/etc/icer/policies");
        env::set_var("ICER_ENGINE__POLICY__DEFAULT_CURRENCY", "USD");
        env::set_var("ICER_ENGINE__ANALYSIS__MAX_SAMPLES", "20000");
        env::set_var("ICER_ENGINE__ANALYSIS__WORKERS", "4");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.policy.directory, PathBuf::from("/etc/icer/policies"));
        assert_eq!(config.policy.default_currency, "USD");
        assert_eq!(config.analysis.max_samples, 20_000);
        assert_eq!(config.analysis.workers, 4);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ICER_ENGINE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_aggregates_sections() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.analysis.workers = 0;
        assert!(config.validate().is_err());
    }
}
