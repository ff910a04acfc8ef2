//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid default currency: {0}")]
    InvalidCurrency(String),

    #[error("PSA sample ceiling must be between 1 and {max}")]
    InvalidSampleCeiling { max: u32 },

    #[error("PSA chunk size must be positive")]
    InvalidChunkSize,

    #[error("PSA worker count must be between 1 and {max}")]
    InvalidWorkerCount { max: usize },
}
