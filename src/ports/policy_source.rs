//! PolicySource port - Interface for loading versioned policy artifacts.
//!
//! The engine's only contract with policy storage is "give me every policy
//! version you hold". Format, location, and reload triggering belong to the
//! adapter.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::policy::Policy;

/// Errors that can occur while loading policy artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyLoadError {
    #[error("Policy source not found: {0}")]
    SourceNotFound(String),

    #[error("IO error reading {artifact}: {reason}")]
    Io { artifact: String, reason: String },

    #[error("Cannot parse {artifact}: {reason}")]
    Parse { artifact: String, reason: String },

    #[error("Invalid policy in {artifact}: {reason}")]
    Invalid { artifact: String, reason: String },

    #[error("Policy set rejected: {0}")]
    InvalidSet(String),
}

impl From<PolicyLoadError> for DomainError {
    fn from(err: PolicyLoadError) -> Self {
        DomainError::new(ErrorCode::PolicyLoadFailed, err.to_string())
    }
}

/// Port for loading every available policy version.
///
/// Implementations must ensure:
/// - A call either returns every policy or an error, never a partial list
/// - Returned policies are fully validated
#[async_trait]
pub trait PolicySource: Send + Sync {
    /// Loads all policy versions.
    async fn load_all(&self) -> Result<Vec<Policy>, PolicyLoadError>;

    /// Describes the source for logs (e.g. a directory path).
    fn describe(&self) -> String;
}
