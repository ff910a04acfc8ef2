//! Data transfer objects for the ICER HTTP endpoints.
//!
//! Evaluation requests and results travel as the domain types directly;
//! only error and policy-administration payloads have their own shapes.

use serde::{Deserialize, Serialize};

use crate::application::PolicyLoadSummary;
use crate::domain::foundation::DomainError;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            serde_json::to_value(&err.details).ok()
        };
        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}

/// Query parameters for `GET /v1/icer/policies`.
#[derive(Debug, Default, Deserialize)]
pub struct PolicyQueryParams {
    /// Exact version; latest when absent.
    pub version: Option<String>,
}

/// Response body for a successful reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub status: String,
    pub policies_loaded: usize,
    pub latest_version: Option<String>,
}

impl From<PolicyLoadSummary> for ReloadResponse {
    fn from(summary: PolicyLoadSummary) -> Self {
        Self {
            status: "reloaded".to_string(),
            policies_loaded: summary.policies_loaded,
            latest_version: summary.latest_version,
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
    pub policies_loaded: usize,
}
