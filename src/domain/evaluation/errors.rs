//! Evaluation error types.

use thiserror::Error;

use crate::domain::analysis::ArmRole;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors surfaced by a single evaluation call.
///
/// All of them are caller-visible and none are retried: the computation is
/// deterministic in its inputs apart from PSA sampling variance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Invalid {role} arm: {reason}")]
    InvalidArm { role: ArmRole, reason: String },

    #[error("Effect unit mismatch: expected {expected}, got {actual}")]
    UnitMismatch { expected: String, actual: String },

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid discount rates: {0}")]
    InvalidDiscount(String),

    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("Invalid uncertainty spec: {0}")]
    InvalidUncertaintySpec(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EvaluationError {
    /// Creates an invalid arm error.
    pub fn invalid_arm(role: ArmRole, reason: impl Into<String>) -> Self {
        EvaluationError::InvalidArm {
            role,
            reason: reason.into(),
        }
    }

    /// Creates a unit mismatch error.
    pub fn unit_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        EvaluationError::UnitMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            EvaluationError::InvalidArm { .. } => ErrorCode::InvalidArm,
            EvaluationError::UnitMismatch { .. } => ErrorCode::UnitMismatch,
            EvaluationError::InvalidThreshold(_) => ErrorCode::InvalidThreshold,
            EvaluationError::InvalidDiscount(_) => ErrorCode::ValidationFailed,
            EvaluationError::PolicyNotFound(_) => ErrorCode::PolicyNotFound,
            EvaluationError::InvalidUncertaintySpec(_) => ErrorCode::InvalidUncertaintySpec,
            EvaluationError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<EvaluationError> for DomainError {
    fn from(err: EvaluationError) -> Self {
        let code = err.code();
        let error = DomainError::new(code, err.to_string());
        match err {
            EvaluationError::InvalidArm { role, .. } => error.with_detail("arm", role.to_string()),
            _ => error,
        }
    }
}
