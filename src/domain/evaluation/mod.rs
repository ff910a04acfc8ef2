//! Evaluation module - request, result, and error types for one ICER evaluation.

mod errors;
mod request;
mod result;

pub use errors::EvaluationError;
pub use request::{check_increment, EvaluationRequest, Perspective};
pub use result::{keys as assumption_keys, Assumptions, EvaluationResult};
