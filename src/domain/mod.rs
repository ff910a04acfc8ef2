//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `analysis` - Pure cost-effectiveness services (dominance, ICER, decision, PSA)
//! - `policy` - Versioned willingness-to-pay policies and threshold resolution
//! - `evaluation` - Request, result, and error types for one evaluation

pub mod analysis;
pub mod evaluation;
pub mod foundation;
pub mod policy;
