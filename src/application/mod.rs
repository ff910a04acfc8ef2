//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Evaluations are read-only over a policy snapshot; the only write path is
//! a policy reload.

pub mod handlers;
mod policy_store;

pub use handlers::{
    EvaluateCommand, EvaluateHandler, GetPolicyHandler, GetPolicyQuery, ListPoliciesHandler,
    PolicyVersionList, PolicyVersionSummary, ReloadPoliciesHandler,
};
pub use policy_store::{PolicyLoadSummary, PolicyStore};
