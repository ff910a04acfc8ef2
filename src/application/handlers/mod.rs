//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

mod evaluate;
mod get_policy;
mod list_policies;
mod reload_policies;

pub use evaluate::{EvaluateCommand, EvaluateHandler};
pub use get_policy::{GetPolicyHandler, GetPolicyQuery};
pub use list_policies::{ListPoliciesHandler, PolicyVersionList, PolicyVersionSummary};
pub use reload_policies::ReloadPoliciesHandler;
