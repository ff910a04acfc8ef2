//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `policy` - Policy sources (filesystem artifacts, in-memory)
//! - `http` - REST API (axum)

pub mod http;
pub mod policy;

pub use policy::{FsPolicySource, InMemoryPolicySource};
