//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PolicySource` - Loads versioned willingness-to-pay policy artifacts

mod policy_source;

pub use policy_source::{PolicyLoadError, PolicySource};
