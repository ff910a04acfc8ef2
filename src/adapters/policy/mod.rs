//! Policy source adapters.

mod document;
mod filesystem;
mod in_memory;

pub use document::{CohortEntry, PolicyDocument};
pub use filesystem::{compute_checksum, FsPolicySource};
pub use in_memory::InMemoryPolicySource;
