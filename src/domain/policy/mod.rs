//! Policy module - versioned willingness-to-pay thresholds.
//!
//! A `Policy` is an immutable snapshot loaded from a versioned artifact.
//! `PolicySet` holds every loaded version and owns the single threshold
//! resolution rule: explicit > cohort > default.

mod policy_set;
mod threshold;
mod versioned;

pub use policy_set::{PolicySet, ThresholdResolution};
pub use threshold::{Threshold, ThresholdSource, ThresholdUnit};
pub use versioned::{Policy, PolicyBuilder, DEFAULT_CURRENCY};
