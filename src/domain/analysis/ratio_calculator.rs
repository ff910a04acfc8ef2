//! Ratio & Net-Benefit Calculator - ICER and incremental net monetary benefit.

use serde::{Deserialize, Serialize};

use super::{Arm, Increment};

/// Ratio and net benefit for one comparison at one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioOutcome {
    pub increment: Increment,
    /// ΔC / ΔE, or `None` when ΔE is exactly zero.
    pub icer: Option<f64>,
    /// threshold * ΔE - ΔC
    pub net_benefit: f64,
}

/// ICER and INB computation.
pub struct RatioCalculator;

impl RatioCalculator {
    /// Computes the ratio and net benefit of `intervention` over `comparator`.
    pub fn compute(comparator: &Arm, intervention: &Arm, threshold: f64) -> RatioOutcome {
        Self::compute_increment(Increment::between(comparator, intervention), threshold)
    }

    /// Computes from a precomputed increment.
    ///
    /// # Edge Cases
    /// - ΔE = 0: ICER is `None` regardless of ΔC; no infinity or clamp is substituted
    /// - Net benefit is always defined
    pub fn compute_increment(increment: Increment, threshold: f64) -> RatioOutcome {
        RatioOutcome {
            increment,
            icer: Self::icer(&increment),
            net_benefit: increment.net_benefit(threshold),
        }
    }

    /// ΔC / ΔE when ΔE is non-zero.
    pub fn icer(increment: &Increment) -> Option<f64> {
        if increment.delta_effect == 0.0 {
            None
        } else {
            Some(increment.delta_cost / increment.delta_effect)
        }
    }
}
