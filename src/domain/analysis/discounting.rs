//! Discounting - extension point for converting arm streams to present values.
//!
//! Arms currently carry single point estimates, so the only strategy is
//! [`Undiscounted`]: supplied rates are validated and recorded but not applied.

use serde::{Deserialize, Serialize};

use super::Arm;
use crate::domain::foundation::ValidationError;

/// Conventional annual discount rate for both costs and effects.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.03;

fn default_rate() -> f64 {
    DEFAULT_DISCOUNT_RATE
}

/// Annual discount rates requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountRates {
    #[serde(default = "default_rate")]
    pub cost_rate: f64,
    #[serde(default = "default_rate")]
    pub effect_rate: f64,
}

impl Default for DiscountRates {
    fn default() -> Self {
        Self {
            cost_rate: DEFAULT_DISCOUNT_RATE,
            effect_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}

impl DiscountRates {
    /// Both rates must lie in [0, 1].
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, rate) in [("cost_rate", self.cost_rate), ("effect_rate", self.effect_rate)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ValidationError::out_of_range(field, 0.0, 1.0, rate));
            }
        }
        Ok(())
    }
}

/// Converts an arm to present value under the given rates.
pub trait DiscountingStrategy: Send + Sync {
    /// Short label recorded in evaluation assumptions.
    fn name(&self) -> &'static str;

    /// Returns the discounted arm.
    fn apply(&self, arm: &Arm, rates: &DiscountRates) -> Arm;
}

/// Treats point estimates as present values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Undiscounted;

impl DiscountingStrategy for Undiscounted {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply(&self, arm: &Arm, _rates: &DiscountRates) -> Arm {
        *arm
    }
}
