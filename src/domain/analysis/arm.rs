//! Arms - the two treatment options under comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Unit in which an arm's health effect is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EffectUnit {
    /// Quality-adjusted life years gained.
    #[default]
    Qaly,
    /// Disability-adjusted life years averted.
    Daly,
    Other,
}

impl EffectUnit {
    /// Returns the wire label for this unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectUnit::Qaly => "QALY",
            EffectUnit::Daly => "DALY",
            EffectUnit::Other => "OTHER",
        }
    }
}

impl fmt::Display for EffectUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QALY" => Ok(EffectUnit::Qaly),
            "DALY" => Ok(EffectUnit::Daly),
            "OTHER" => Ok(EffectUnit::Other),
            other => Err(ValidationError::invalid_format(
                "effect_unit",
                format!("unknown effect unit '{}'", other),
            )),
        }
    }
}

/// Which side of the comparison an arm sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmRole {
    Comparator,
    Intervention,
}

impl fmt::Display for ArmRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmRole::Comparator => f.write_str("comparator"),
            ArmRole::Intervention => f.write_str("intervention"),
        }
    }
}

/// One treatment option: its cost and its health effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arm {
    /// Cost in currency units. Must be non-negative.
    pub cost: f64,
    /// Health effect in `effect_unit`.
    pub effect: f64,
    #[serde(default)]
    pub effect_unit: EffectUnit,
}

impl Arm {
    /// Creates a QALY-measured arm.
    pub fn new(cost: f64, effect: f64) -> Self {
        Self {
            cost,
            effect,
            effect_unit: EffectUnit::Qaly,
        }
    }

    /// Creates an arm with an explicit effect unit.
    pub fn with_unit(cost: f64, effect: f64, effect_unit: EffectUnit) -> Self {
        Self {
            cost,
            effect,
            effect_unit,
        }
    }
}

/// Incremental cost and effect of the intervention over the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Increment {
    /// ΔC = intervention.cost - comparator.cost
    pub delta_cost: f64,
    /// ΔE = intervention.effect - comparator.effect
    pub delta_effect: f64,
}

impl Increment {
    /// Computes the increment of `intervention` over `comparator`.
    pub fn between(comparator: &Arm, intervention: &Arm) -> Self {
        Self {
            delta_cost: intervention.cost - comparator.cost,
            delta_effect: intervention.effect - comparator.effect,
        }
    }

    /// Creates an increment from raw deltas.
    pub fn from_deltas(delta_cost: f64, delta_effect: f64) -> Self {
        Self {
            delta_cost,
            delta_effect,
        }
    }

    /// True when both deltas are exactly zero.
    pub fn is_null(&self) -> bool {
        self.delta_cost == 0.0 && self.delta_effect == 0.0
    }

    /// Incremental net monetary benefit at `threshold`.
    pub fn net_benefit(&self, threshold: f64) -> f64 {
        threshold * self.delta_effect - self.delta_cost
    }
}
