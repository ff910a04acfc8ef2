//! Evaluation result and its recorded assumptions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::analysis::{Decision, Dominance};
use crate::domain::foundation::{EvaluationId, Timestamp};
use crate::domain::policy::ThresholdSource;

/// Well-known assumption keys.
pub mod keys {
    pub const PERSPECTIVE: &str = "perspective";
    pub const EFFECT_UNIT: &str = "effect_unit";
    pub const THRESHOLD_UNIT: &str = "threshold_unit";
    pub const THRESHOLD_SOURCE: &str = "threshold_source";
    pub const COHORT: &str = "cohort";
    pub const DECISION_BASIS: &str = "decision_basis";
    pub const DOMINANCE_SCOPE: &str = "dominance_scope";
    pub const DISCOUNTING: &str = "discounting";
    pub const COST_DISCOUNT_RATE: &str = "cost_discount_rate";
    pub const EFFECT_DISCOUNT_RATE: &str = "effect_discount_rate";
    pub const PSA_SAMPLES: &str = "psa_samples";
    pub const PSA_SEED: &str = "psa_seed";
    pub const PSA_CORRELATION: &str = "psa_correlation";
    pub const PSA_TRUNCATION: &str = "psa_truncation";
}

/// Perspective, units, and simplifications that applied to one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assumptions(BTreeMap<String, String>);

impl Assumptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an assumption, replacing any earlier value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of one evaluation. Built once and returned by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluation_id: EvaluationId,
    /// ΔC / ΔE; `None` exactly when ΔE is zero.
    pub icer_value: Option<f64>,
    pub icer_unit: Option<String>,
    pub dominance: Dominance,
    pub decision: Decision,
    pub net_benefit: f64,
    /// Present exactly when uncertainty analysis was requested.
    pub ceac_prob_accept: Option<f64>,
    pub policy_version: Option<String>,
    pub threshold_used: f64,
    pub threshold_source: ThresholdSource,
    pub assumptions: Assumptions,
    pub evaluated_at: Timestamp,
}
