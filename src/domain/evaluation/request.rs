//! Evaluation request - everything a caller supplies for one evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::EvaluationError;
use crate::domain::analysis::{
    Arm, ArmRole, DiscountRates, EffectUnit, Increment, UncertaintySpec,
};
use crate::domain::policy::Threshold;

/// Analytic perspective. Recorded in assumptions, not branched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Societal,
    #[default]
    Payer,
    Provider,
}

impl Perspective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Perspective::Societal => "societal",
            Perspective::Payer => "payer",
            Perspective::Provider => "provider",
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to evaluate one intervention against one comparator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub comparator: Arm,
    pub intervention: Arm,
    /// Caller override for the willingness-to-pay threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Threshold>,
    #[serde(default)]
    pub perspective: Perspective,
    /// Policy version to resolve against; latest when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<UncertaintySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountRates>,
}

impl EvaluationRequest {
    /// Creates a request with defaults for every optional field.
    pub fn new(comparator: Arm, intervention: Arm) -> Self {
        Self {
            comparator,
            intervention,
            threshold: None,
            perspective: Perspective::default(),
            policy_version: None,
            cohort: None,
            uncertainty: None,
            discount: None,
        }
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn with_policy_version(mut self, version: impl Into<String>) -> Self {
        self.policy_version = Some(version.into());
        self
    }

    pub fn with_cohort(mut self, cohort: impl Into<String>) -> Self {
        self.cohort = Some(cohort.into());
        self
    }

    pub fn with_uncertainty(mut self, spec: UncertaintySpec) -> Self {
        self.uncertainty = Some(spec);
        self
    }

    pub fn with_discount(mut self, rates: DiscountRates) -> Self {
        self.discount = Some(rates);
        self
    }

    /// Validates arms, units, explicit threshold, and discount rates.
    ///
    /// Returns the shared effect unit on success. Uncertainty is validated
    /// separately because its ceiling is a deployment setting. A policy
    /// threshold is only known after resolution, so callers re-run
    /// [`check_increment`] with it.
    pub fn validate(&self) -> Result<EffectUnit, EvaluationError> {
        validate_arm(&self.comparator, ArmRole::Comparator)?;
        validate_arm(&self.intervention, ArmRole::Intervention)?;

        let unit = self.comparator.effect_unit;
        if self.intervention.effect_unit != unit {
            return Err(EvaluationError::unit_mismatch(unit, self.intervention.effect_unit));
        }

        if let Some(threshold) = &self.threshold {
            Threshold::check_value(threshold.value)
                .map_err(|e| EvaluationError::InvalidThreshold(e.to_string()))?;
            if threshold.unit.effect_unit() != unit {
                return Err(EvaluationError::unit_mismatch(unit, threshold.unit.effect_unit()));
            }
        }

        if let Some(discount) = &self.discount {
            discount
                .validate()
                .map_err(|e| EvaluationError::InvalidDiscount(e.to_string()))?;
        }

        check_increment(
            &Increment::between(&self.comparator, &self.intervention),
            self.threshold.as_ref().map(|t| t.value),
        )?;

        Ok(unit)
    }
}

/// Rejects comparisons whose deltas, ratio or net benefit leave the finite
/// `f64` range. Finite arms can still overflow, e.g. ΔC = 1e300 over
/// ΔE = 1e-10.
pub fn check_increment(increment: &Increment, threshold: Option<f64>) -> Result<(), EvaluationError> {
    let Increment {
        delta_cost,
        delta_effect,
    } = *increment;

    if !delta_cost.is_finite() || !delta_effect.is_finite() {
        return Err(EvaluationError::invalid_arm(
            ArmRole::Intervention,
            format!(
                "increment over comparator is not finite (ΔC={}, ΔE={})",
                delta_cost, delta_effect
            ),
        ));
    }
    if delta_effect != 0.0 && !(delta_cost / delta_effect).is_finite() {
        return Err(EvaluationError::invalid_arm(
            ArmRole::Intervention,
            format!(
                "cost-effectiveness ratio overflows (ΔC={}, ΔE={})",
                delta_cost, delta_effect
            ),
        ));
    }
    if let Some(threshold) = threshold {
        if !(threshold * delta_effect).is_finite() || !increment.net_benefit(threshold).is_finite() {
            return Err(EvaluationError::InvalidThreshold(format!(
                "net benefit overflows at threshold {} (ΔE={})",
                threshold, delta_effect
            )));
        }
    }
    Ok(())
}

fn validate_arm(arm: &Arm, role: ArmRole) -> Result<(), EvaluationError> {
    if !arm.cost.is_finite() || arm.cost < 0.0 {
        return Err(EvaluationError::invalid_arm(
            role,
            format!("cost must be a non-negative finite number, got {}", arm.cost),
        ));
    }
    if !arm.effect.is_finite() {
        return Err(EvaluationError::invalid_arm(
            role,
            format!("effect must be a finite number, got {}", arm.effect),
        ));
    }
    Ok(())
}
