//! Willingness-to-pay thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::analysis::EffectUnit;
use crate::domain::foundation::ValidationError;

/// Where a threshold value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// The policy's default threshold.
    Default,
    /// A cohort override within the policy.
    Cohort,
    /// Caller-supplied value taken from published literature.
    Literature,
    /// Caller-supplied value from a willingness-to-pay survey.
    WtpSurvey,
    /// Caller-supplied value with no further provenance.
    Explicit,
}

impl ThresholdSource {
    /// True for sources that only a caller can supply.
    pub fn is_caller_supplied(&self) -> bool {
        matches!(
            self,
            ThresholdSource::Literature | ThresholdSource::WtpSurvey | ThresholdSource::Explicit
        )
    }

    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdSource::Default => "default",
            ThresholdSource::Cohort => "cohort",
            ThresholdSource::Literature => "literature",
            ThresholdSource::WtpSurvey => "wtp_survey",
            ThresholdSource::Explicit => "explicit",
        }
    }
}

impl fmt::Display for ThresholdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Currency per effect unit, written `CNY_per_QALY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThresholdUnit {
    currency: String,
    effect_unit: EffectUnit,
}

impl ThresholdUnit {
    /// Creates a unit, validating the currency code.
    pub fn new(currency: impl Into<String>, effect_unit: EffectUnit) -> Result<Self, ValidationError> {
        let currency = currency.into();
        if currency.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::invalid_format(
                "currency",
                format!("'{}' is not an upper-case currency code", currency),
            ));
        }
        Ok(Self {
            currency,
            effect_unit,
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn effect_unit(&self) -> EffectUnit {
        self.effect_unit
    }
}

impl fmt::Display for ThresholdUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_per_{}", self.currency, self.effect_unit)
    }
}

impl FromStr for ThresholdUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (currency, effect) = s.split_once("_per_").ok_or_else(|| {
            ValidationError::invalid_format("unit", format!("'{}' is not of the form CUR_per_UNIT", s))
        })?;
        Self::new(currency, effect.parse()?)
    }
}

impl TryFrom<String> for ThresholdUnit {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThresholdUnit> for String {
    fn from(unit: ThresholdUnit) -> Self {
        unit.to_string()
    }
}

fn explicit_source() -> ThresholdSource {
    ThresholdSource::Explicit
}

/// A willingness-to-pay value with its unit and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub unit: ThresholdUnit,
    #[serde(default = "explicit_source")]
    pub source: ThresholdSource,
}

impl Threshold {
    /// Creates a threshold, requiring a positive finite value.
    pub fn new(value: f64, unit: ThresholdUnit, source: ThresholdSource) -> Result<Self, ValidationError> {
        Self::check_value(value)?;
        Ok(Self { value, unit, source })
    }

    /// Validates a threshold value.
    pub fn check_value(value: f64) -> Result<(), ValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ValidationError::out_of_range("threshold", 0.0, f64::MAX, value))
        }
    }
}
