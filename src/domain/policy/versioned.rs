//! Policy - a versioned, immutable threshold snapshot.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Threshold, ThresholdUnit};
use crate::domain::analysis::EffectUnit;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Currency assumed when a policy artifact does not name one.
pub const DEFAULT_CURRENCY: &str = "CNY";

/// A versioned willingness-to-pay policy.
///
/// Policies are never edited in place; a change is a new version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    version: String,
    default_threshold: f64,
    cohort_thresholds: BTreeMap<String, f64>,
    currency: String,
    updated_at: Timestamp,
    notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
}

impl Policy {
    /// Creates a builder for the given version.
    pub fn builder(version: impl Into<String>) -> PolicyBuilder {
        PolicyBuilder::new(version)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }

    pub fn cohort_thresholds(&self) -> &BTreeMap<String, f64> {
        &self.cohort_thresholds
    }

    /// Returns the override for `cohort`, if the policy defines one.
    pub fn cohort_threshold(&self, cohort: &str) -> Option<f64> {
        self.cohort_thresholds.get(cohort).copied()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// SHA-256 of the artifact this policy was loaded from.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }
}

/// Builder for constructing Policy instances.
#[derive(Debug)]
pub struct PolicyBuilder {
    version: String,
    default_threshold: f64,
    cohort_thresholds: Vec<(String, f64)>,
    currency: String,
    updated_at: Option<Timestamp>,
    notes: String,
    checksum: Option<String>,
}

impl PolicyBuilder {
    /// Creates a new builder.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            default_threshold: 0.0,
            cohort_thresholds: Vec::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            updated_at: None,
            notes: String::new(),
            checksum: None,
        }
    }

    /// Sets the default threshold.
    pub fn default_threshold(mut self, value: f64) -> Self {
        self.default_threshold = value;
        self
    }

    /// Adds a cohort override.
    pub fn cohort(mut self, name: impl Into<String>, value: f64) -> Self {
        self.cohort_thresholds.push((name.into(), value));
        self
    }

    /// Sets the currency code.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Sets the last-updated time. Defaults to now.
    pub fn updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Sets free-form notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Records the source artifact checksum.
    pub fn checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    /// Validates and builds the policy.
    ///
    /// # Errors
    /// - Empty version or cohort name
    /// - Non-positive or non-finite default or cohort threshold
    /// - The same cohort listed twice
    /// - A currency that is not an upper-case code
    pub fn build(self) -> Result<Policy, ValidationError> {
        if self.version.trim().is_empty() {
            return Err(ValidationError::empty_field("version"));
        }
        Threshold::check_value(self.default_threshold)?;
        ThresholdUnit::new(self.currency.as_str(), EffectUnit::Qaly)?;

        let mut cohort_thresholds = BTreeMap::new();
        for (name, value) in self.cohort_thresholds {
            if name.trim().is_empty() {
                return Err(ValidationError::empty_field("cohort"));
            }
            Threshold::check_value(value)
                .map_err(|_| ValidationError::out_of_range(format!("cohorts.{}", name), 0.0, f64::MAX, value))?;
            if cohort_thresholds.insert(name.clone(), value).is_some() {
                return Err(ValidationError::invalid_format(
                    "cohorts",
                    format!("cohort '{}' is defined more than once", name),
                ));
            }
        }

        Ok(Policy {
            version: self.version,
            default_threshold: self.default_threshold,
            cohort_thresholds,
            currency: self.currency,
            updated_at: self.updated_at.unwrap_or_else(Timestamp::now),
            notes: self.notes,
            checksum: self.checksum,
        })
    }
}
