//! Policy artifact document - the on-disk and over-the-wire policy shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::policy::Policy;

/// Threshold override for one cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortEntry {
    pub threshold: f64,
}

/// A policy artifact as written by policy maintainers.
///
/// ```json
/// {
///   "version": "2025-08",
///   "threshold": 37446.0,
///   "cohorts": { "elderly": { "threshold": 36000.0 } },
///   "updated_at": "2025-08-16T11:38:00Z",
///   "notes": "..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub version: String,
    /// Default willingness-to-pay threshold.
    pub threshold: f64,
    /// Falls back to the source's default currency when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub cohorts: BTreeMap<String, CohortEntry>,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub notes: String,
    /// Populated on output only; ignored when reading an artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl PolicyDocument {
    /// Converts to a validated domain policy, stamping the artifact checksum.
    pub fn into_policy(
        self,
        default_currency: &str,
        checksum: Option<String>,
    ) -> Result<Policy, ValidationError> {
        let currency = self.currency.unwrap_or_else(|| default_currency.to_string());
        let mut builder = Policy::builder(self.version)
            .default_threshold(self.threshold)
            .currency(currency)
            .updated_at(self.updated_at)
            .notes(self.notes);

        for (name, entry) in self.cohorts {
            builder = builder.cohort(name, entry.threshold);
        }
        if let Some(checksum) = checksum {
            builder = builder.checksum(checksum);
        }

        builder.build()
    }
}

impl From<&Policy> for PolicyDocument {
    fn from(policy: &Policy) -> Self {
        Self {
            version: policy.version().to_string(),
            threshold: policy.default_threshold(),
            currency: Some(policy.currency().to_string()),
            cohorts: policy
                .cohort_thresholds()
                .iter()
                .map(|(name, &threshold)| (name.clone(), CohortEntry { threshold }))
                .collect(),
            updated_at: policy.updated_at(),
            notes: policy.notes().to_string(),
            checksum: policy.checksum().map(str::to_string),
        }
    }
}
