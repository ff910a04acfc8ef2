//! PolicySet - the immutable collection of loaded policies and threshold resolution.

use std::collections::HashMap;

use super::{Policy, Threshold, ThresholdSource, ThresholdUnit};
use crate::domain::analysis::EffectUnit;
use crate::domain::evaluation::EvaluationError;
use crate::domain::foundation::ValidationError;

/// The threshold an evaluation will apply, with provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResolution {
    pub threshold: Threshold,
    /// Policy that applied, or would have applied had no explicit threshold
    /// been given. `None` when no such policy exists.
    pub policy_version: Option<String>,
}

/// Every loaded policy version.
///
/// The latest policy is the one with the greatest `updated_at`; ties go to
/// the greatest version string.
#[derive(Debug, Clone, Default)]
pub struct PolicySet {
    policies: HashMap<String, Policy>,
    /// Versions ordered latest first.
    order: Vec<String>,
}

impl PolicySet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set, rejecting duplicate versions.
    pub fn new(policies: Vec<Policy>) -> Result<Self, ValidationError> {
        let mut by_version = HashMap::with_capacity(policies.len());
        for policy in policies {
            let version = policy.version().to_string();
            if by_version.insert(version.clone(), policy).is_some() {
                return Err(ValidationError::invalid_format(
                    "version",
                    format!("policy version '{}' is defined more than once", version),
                ));
            }
        }

        let mut order: Vec<String> = by_version.keys().cloned().collect();
        order.sort_by(|a, b| {
            let (pa, pb) = (&by_version[a], &by_version[b]);
            pb.updated_at().cmp(&pa.updated_at()).then_with(|| b.cmp(a))
        });

        Ok(Self {
            policies: by_version,
            order,
        })
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Returns a policy by exact version.
    pub fn get(&self, version: &str) -> Option<&Policy> {
        self.policies.get(version)
    }

    /// Returns the latest policy.
    pub fn latest(&self) -> Option<&Policy> {
        self.order.first().and_then(|v| self.policies.get(v))
    }

    /// Returns all versions, latest first.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Finds the hinted version, or the latest when no hint is given.
    ///
    /// A hint naming an unknown version is an error; it never falls back to
    /// the latest policy.
    pub fn lookup(&self, version_hint: Option<&str>) -> Result<&Policy, EvaluationError> {
        match version_hint {
            Some(version) => self
                .get(version)
                .ok_or_else(|| EvaluationError::PolicyNotFound(format!("version '{}'", version))),
            None => self
                .latest()
                .ok_or_else(|| EvaluationError::PolicyNotFound("no policies are loaded".to_string())),
        }
    }

    /// Resolves the threshold to apply.
    ///
    /// # Precedence
    /// 1. `explicit` wins outright; the hinted (or latest) policy is still
    ///    reported if it exists, and a missing policy is not an error
    /// 2. A cohort override in the resolved policy
    /// 3. The resolved policy's default threshold
    ///
    /// # Edge Cases
    /// - A cohort unknown to the policy silently uses the default
    /// - An explicit threshold tagged `default` or `cohort` is re-tagged `explicit`
    pub fn resolve(
        &self,
        version_hint: Option<&str>,
        cohort: Option<&str>,
        explicit: Option<&Threshold>,
        effect_unit: EffectUnit,
    ) -> Result<ThresholdResolution, EvaluationError> {
        if let Some(explicit) = explicit {
            let mut threshold = explicit.clone();
            if !threshold.source.is_caller_supplied() {
                threshold.source = ThresholdSource::Explicit;
            }
            return Ok(ThresholdResolution {
                threshold,
                policy_version: self.lookup(version_hint).ok().map(|p| p.version().to_string()),
            });
        }

        let policy = self.lookup(version_hint)?;
        let (value, source) = match cohort.and_then(|c| policy.cohort_threshold(c)) {
            Some(value) => (value, ThresholdSource::Cohort),
            None => (policy.default_threshold(), ThresholdSource::Default),
        };

        let unit = ThresholdUnit::new(policy.currency(), effect_unit)
            .map_err(|e| EvaluationError::InvalidThreshold(e.to_string()))?;
        let threshold = Threshold::new(value, unit, source)
            .map_err(|e| EvaluationError::InvalidThreshold(e.to_string()))?;

        Ok(ThresholdResolution {
            threshold,
            policy_version: Some(policy.version().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn policy(version: &str, updated_at: &str, default: f64) -> Policy {
        Policy::builder(version)
            .default_threshold(default)
            .cohort("elderly", 36000.0)
            .updated_at(Timestamp::parse_rfc3339(updated_at).unwrap())
            .build()
            .unwrap()
    }

    fn policy_set() -> PolicySet {
        PolicySet::new(vec![
            policy("2024-06", "2024-06-01T00:00:00Z", 35000.0),
            policy("2025-08", "2025-08-16T11:38:00Z", 37446.0),
        ])
        .unwrap()
    }

    fn explicit(value: f64, source: ThresholdSource) -> Threshold {
        Threshold::new(value, "CNY_per_QALY".parse().unwrap(), source).unwrap()
    }

    #[test]
    fn latest_is_most_recently_updated() {
        let set = policy_set();
        assert_eq!(set.latest().unwrap().version(), "2025-08");
        assert_eq!(set.versions().collect::<Vec<_>>(), vec!["2025-08", "2024-06"]);
    }

    #[test]
    fn updated_at_ties_go_to_greatest_version() {
        let set = PolicySet::new(vec![
            policy("a", "2025-01-01T00:00:00Z", 1.0),
            policy("b", "2025-01-01T00:00:00Z", 2.0),
        ])
        .unwrap();
        assert_eq!(set.latest().unwrap().version(), "b");
    }

    #[test]
    fn duplicate_versions_are_rejected() {
        let result = PolicySet::new(vec![
            policy("2025-08", "2025-08-16T11:38:00Z", 37446.0),
            policy("2025-08", "2025-08-17T11:38:00Z", 40000.0),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn default_threshold_from_latest_policy() {
        let resolution = policy_set().resolve(None, None, None, EffectUnit::Qaly).unwrap();

        assert_eq!(resolution.threshold.value, 37446.0);
        assert_eq!(resolution.threshold.source, ThresholdSource::Default);
        assert_eq!(resolution.threshold.unit.to_string(), "CNY_per_QALY");
        assert_eq!(resolution.policy_version.as_deref(), Some("2025-08"));
    }

    #[test]
    fn cohort_override_applies() {
        let resolution = policy_set()
            .resolve(None, Some("elderly"), None, EffectUnit::Qaly)
            .unwrap();

        assert_eq!(resolution.threshold.value, 36000.0);
        assert_eq!(resolution.threshold.source, ThresholdSource::Cohort);
    }

    #[test]
    fn unknown_cohort_falls_back_to_default_silently() {
        let resolution = policy_set()
            .resolve(Some("2025-08"), Some("unknown"), None, EffectUnit::Qaly)
            .unwrap();

        assert_eq!(resolution.threshold.value, 37446.0);
        assert_eq!(resolution.threshold.source, ThresholdSource::Default);
    }

    #[test]
    fn hinted_version_is_used() {
        let resolution = policy_set()
            .resolve(Some("2024-06"), None, None, EffectUnit::Daly)
            .unwrap();

        assert_eq!(resolution.threshold.value, 35000.0);
        assert_eq!(resolution.threshold.unit.to_string(), "CNY_per_DALY");
        assert_eq!(resolution.policy_version.as_deref(), Some("2024-06"));
    }

    #[test]
    fn unknown_version_is_an_error() {
        let err = policy_set()
            .resolve(Some("1999-01"), None, None, EffectUnit::Qaly)
            .unwrap_err();
        assert!(matches!(err, EvaluationError::PolicyNotFound(_)));
    }

    #[test]
    fn empty_set_without_explicit_threshold_is_an_error() {
        let err = PolicySet::empty()
            .resolve(None, None, None, EffectUnit::Qaly)
            .unwrap_err();
        assert!(matches!(err, EvaluationError::PolicyNotFound(_)));
    }

    #[test]
    fn explicit_threshold_wins_and_keeps_policy_version() {
        let threshold = explicit(50000.0, ThresholdSource::Literature);
        let resolution = policy_set()
            .resolve(None, Some("elderly"), Some(&threshold), EffectUnit::Qaly)
            .unwrap();

        assert_eq!(resolution.threshold.value, 50000.0);
        assert_eq!(resolution.threshold.source, ThresholdSource::Literature);
        assert_eq!(resolution.policy_version.as_deref(), Some("2025-08"));
    }

    #[test]
    fn explicit_threshold_tolerates_missing_policy() {
        let threshold = explicit(50000.0, ThresholdSource::Explicit);
        let resolution = policy_set()
            .resolve(Some("1999-01"), None, Some(&threshold), EffectUnit::Qaly)
            .unwrap();

        assert_eq!(resolution.threshold.value, 50000.0);
        assert!(resolution.policy_version.is_none());
    }

    #[test]
    fn explicit_threshold_cannot_claim_policy_provenance() {
        let threshold = explicit(50000.0, ThresholdSource::Cohort);
        let resolution = policy_set()
            .resolve(None, None, Some(&threshold), EffectUnit::Qaly)
            .unwrap();

        assert_eq!(resolution.threshold.source, ThresholdSource::Explicit);
    }
}
