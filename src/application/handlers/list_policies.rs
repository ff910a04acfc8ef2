//! ListPoliciesHandler - Query handler for the loaded policy versions.

use serde::Serialize;
use std::sync::Arc;

use crate::application::PolicyStore;
use crate::domain::foundation::Timestamp;

/// One row of the version listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyVersionSummary {
    pub version: String,
    pub threshold: f64,
    pub currency: String,
    pub cohorts: usize,
    pub updated_at: Timestamp,
    pub latest: bool,
}

/// Version listing, latest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyVersionList {
    pub latest: Option<String>,
    pub versions: Vec<PolicyVersionSummary>,
}

/// Handler for listing loaded versions.
pub struct ListPoliciesHandler {
    store: Arc<PolicyStore>,
}

impl ListPoliciesHandler {
    pub fn new(store: Arc<PolicyStore>) -> Self {
        Self { store }
    }

    pub fn handle(&self) -> PolicyVersionList {
        let snapshot = self.store.snapshot();
        let latest = snapshot.latest().map(|p| p.version().to_string());

        let versions = snapshot
            .versions()
            .filter_map(|v| snapshot.get(v))
            .map(|policy| PolicyVersionSummary {
                version: policy.version().to_string(),
                threshold: policy.default_threshold(),
                currency: policy.currency().to_string(),
                cohorts: policy.cohort_thresholds().len(),
                updated_at: policy.updated_at(),
                latest: latest.as_deref() == Some(policy.version()),
            })
            .collect();

        PolicyVersionList { latest, versions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::policy::InMemoryPolicySource;
    use crate::domain::policy::Policy;

    fn policy(version: &str, updated_at: &str) -> Policy {
        Policy::builder(version)
            .default_threshold(30000.0)
            .cohort("elderly", 28000.0)
            .updated_at(Timestamp::parse_rfc3339(updated_at).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn lists_versions_latest_first() {
        let source = Arc::new(InMemoryPolicySource::new(vec![
            policy("2024-06", "2024-06-01T00:00:00Z"),
            policy("2025-08", "2025-08-16T11:38:00Z"),
        ]));
        let handler = ListPoliciesHandler::new(Arc::new(PolicyStore::load(source).await.unwrap()));

        let list = handler.handle();
        assert_eq!(list.latest.as_deref(), Some("2025-08"));
        assert_eq!(list.versions.len(), 2);
        assert_eq!(list.versions[0].version, "2025-08");
        assert!(list.versions[0].latest);
        assert!(!list.versions[1].latest);
        assert_eq!(list.versions[1].cohorts, 1);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let source = Arc::new(InMemoryPolicySource::default());
        let handler = ListPoliciesHandler::new(Arc::new(PolicyStore::load(source).await.unwrap()));

        let list = handler.handle();
        assert!(list.latest.is_none());
        assert!(list.versions.is_empty());
    }
}
