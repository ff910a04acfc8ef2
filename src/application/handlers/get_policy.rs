//! GetPolicyHandler - Query handler for one policy version.

use std::sync::Arc;

use crate::application::PolicyStore;
use crate::domain::evaluation::EvaluationError;
use crate::domain::policy::Policy;

/// Query for a policy; `None` means the latest.
#[derive(Debug, Clone, Default)]
pub struct GetPolicyQuery {
    pub version: Option<String>,
}

/// Handler for reading a single policy.
pub struct GetPolicyHandler {
    store: Arc<PolicyStore>,
}

impl GetPolicyHandler {
    pub fn new(store: Arc<PolicyStore>) -> Self {
        Self { store }
    }

    pub fn handle(&self, query: GetPolicyQuery) -> Result<Policy, EvaluationError> {
        let snapshot = self.store.snapshot();
        snapshot.lookup(query.version.as_deref()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::policy::InMemoryPolicySource;
    use crate::domain::foundation::Timestamp;

    fn policy(version: &str, updated_at: &str) -> Policy {
        Policy::builder(version)
            .default_threshold(37446.0)
            .updated_at(Timestamp::parse_rfc3339(updated_at).unwrap())
            .build()
            .unwrap()
    }

    async fn handler() -> GetPolicyHandler {
        let source = Arc::new(InMemoryPolicySource::new(vec![
            policy("2024-06", "2024-06-01T00:00:00Z"),
            policy("2025-08", "2025-08-16T11:38:00Z"),
        ]));
        GetPolicyHandler::new(Arc::new(PolicyStore::load(source).await.unwrap()))
    }

    #[tokio::test]
    async fn returns_latest_without_version() {
        let policy = handler().await.handle(GetPolicyQuery::default()).unwrap();
        assert_eq!(policy.version(), "2025-08");
    }

    #[tokio::test]
    async fn returns_requested_version() {
        let query = GetPolicyQuery {
            version: Some("2024-06".to_string()),
        };
        let policy = handler().await.handle(query).unwrap();
        assert_eq!(policy.version(), "2024-06");
    }

    #[tokio::test]
    async fn unknown_version_is_not_found() {
        let query = GetPolicyQuery {
            version: Some("2030-01".to_string()),
        };
        let result = handler().await.handle(query);
        assert!(matches!(result, Err(EvaluationError::PolicyNotFound(_))));
    }
}
