//! In-memory policy source for tests and embedded use.
//!
//! Holds policies directly instead of reading artifacts. Contents can be
//! replaced at runtime to exercise reloads, and a load failure can be
//! injected to exercise the keep-previous-set path.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::policy::Policy;
use crate::ports::{PolicyLoadError, PolicySource};

/// In-memory policy source.
///
/// # Example
///
/// ```ignore
/// let source = Arc::new(InMemoryPolicySource::new(vec![policy]));
/// let store = PolicyStore::load(source.clone()).await?;
///
/// source.replace(vec![newer_policy]);
/// store.reload().await?;
/// ```
#[derive(Default)]
pub struct InMemoryPolicySource {
    policies: RwLock<Vec<Policy>>,
    failure: RwLock<Option<PolicyLoadError>>,
}

impl InMemoryPolicySource {
    pub fn new(policies: Vec<Policy>) -> Self {
        Self {
            policies: RwLock::new(policies),
            failure: RwLock::new(None),
        }
    }

    /// Replaces the held policies; visible on the next load.
    pub fn replace(&self, policies: Vec<Policy>) {
        let mut guard = self.policies.write().unwrap_or_else(|e| e.into_inner());
        *guard = policies;
    }

    /// Makes every subsequent load fail with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<PolicyLoadError>) {
        let mut guard = self.failure.write().unwrap_or_else(|e| e.into_inner());
        *guard = error;
    }
}

#[async_trait]
impl PolicySource for InMemoryPolicySource {
    async fn load_all(&self) -> Result<Vec<Policy>, PolicyLoadError> {
        if let Some(error) = self.failure.read().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(error);
        }
        Ok(self.policies.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
