//! PolicyStore - snapshot-based access to the loaded policy set.
//!
//! Readers take one `Arc<PolicySet>` per evaluation and keep using it even
//! if a reload swaps in a newer set meanwhile. Reload builds the complete
//! set before the swap, so no reader can see a partial set, and a failed
//! reload leaves the previous set in place. Reloads are serialized: a reload
//! that starts later always swaps after one that started earlier.

use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::domain::policy::PolicySet;
use crate::ports::{PolicyLoadError, PolicySource};

/// Summary of a completed (re)load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyLoadSummary {
    pub policies_loaded: usize,
    pub latest_version: Option<String>,
}

impl PolicyLoadSummary {
    fn of(set: &PolicySet) -> Self {
        Self {
            policies_loaded: set.len(),
            latest_version: set.latest().map(|p| p.version().to_string()),
        }
    }
}

/// Holds the current policy snapshot and the source it is loaded from.
pub struct PolicyStore {
    source: Arc<dyn PolicySource>,
    current: RwLock<Arc<PolicySet>>,
    reload_lock: Mutex<()>,
}

impl PolicyStore {
    /// Creates a store with an empty set. Call `reload` to populate it.
    pub fn empty(source: Arc<dyn PolicySource>) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(PolicySet::empty())),
            reload_lock: Mutex::new(()),
        }
    }

    /// Creates a store and performs the initial load.
    pub async fn load(source: Arc<dyn PolicySource>) -> Result<Self, PolicyLoadError> {
        let store = Self::empty(source);
        store.reload().await?;
        Ok(store)
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<PolicySet> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Reloads every policy from the source and swaps the snapshot.
    ///
    /// On error the previous snapshot stays current.
    pub async fn reload(&self) -> Result<PolicyLoadSummary, PolicyLoadError> {
        // Held across load and swap so a slow older load cannot overwrite a newer one.
        let _reloading = self.reload_lock.lock().await;

        let policies = match self.source.load_all().await {
            Ok(policies) => policies,
            Err(e) => {
                tracing::warn!(source = %self.source.describe(), error = %e, "Policy load failed");
                return Err(e);
            }
        };

        let set = PolicySet::new(policies).map_err(|e| {
            tracing::warn!(source = %self.source.describe(), error = %e, "Policy set rejected");
            PolicyLoadError::InvalidSet(e.to_string())
        })?;
        let summary = PolicyLoadSummary::of(&set);

        {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            *guard = Arc::new(set);
        }

        tracing::info!(
            source = %self.source.describe(),
            policies_loaded = summary.policies_loaded,
            latest_version = ?summary.latest_version,
            "Policies loaded"
        );

        Ok(summary)
    }

    /// Describes the backing source.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}
