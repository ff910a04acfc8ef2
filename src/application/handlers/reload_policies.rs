//! ReloadPoliciesHandler - Command handler for an explicit policy reload.

use std::sync::Arc;

use crate::application::{PolicyLoadSummary, PolicyStore};
use crate::ports::PolicyLoadError;

/// Handler for reloading policies from the configured source.
pub struct ReloadPoliciesHandler {
    store: Arc<PolicyStore>,
}

impl ReloadPoliciesHandler {
    pub fn new(store: Arc<PolicyStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<PolicyLoadSummary, PolicyLoadError> {
        tracing::info!(source = %self.store.source_description(), "Policy reload requested");
        self.store.reload().await
    }
}
