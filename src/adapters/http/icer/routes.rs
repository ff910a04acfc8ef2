//! HTTP routes for ICER endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    evaluate, get_policy, health, list_policy_versions, reload_policies, IcerAppState,
};

/// Creates the ICER router with all routes.
pub fn icer_routes(state: IcerAppState) -> Router {
    Router::new()
        // POST /v1/icer/evaluate
        .route("/v1/icer/evaluate", post(evaluate))
        // GET /v1/icer/policies?version=
        .route("/v1/icer/policies", get(get_policy))
        // GET /v1/icer/policies/versions
        .route("/v1/icer/policies/versions", get(list_policy_versions))
        // POST /v1/icer/policies/reload
        .route("/v1/icer/policies/reload", post(reload_policies))
        // GET /health
        .route("/health", get(health))
        .with_state(state)
}
