//! HTTP handlers for ICER endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::policy::PolicyDocument;
use crate::application::{
    EvaluateCommand, EvaluateHandler, GetPolicyHandler, GetPolicyQuery, ListPoliciesHandler,
    PolicyStore, PolicyVersionList, ReloadPoliciesHandler,
};
use crate::domain::analysis::UncertaintyAnalyzer;
use crate::domain::evaluation::{EvaluationError, EvaluationRequest, EvaluationResult};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PolicyLoadError;

use super::dto::{ErrorResponse, HealthResponse, PolicyQueryParams, ReloadResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// ICER API error that implements IntoResponse.
#[derive(Debug)]
pub enum IcerApiError {
    BadRequest(ErrorResponse),
    NotFound(ErrorResponse),
    Internal(ErrorResponse),
}

impl IntoResponse for IcerApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            IcerApiError::BadRequest(body) => (StatusCode::BAD_REQUEST, body),
            IcerApiError::NotFound(body) => (StatusCode::NOT_FOUND, body),
            IcerApiError::Internal(body) => (StatusCode::INTERNAL_SERVER_ERROR, body),
        };
        (status, Json(error)).into_response()
    }
}

impl From<EvaluationError> for IcerApiError {
    fn from(error: EvaluationError) -> Self {
        let code = error.code();
        let body = ErrorResponse::from(DomainError::from(error));
        match code {
            ErrorCode::PolicyNotFound => IcerApiError::NotFound(body),
            ErrorCode::InternalError | ErrorCode::PolicyLoadFailed => IcerApiError::Internal(body),
            _ => IcerApiError::BadRequest(body),
        }
    }
}

impl From<PolicyLoadError> for IcerApiError {
    fn from(error: PolicyLoadError) -> Self {
        IcerApiError::Internal(ErrorResponse::from(DomainError::from(error)))
    }
}

impl From<JsonRejection> for IcerApiError {
    fn from(rejection: JsonRejection) -> Self {
        IcerApiError::BadRequest(ErrorResponse::bad_request(rejection.body_text()))
    }
}

impl From<QueryRejection> for IcerApiError {
    fn from(rejection: QueryRejection) -> Self {
        IcerApiError::BadRequest(ErrorResponse::bad_request(rejection.body_text()))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing ICER engine dependencies.
#[derive(Clone)]
pub struct IcerAppState {
    pub store: Arc<PolicyStore>,
    pub analyzer: UncertaintyAnalyzer,
}

impl IcerAppState {
    pub fn new(store: Arc<PolicyStore>, analyzer: UncertaintyAnalyzer) -> Self {
        Self { store, analyzer }
    }

    pub fn evaluate_handler(&self) -> EvaluateHandler {
        EvaluateHandler::new(self.store.clone(), self.analyzer)
    }

    pub fn get_policy_handler(&self) -> GetPolicyHandler {
        GetPolicyHandler::new(self.store.clone())
    }

    pub fn list_policies_handler(&self) -> ListPoliciesHandler {
        ListPoliciesHandler::new(self.store.clone())
    }

    pub fn reload_policies_handler(&self) -> ReloadPoliciesHandler {
        ReloadPoliciesHandler::new(self.store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /v1/icer/evaluate
///
/// Evaluates one intervention against one comparator. Runs on the blocking
/// pool because uncertainty analysis is CPU-bound.
pub async fn evaluate(
    State(state): State<IcerAppState>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> Result<Json<EvaluationResult>, IcerApiError> {
    let Json(request) = payload?;
    let handler = state.evaluate_handler();

    let result = tokio::task::spawn_blocking(move || handler.handle(EvaluateCommand::new(request)))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Evaluation task failed");
            IcerApiError::Internal(ErrorResponse::internal("Evaluation task failed"))
        })??;

    Ok(Json(result))
}

/// GET /v1/icer/policies
///
/// Returns the requested policy version, or the latest.
pub async fn get_policy(
    State(state): State<IcerAppState>,
    params: Result<Query<PolicyQueryParams>, QueryRejection>,
) -> Result<Json<PolicyDocument>, IcerApiError> {
    let Query(params) = params?;
    let query = GetPolicyQuery {
        version: params.version,
    };
    let policy = state.get_policy_handler().handle(query)?;
    Ok(Json(PolicyDocument::from(&policy)))
}

/// GET /v1/icer/policies/versions
pub async fn list_policy_versions(State(state): State<IcerAppState>) -> Json<PolicyVersionList> {
    Json(state.list_policies_handler().handle())
}

/// POST /v1/icer/policies/reload
///
/// Reloads every policy from the configured source. A failed reload keeps
/// the previous policies in service.
pub async fn reload_policies(
    State(state): State<IcerAppState>,
) -> Result<Json<ReloadResponse>, IcerApiError> {
    let summary = state.reload_policies_handler().handle().await?;
    Ok(Json(ReloadResponse::from(summary)))
}

/// GET /health
pub async fn health(State(state): State<IcerAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        policies_loaded: state.store.snapshot().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ArmRole;

    #[test]
    fn policy_not_found_maps_to_404() {
        let err = IcerApiError::from(EvaluationError::PolicyNotFound("version 'x'".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_arm_maps_to_400() {
        let err = IcerApiError::from(EvaluationError::invalid_arm(ArmRole::Intervention, "bad"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_maps_to_500() {
        let err = IcerApiError::from(EvaluationError::Internal("worker panicked".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn load_failure_maps_to_500() {
        let err = IcerApiError::from(PolicyLoadError::SourceNotFound("policies".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
