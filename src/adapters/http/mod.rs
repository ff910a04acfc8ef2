//! HTTP adapters - REST API implementations.
//!
//! Cross-cutting layers (CORS, timeout, tracing) are added by the binary so
//! tests can drive the bare router.

pub mod icer;

pub use icer::{icer_routes, IcerAppState};

use axum::Router;

/// Builds the application router.
pub fn app_router(state: IcerAppState) -> Router {
    icer_routes(state)
}
