//! ICER HTTP adapter module.
//!
//! Provides REST API endpoints for evaluations and policy administration.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, HealthResponse, PolicyQueryParams, ReloadResponse};
pub use handlers::{IcerApiError, IcerAppState};
pub use routes::icer_routes;
