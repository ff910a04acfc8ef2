//! ICER Engine HTTP server.

use std::sync::Arc;

use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use icer_engine::adapters::http::{app_router, IcerAppState};
use icer_engine::adapters::FsPolicySource;
use icer_engine::application::PolicyStore;
use icer_engine::config::{AppConfig, CorsOrigins, LogFormat, ServerConfig};
use icer_engine::domain::analysis::UncertaintyAnalyzer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let source = FsPolicySource::new(&config.policy.directory)
        .with_default_currency(config.policy.default_currency.clone());
    let store = Arc::new(PolicyStore::load(Arc::new(source)).await?);
    let analyzer = UncertaintyAnalyzer::new(config.analysis.to_psa_settings());

    let app = app_router(IcerAppState::new(store, analyzer))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        policy_directory = %config.policy.directory.display(),
        "ICER engine listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ICER engine stopped");
    Ok(())
}

/// `RUST_LOG` overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match server.log_format() {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = match server.cors_origins() {
        CorsOrigins::Any => return CorsLayer::permissive(),
        CorsOrigins::List(origins) => origins,
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
