//! Route configuration and setup.
//!
//! Health checks live in [health](health).

mod health;

use crate::constants::{LEGACY_PASS_PATH, OPENAPI_PATH, PASSES_PATH};
use crate::error::redact_error_details;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use klima_core::Config;
use klima_infra::request_id_middleware;
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    tracing::info!(
        max_body_size_bytes = config.max_body_size_bytes(),
        "Request body limit enabled"
    );

    // One semaphore for the whole router; each in-flight issuance holds a blocking thread
    let http_concurrency_limit = config.http_concurrency_limit();
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    public_routes()
        .merge(pass_routes())
        .layer(GlobalConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_body_size_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            redact_error_details,
        ))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

fn pass_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(LEGACY_PASS_PATH, post(handlers::pass_create::create_pass))
        .route(PASSES_PATH, post(handlers::pass_create::create_pass))
}
