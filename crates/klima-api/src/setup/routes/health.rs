//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_type_identifier: Option<String>,
    pub pass_style: &'static str,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health check reporting the loaded signer identity and pass model.
///
/// Both are loaded before the server starts, so a running process is healthy.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let template = state.pipeline.assembler().template();

    let response = HealthCheckResponse {
        status: "healthy",
        signer: state.pipeline.signer().signer_name(),
        pass_type_identifier: template.pass_type_identifier().map(String::from),
        pass_style: template.style(),
    };

    (StatusCode::OK, Json(response))
}
