use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::pass_service;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use klima_core::{AppError, PassRequestBody, RequestValidator};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/passes",
    tag = "passes",
    request_body = PassRequestBody,
    responses(
        (status = 200, description = "Signed pass archive", content_type = "application/vnd.apple.pkpass"),
        (status = 400, description = "Malformed body, date or image", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Required fields missing", body = ErrorResponse),
        (status = 500, description = "Signing or packaging failed", body = ErrorResponse),
        (status = 504, description = "Signing timed out", body = ErrorResponse)
    )
)]
pub async fn create_pass(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<PassRequestBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = RequestValidator::validate(body)?;

    let artifact = pass_service::issue_pass(&state, request).await?;
    let file_name = artifact.file_name();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(Body::from(artifact.data))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
