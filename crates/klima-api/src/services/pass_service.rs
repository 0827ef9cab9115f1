//! Bounded pass issuance.
//!
//! Assembly and signing are CPU-bound, so the pipeline runs on the blocking
//! pool and the await is bounded by the configured signing timeout.

use chrono::Utc;
use klima_core::{AppError, PassArtifact, PassRequest};

use crate::state::AppState;

pub async fn issue_pass(state: &AppState, request: PassRequest) -> Result<PassArtifact, AppError> {
    let pipeline = state.pipeline.clone();
    let issued_at = Utc::now();
    let task = tokio::task::spawn_blocking(move || pipeline.issue(&request, issued_at));

    match tokio::time::timeout(state.config.signing_timeout(), task).await {
        Ok(Ok(result)) => result.map_err(AppError::from),
        Ok(Err(join_error)) => Err(AppError::from(
            anyhow::Error::new(join_error).context("Pass pipeline task failed"),
        )),
        Err(_) => {
            // The blocking task keeps running to completion; its result is dropped.
            Err(AppError::SigningTimeout {
                secs: state.config.signing_timeout_secs(),
            })
        }
    }
}
