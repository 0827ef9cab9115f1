//! Application setup and initialization
//!
//! Everything loaded here (certificates, pass model) is read once and then
//! shared read-only through [`AppState`].

pub mod routes;
pub mod server;
pub mod signing;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use klima_core::Config;
use std::sync::Arc;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "klima_api=debug,klima_pass=debug,tower_http=debug";

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    klima_infra::init_telemetry(
        env!("CARGO_PKG_NAME"),
        config.environment(),
        DEFAULT_LOG_FILTER,
        klima_infra::TelemetryFormat::from_env(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Validate configuration - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let pipeline = signing::setup_pipeline(&config)?;
    let state = Arc::new(AppState::new(config.clone(), pipeline));

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
