//! Application state shared by all handlers.

use klima_core::Config;
use klima_pass::PassPipeline;

/// Read-only after startup; handlers receive it as `State<Arc<AppState>>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: PassPipeline,
}

impl AppState {
    pub fn new(config: Config, pipeline: PassPipeline) -> Self {
        Self { config, pipeline }
    }
}
