//! Signing certificates and pass model loading

use anyhow::{Context, Result};
use klima_core::Config;
use klima_pass::PassPipeline;

/// Load the certificate bundle and pass model named by `config` and wire the pipeline.
pub fn setup_pipeline(config: &Config) -> Result<PassPipeline> {
    let pipeline = PassPipeline::from_config(config).with_context(|| {
        format!(
            "Failed to load signing material from {} and {}",
            config.cert_dir().display(),
            config.pass_model_dir().display()
        )
    })?;

    let template = pipeline.assembler().template();
    tracing::info!(
        locale = ?config.label_locale(),
        signer = ?pipeline.signer().signer_name(),
        pass_type_identifier = ?template.pass_type_identifier(),
        style = template.style(),
        "Pass pipeline ready"
    );

    Ok(pipeline)
}
