//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use klima_core::Config;

/// Validate critical configuration values
///
/// Fails when a limit is zero or a configured directory does not exist.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.max_body_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Max body size cannot be 0"));
    }

    if config.signing_timeout_secs() == 0 {
        return Err(anyhow::anyhow!("Signing timeout cannot be 0"));
    }

    if config.http_concurrency_limit() == 0 {
        return Err(anyhow::anyhow!("HTTP concurrency limit cannot be 0"));
    }

    if !config.cert_dir().is_dir() {
        return Err(anyhow::anyhow!(
            "Certificate directory {} does not exist - set CERT_DIR",
            config.cert_dir().display()
        ));
    }

    if !config.pass_model_dir().is_dir() {
        return Err(anyhow::anyhow!(
            "Pass model directory {} does not exist - set PASS_MODEL_DIR",
            config.pass_model_dir().display()
        ));
    }

    if config.signing_timeout_secs() > 60 {
        tracing::warn!(
            signing_timeout_secs = config.signing_timeout_secs(),
            "Signing timeout is very high - clients may give up before the pass is returned"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use klima_core::config::{BaseConfig, PassServiceConfig};
    use klima_core::LabelLocale;
    use std::path::{Path, PathBuf};

    fn config(dir: &Path, max_body_size_bytes: usize, signing_timeout_secs: u64) -> Config {
        Config(Box::new(PassServiceConfig {
            base: BaseConfig {
                host: "127.0.0.1".to_string(),
                server_port: 3000,
                environment: "development".to_string(),
            },
            cert_dir: dir.to_path_buf(),
            pass_model_dir: dir.to_path_buf(),
            max_body_size_bytes,
            signing_timeout_secs,
            label_locale: LabelLocale::English,
            http_concurrency_limit: 256,
        }))
    }

    #[test]
    fn test_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config(&config(dir.path(), 1024, 10)).is_ok());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config(&config(dir.path(), 0, 10)).is_err());
        assert!(validate_config(&config(dir.path(), 1024, 0)).is_err());
    }

    #[test]
    fn test_zero_concurrency_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), 1024, 10);
        config.0.http_concurrency_limit = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_missing_directories_are_rejected() {
        let missing = PathBuf::from("/nonexistent/klima");
        let err = validate_config(&config(&missing, 1024, 10)).unwrap_err();
        assert!(err.to_string().contains("CERT_DIR"));
    }
}
