//! Klima CLI: submit pass requests to a running server or issue passes offline.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use klima_core::{PassArtifact, PassRequestBody};
use reqwest::Client;

/// Server address used when none is given.
pub const DEFAULT_SERVER: &str = "192.168.1.1:3000";

/// File the pass is written to when no output path is given.
pub const DEFAULT_OUTPUT: &str = "file.pkpass";

/// Shown for every failed submission, followed by the server's description.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while importing the pass.";

/// Normalize `host:port` input into a base URL.
pub fn server_base_url(server: &str) -> String {
    let server = server.trim().trim_end_matches('/');
    if server.starts_with("http://") || server.starts_with("https://") {
        server.to_string()
    } else {
        format!("http://{}", server)
    }
}

/// Read a pass request JSON file.
pub fn load_request(path: &Path) -> Result<PassRequestBody> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("Failed to parse request file {}", path.display()))
}

/// Write `data` to `path` through a temporary file in the same directory, so
/// a failed write never leaves a truncated pass behind.
pub fn write_pass_atomically(path: &Path, data: &[u8]) -> Result<()> {
    use std::io::Write;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(data).context("Failed to write pass")?;
    file.persist(path)
        .with_context(|| format!("Failed to save pass to {}", path.display()))?;
    Ok(())
}

/// Error description from a failed response body.
///
/// Uses the `error` field of a JSON error response, or the raw body text.
pub fn describe_error_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

/// HTTP client for the pass service.
#[derive(Clone, Debug)]
pub struct PassClient {
    client: Client,
    base_url: String,
}

impl PassClient {
    pub fn new(server: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: server_base_url(server),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request to `/` and return the raw pass archive.
    pub async fn submit(&self, body: &PassRequestBody) -> Result<Vec<u8>> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("{} Failed to reach {}", FALLBACK_ERROR_MESSAGE, url))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "{} Server responded with {}: {}",
                FALLBACK_ERROR_MESSAGE,
                status,
                describe_error_body(&error_text)
            ));
        }

        let data = response.bytes().await.context("Failed to read response body")?;
        Ok(data.to_vec())
    }
}

/// Issue a pass locally with the certificates and pass model named in the environment.
pub fn issue_offline(config: &klima_core::Config, body: PassRequestBody) -> Result<PassArtifact> {
    let request = klima_core::RequestValidator::validate(body)?;
    let pipeline = klima_pass::PassPipeline::from_config(config)
        .context("Failed to load signing certificates or pass model")?;
    let artifact = pipeline.issue(&request, chrono::Utc::now())?;
    Ok(artifact)
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_server_base_url() {
        assert_eq!(server_base_url("192.168.1.1:3000"), "http://192.168.1.1:3000");
        assert_eq!(server_base_url("https://passes.example/"), "https://passes.example");
        assert_eq!(server_base_url(" localhost:3000 "), "http://localhost:3000");
    }

    #[test]
    fn test_describe_error_body() {
        assert_eq!(
            describe_error_body(r#"{"error":"missing required fields: image","code":"VALIDATION_ERROR"}"#),
            "missing required fields: image"
        );
        assert_eq!(describe_error_body("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_load_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, br#"{"name":"Jane Doe","cardNr":"12345","type":"Classic"}"#).unwrap();

        let body = load_request(&path).unwrap();
        assert_eq!(body.name.as_deref(), Some("Jane Doe"));
        assert_eq!(body.pass_type.as_deref(), Some("Classic"));
        assert!(body.image.is_none());
    }

    #[test]
    fn test_write_pass_atomically_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.pkpass");
        std::fs::write(&path, b"old").unwrap();

        write_pass_atomically(&path, b"new pass").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new pass");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    fn config(cert_dir: PathBuf, pass_model_dir: PathBuf) -> klima_core::Config {
        klima_core::Config(Box::new(klima_core::config::PassServiceConfig {
            base: klima_core::config::BaseConfig {
                host: "127.0.0.1".to_string(),
                server_port: 3000,
                environment: "development".to_string(),
            },
            cert_dir,
            pass_model_dir,
            max_body_size_bytes: 1024,
            signing_timeout_secs: 10,
            label_locale: klima_core::LabelLocale::English,
            http_concurrency_limit: 256,
        }))
    }

    #[test]
    fn test_issue_offline_rejects_incomplete_request() {
        let config = config("/nonexistent".into(), "/nonexistent".into());
        let err = issue_offline(&config, PassRequestBody::default()).unwrap_err();
        assert!(err.to_string().contains("missing required fields"));
    }

    #[test]
    fn test_issue_offline_with_fixture_certificates() {
        let testdata = Path::new(env!("CARGO_MANIFEST_DIR")).join("../klima-pass/testdata");
        let config = config(testdata.clone(), testdata.join("transit.pass"));
        let body: PassRequestBody = serde_json::from_value(serde_json::json!({
            "name": "Jane Doe",
            "cardNr": "12345",
            "dateFrom": "01.01.2024",
            "dateTo": "31.12.2024",
            "dateBirth": "01.01.1990",
            "aztecCode": "XYZ123",
            "type": "Classic",
            "image": "aGVsbG8="
        }))
        .unwrap();

        let artifact = issue_offline(&config, body).unwrap();
        assert_eq!(artifact.serial_number.len(), 32);
        assert_eq!(artifact.file_name(), format!("{}.pkpass", artifact.serial_number));
        assert_eq!(&artifact.data[..2], b"PK");
    }
}
