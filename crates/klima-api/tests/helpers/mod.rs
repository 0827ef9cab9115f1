//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p klima-api --test passes_test`.
//! Certificates come from `klima-pass/testdata`; the pass model is written
//! into a temporary directory per test.

#![allow(dead_code)]

use axum_test::TestServer;
use klima_api::setup::routes;
use klima_api::state::AppState;
use klima_core::config::{BaseConfig, PassServiceConfig};
use klima_core::{Config, LabelLocale};
use klima_pass::{
    CertificateBundle, CmsPassSigner, FieldLabels, PassAssembler, PassPipeline, PassSigner,
    PassTemplate,
};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// 1x1 PNG, base64-encoded.
pub const PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAIAAACQd1PeAAAADElEQVQI12P4AAAAAAEAAQAY3Y2JAAAAAElFTkSuQmCC";

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Options for the app under test.
pub struct TestAppOptions {
    pub max_body_size_bytes: usize,
    pub signing_timeout_secs: u64,
    pub http_concurrency_limit: usize,
    pub environment: &'static str,
    pub signer: Option<Arc<dyn PassSigner>>,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            max_body_size_bytes: 15 * 1024 * 1024,
            signing_timeout_secs: 10,
            http_concurrency_limit: 256,
            environment: "development",
            signer: None,
        }
    }
}

pub fn cert_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../klima-pass/testdata")
}

fn write_pass_model(dir: &Path) {
    let pass_json = serde_json::json!({
        "formatVersion": 1,
        "passTypeIdentifier": "pass.dev.klima.test",
        "teamIdentifier": "KLIMATEST1",
        "organizationName": "KlimaTicket",
        "description": "KlimaTicket",
        "serialNumber": "template",
        "storeCard": {
            "headerFields": [],
            "primaryFields": [],
            "secondaryFields": [],
            "auxiliaryFields": []
        }
    });
    std::fs::write(
        dir.join("pass.json"),
        serde_json::to_vec_pretty(&pass_json).expect("serialize pass.json"),
    )
    .expect("Failed to write pass.json");
    std::fs::write(dir.join("icon.png"), b"icon").expect("Failed to write icon.png");
}

pub fn create_test_config(pass_model_dir: &Path, options: &TestAppOptions) -> Config {
    Config(Box::new(PassServiceConfig {
        base: BaseConfig {
            host: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: options.environment.to_string(),
        },
        cert_dir: cert_dir(),
        pass_model_dir: pass_model_dir.to_path_buf(),
        max_body_size_bytes: options.max_body_size_bytes,
        signing_timeout_secs: options.signing_timeout_secs,
        label_locale: LabelLocale::English,
        http_concurrency_limit: options.http_concurrency_limit,
    }))
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    write_pass_model(temp_dir.path());

    let config = create_test_config(temp_dir.path(), &options);

    let signer = match options.signer {
        Some(signer) => signer,
        None => {
            let bundle = CertificateBundle::load(
                config.wwdr_cert_path(),
                config.signer_cert_path(),
                config.signer_key_path(),
            )
            .expect("Failed to load test certificates");
            Arc::new(CmsPassSigner::new(bundle))
        }
    };
    let template = PassTemplate::load(config.pass_model_dir()).expect("Failed to load pass model");
    let assembler = PassAssembler::new(
        Arc::new(template),
        FieldLabels::for_locale(config.label_locale()),
    );
    let pipeline = PassPipeline::new(assembler, signer);

    let state = Arc::new(AppState::new(config.clone(), pipeline));
    let router = routes::setup_routes(&config, state);
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}

/// The request from the end-to-end scenario: Jane Doe, Classic pass.
pub fn jane_doe_request() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "cardNr": "12345",
        "dateFrom": "01.01.2024",
        "dateTo": "31.12.2024",
        "dateBirth": "01.01.1990",
        "aztecCode": "XYZ123",
        "type": "Classic",
        "image": PNG_BASE64
    })
}

/// Read every entry of a `.pkpass` archive.
pub fn unzip(data: &[u8]) -> BTreeMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).expect("valid zip archive");
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("zip entry");
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).expect("read zip entry");
        entries.insert(file.name().to_string(), contents);
    }
    entries
}
