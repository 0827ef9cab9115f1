//! Configuration module
//!
//! Settings are read once at startup from the environment (and a `.env` file,
//! when present) and then handed explicitly to the components that need them.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_HTTP_CONCURRENCY_LIMIT, DEFAULT_MAX_BODY_SIZE_MB, DEFAULT_PORT,
    DEFAULT_SIGNING_TIMEOUT_SECS, SIGNER_CERT_FILE, SIGNER_KEY_FILE, WWDR_CERT_FILE,
};

/// Language of the labels printed next to secondary and auxiliary fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelLocale {
    #[default]
    English,
    German,
}

impl FromStr for LabelLocale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(LabelLocale::English),
            "de" | "german" | "deutsch" => Ok(LabelLocale::German),
            other => Err(anyhow::anyhow!(
                "Unsupported PASS_LABEL_LOCALE '{}', expected 'en' or 'de'",
                other
            )),
        }
    }
}

/// Base server configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub host: String,
    pub server_port: u16,
    pub environment: String,
}

/// Pass issuance configuration
#[derive(Clone, Debug)]
pub struct PassServiceConfig {
    pub base: BaseConfig,
    pub cert_dir: PathBuf,
    pub pass_model_dir: PathBuf,
    pub max_body_size_bytes: usize,
    pub signing_timeout_secs: u64,
    pub label_locale: LabelLocale,
    /// Shared by every route, not per route.
    pub http_concurrency_limit: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PassServiceConfig>);

impl Config {
    fn as_pass(&self) -> &PassServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PassServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_pass().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn host(&self) -> &str {
        &self.as_pass().base.host
    }

    pub fn server_port(&self) -> u16 {
        self.as_pass().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_pass().base.environment
    }

    pub fn cert_dir(&self) -> &std::path::Path {
        &self.as_pass().cert_dir
    }

    pub fn wwdr_cert_path(&self) -> PathBuf {
        self.cert_dir().join(WWDR_CERT_FILE)
    }

    pub fn signer_cert_path(&self) -> PathBuf {
        self.cert_dir().join(SIGNER_CERT_FILE)
    }

    pub fn signer_key_path(&self) -> PathBuf {
        self.cert_dir().join(SIGNER_KEY_FILE)
    }

    pub fn pass_model_dir(&self) -> &std::path::Path {
        &self.as_pass().pass_model_dir
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.as_pass().max_body_size_bytes
    }

    pub fn signing_timeout_secs(&self) -> u64 {
        self.as_pass().signing_timeout_secs
    }

    pub fn signing_timeout(&self) -> Duration {
        Duration::from_secs(self.signing_timeout_secs())
    }

    pub fn label_locale(&self) -> LabelLocale {
        self.as_pass().label_locale
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_pass().http_concurrency_limit
    }
}

impl PassServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let base = BaseConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_number("PORT", env::var("PORT").ok(), DEFAULT_PORT)?,
            environment,
        };

        let max_body_size_mb = parse_number(
            "MAX_BODY_SIZE_MB",
            env::var("MAX_BODY_SIZE_MB").ok(),
            DEFAULT_MAX_BODY_SIZE_MB,
        )?;

        let label_locale = match env::var("PASS_LABEL_LOCALE") {
            Ok(value) => value.parse()?,
            Err(_) => LabelLocale::default(),
        };

        Ok(PassServiceConfig {
            base,
            cert_dir: env::var("CERT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("cert")),
            pass_model_dir: env::var("PASS_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("transit.pass")),
            max_body_size_bytes: mib_to_bytes(max_body_size_mb)?,
            signing_timeout_secs: parse_number(
                "SIGNING_TIMEOUT_SECS",
                env::var("SIGNING_TIMEOUT_SECS").ok(),
                DEFAULT_SIGNING_TIMEOUT_SECS,
            )?,
            label_locale,
            http_concurrency_limit: parse_number(
                "HTTP_CONCURRENCY_LIMIT",
                env::var("HTTP_CONCURRENCY_LIMIT").ok(),
                DEFAULT_HTTP_CONCURRENCY_LIMIT,
            )?,
        })
    }
}

/// Parse an optional numeric setting; unset means `default`, unparsable is an error.
fn parse_number<T: FromStr>(name: &str, value: Option<String>, default: T) -> Result<T, anyhow::Error> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name)),
        None => Ok(default),
    }
}

fn mib_to_bytes(mib: usize) -> Result<usize, anyhow::Error> {
    mib.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_BODY_SIZE_MB is too large"))
}
