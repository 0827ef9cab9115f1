//! Manifest signing.
//!
//! A pass is authenticated by a detached PKCS#7 (CMS `SignedData`) signature
//! over `manifest.json`, produced with the pass type certificate and carrying
//! the WWDR intermediate so wallets can build the chain.

use std::path::{Path, PathBuf};

use cryptographic_message_syntax::{SignedDataBuilder, SignerBuilder};
use x509_certificate::{CapturedX509Certificate, InMemorySigningKeyPair};

#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {name} certificate: {message}")]
    InvalidCertificate { name: &'static str, message: String },

    #[error("invalid signer key: {0}")]
    InvalidKey(String),

    #[error("CMS signing failed: {0}")]
    Cms(String),
}

/// Produces the `signature` file of a pass from its manifest.
pub trait PassSigner: Send + Sync {
    fn sign_manifest(&self, manifest: &[u8]) -> Result<Vec<u8>, SigningError>;

    /// Human-readable signer identity for logs and health output.
    fn signer_name(&self) -> Option<String> {
        None
    }
}

/// Signing certificates and key, loaded once and never mutated.
pub struct CertificateBundle {
    wwdr: CapturedX509Certificate,
    signer_cert: CapturedX509Certificate,
    signer_key: InMemorySigningKeyPair,
}

impl std::fmt::Debug for CertificateBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("signer", &self.signer_cert.subject_common_name())
            .field("wwdr", &self.wwdr.subject_common_name())
            .finish_non_exhaustive()
    }
}

impl CertificateBundle {
    /// Parse PEM-encoded certificates and a PKCS#8 PEM private key.
    pub fn from_pem(wwdr: &[u8], signer_cert: &[u8], signer_key: &[u8]) -> Result<Self, SigningError> {
        let wwdr = CapturedX509Certificate::from_pem(wwdr).map_err(|e| {
            SigningError::InvalidCertificate {
                name: "WWDR",
                message: e.to_string(),
            }
        })?;
        let signer_cert = CapturedX509Certificate::from_pem(signer_cert).map_err(|e| {
            SigningError::InvalidCertificate {
                name: "signer",
                message: e.to_string(),
            }
        })?;
        let signer_key = InMemorySigningKeyPair::from_pkcs8_pem(signer_key)
            .map_err(|e| SigningError::InvalidKey(e.to_string()))?;

        Ok(Self {
            wwdr,
            signer_cert,
            signer_key,
        })
    }

    pub fn load(
        wwdr_path: impl AsRef<Path>,
        signer_cert_path: impl AsRef<Path>,
        signer_key_path: impl AsRef<Path>,
    ) -> Result<Self, SigningError> {
        let bundle = Self::from_pem(
            &read(wwdr_path.as_ref())?,
            &read(signer_cert_path.as_ref())?,
            &read(signer_key_path.as_ref())?,
        )?;
        tracing::info!(
            signer = ?bundle.signer_name(),
            wwdr = ?bundle.wwdr.subject_common_name(),
            "Signing certificates loaded"
        );
        Ok(bundle)
    }

    pub fn signer_name(&self) -> Option<String> {
        self.signer_cert.subject_common_name()
    }
}

fn read(path: &Path) -> Result<Vec<u8>, SigningError> {
    std::fs::read(path).map_err(|source| SigningError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// [`PassSigner`] producing a DER-encoded detached CMS signature.
#[derive(Debug)]
pub struct CmsPassSigner {
    bundle: CertificateBundle,
}

impl CmsPassSigner {
    pub fn new(bundle: CertificateBundle) -> Self {
        Self { bundle }
    }
}

impl PassSigner for CmsPassSigner {
    fn sign_manifest(&self, manifest: &[u8]) -> Result<Vec<u8>, SigningError> {
        let signer = SignerBuilder::new(&self.bundle.signer_key, self.bundle.signer_cert.clone());

        SignedDataBuilder::default()
            .content_external(manifest.to_vec())
            .signer(signer)
            .certificate(self.bundle.signer_cert.clone())
            .certificate(self.bundle.wwdr.clone())
            .build_der()
            .map_err(|e| SigningError::Cms(e.to_string()))
    }

    fn signer_name(&self) -> Option<String> {
        self.bundle.signer_name()
    }
}
