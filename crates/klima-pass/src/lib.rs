//! Klima Pass Library
//!
//! Turns a validated [`klima_core::PassRequest`] into a signed `.pkpass`
//! archive: field mapping onto a pass-model template, expiration derivation,
//! thumbnail attachment, manifest digests, CMS signature and zip packaging.

pub mod archive;
pub mod assembler;
pub mod barcode;
pub mod error;
pub mod expiration;
pub mod fields;
pub mod manifest;
pub mod pipeline;
pub mod serial;
pub mod signing;
pub mod template;
pub mod thumbnail;

pub use assembler::{PassAssembler, PassContents};
pub use error::PassError;
pub use fields::{FieldGroups, FieldLabels, PassField};
pub use pipeline::PassPipeline;
pub use signing::{CertificateBundle, CmsPassSigner, PassSigner, SigningError};
pub use template::{PassTemplate, TemplateError};

/// File name to contents, keyed by the path inside the archive.
pub type PassFiles = std::collections::BTreeMap<String, Vec<u8>>;

/// Name of the pass definition inside the archive.
pub const PASS_JSON_FILE: &str = "pass.json";
