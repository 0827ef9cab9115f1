//! Domain models for pass issuance.

pub mod pass;

pub use pass::{PassArtifact, PassRequest, PassRequestBody};
