//! Klima Core Library
//!
//! This crate provides the domain models, request validation, error types and
//! configuration shared by the pass assembler, the HTTP API and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, LabelLocale};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{PassArtifact, PassRequest, PassRequestBody};
pub use validation::{RequestValidator, ValidationError};
