//! Validation modules

pub mod request;

pub use request::{RequestValidator, ValidationError, REQUIRED_FIELDS};
