//! API constants

/// Versioned API prefix
pub const API_PREFIX: &str = "/api/v0";

/// Pass issuance endpoint under [`API_PREFIX`].
pub const PASSES_PATH: &str = "/api/v0/passes";

/// Unversioned issuance endpoint kept for existing mobile clients.
pub const LEGACY_PASS_PATH: &str = "/";

pub const OPENAPI_PATH: &str = "/api/openapi.json";
