//! Error types module
//!
//! All failures a pass request can end in are unified under [`AppError`]. Each
//! variant self-describes how it is presented to the caller through
//! [`ErrorMetadata`]: client-input problems map to 4xx, certificate and signing
//! problems map to 5xx. No variant is marked recoverable, because the service
//! never retries internally and leaves resubmission to the caller.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for malformed client payloads
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "SIGNING_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried as-is)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from the client
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Incomplete request; the user has to fill in more fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed date or image encoding.
    #[error("Format error: {0}")]
    Format(String),

    /// Certificate, key or CMS failure.
    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Signing did not finish within {secs}s")]
    SigningTimeout { secs: u64 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Malformed body rejected before the pipeline.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<crate::validation::ValidationError> for AppError {
    fn from(err: crate::validation::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Validation(_) => (
            422,
            "VALIDATION_ERROR",
            false,
            Some("Fill in every field of the pass form and resubmit"),
            false,
            LogLevel::Debug,
        ),
        AppError::Format(_) => (
            400,
            "FORMAT_ERROR",
            false,
            Some("Use DD.MM.YYYY dates and a base64-encoded image"),
            false,
            LogLevel::Debug,
        ),
        AppError::Signing(_) => (
            500,
            "SIGNING_ERROR",
            false,
            Some("Contact the operator; the signing certificates may be invalid"),
            true,
            LogLevel::Error,
        ),
        AppError::SigningTimeout { .. } => (
            504,
            "SIGNING_TIMEOUT",
            false,
            Some("Resubmit the request later"),
            false,
            LogLevel::Error,
        ),
        AppError::Serialization(_) => (
            500,
            "SERIALIZATION_ERROR",
            false,
            Some("Contact the operator; the pass model may be invalid"),
            true,
            LogLevel::Error,
        ),
        AppError::Transport(_) => (
            400,
            "TRANSPORT_ERROR",
            false,
            Some("Send a JSON object with Content-Type: application/json"),
            false,
            LogLevel::Warn,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce the thumbnail image size"),
            false,
            LogLevel::Warn,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            false,
            None,
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::Format(_) => "FormatError",
            AppError::Signing(_) | AppError::SigningTimeout { .. } => "SigningError",
            AppError::Serialization(_) => "SerializationError",
            AppError::Transport(_) | AppError::PayloadTooLarge(_) => "TransportError",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(ref msg) => msg.clone(),
            AppError::Format(ref msg) => msg.clone(),
            AppError::Signing(_) => "Failed to sign the pass".to_string(),
            AppError::SigningTimeout { secs } => {
                format!("Signing the pass took longer than {}s", secs)
            }
            AppError::Serialization(_) => "Failed to serialize the pass".to_string(),
            AppError::Transport(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
