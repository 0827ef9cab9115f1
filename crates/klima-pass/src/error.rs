use crate::signing::SigningError;
use crate::template::TemplateError;

/// Failure of a single pass issuance.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error("invalid date '{value}', expected DD.MM.YYYY")]
    InvalidDate { value: String },

    #[error("invalid thumbnail image: {0}")]
    InvalidImage(String),

    #[error("failed to serialize pass: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("pass model error: {0}")]
    Template(#[from] TemplateError),

    #[error("failed to write pass archive: {0}")]
    Archive(String),

    #[error(transparent)]
    Signing(#[from] SigningError),
}

impl PassError {
    /// Whether the caller can fix this by resubmitting corrected data.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PassError::InvalidDate { .. } | PassError::InvalidImage(_)
        )
    }
}

impl From<zip::result::ZipError> for PassError {
    fn from(err: zip::result::ZipError) -> Self {
        PassError::Archive(err.to_string())
    }
}

impl From<std::io::Error> for PassError {
    fn from(err: std::io::Error) -> Self {
        PassError::Archive(err.to_string())
    }
}

impl From<PassError> for klima_core::AppError {
    fn from(err: PassError) -> Self {
        use klima_core::AppError;

        match err {
            PassError::InvalidDate { .. } | PassError::InvalidImage(_) => {
                AppError::Format(err.to_string())
            }
            PassError::Signing(_) => AppError::Signing(err.to_string()),
            PassError::Serialization(_) => AppError::Serialization(err.to_string()),
            PassError::Template(_) | PassError::Archive(_) => AppError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klima_core::{AppError, ErrorMetadata};

    #[test]
    fn test_malformed_input_maps_to_format_error() {
        let err: AppError = PassError::InvalidDate {
            value: "2024-12-31".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Format(ref msg) if msg.contains("2024-12-31")));
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_signing_failure_maps_to_signing_error() {
        let err: AppError = PassError::Signing(SigningError::InvalidKey("bad".to_string())).into();
        assert!(matches!(err, AppError::Signing(_)));
        assert!(err.is_sensitive());
    }
}
