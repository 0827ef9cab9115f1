use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{PKPASS_CONTENT_TYPE, PKPASS_EXTENSION};

/// Pass request as submitted by the client.
///
/// Every field is optional on the wire so that an absent field is reported by
/// the validator by name instead of failing JSON deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassRequestBody {
    /// Full name of the card holder
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "12345")]
    pub card_nr: Option<String>,
    /// Start of validity, `DD.MM.YYYY`
    #[schema(example = "01.01.2024")]
    pub date_from: Option<String>,
    /// End of validity, `DD.MM.YYYY`
    #[schema(example = "31.12.2024")]
    pub date_to: Option<String>,
    /// Birth date, `DD.MM.YYYY`
    #[schema(example = "01.01.1990")]
    pub date_birth: Option<String>,
    /// Payload of the Aztec barcode
    #[schema(example = "XYZ123")]
    pub aztec_code: Option<String>,
    /// Pass type label shown in the header
    #[serde(rename = "type")]
    #[schema(example = "Classic")]
    pub pass_type: Option<String>,
    /// Base64-encoded PNG thumbnail
    pub image: Option<String>,
}

/// A complete pass request. Only [`crate::RequestValidator`] constructs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRequest {
    pub name: String,
    pub card_nr: String,
    pub date_from: String,
    pub date_to: String,
    pub date_birth: String,
    pub aztec_code: String,
    pub pass_type: String,
    /// Base64 text; decoded by the assembler.
    pub image: String,
}

/// Signed pass archive ready to hand to a wallet.
#[derive(Debug, Clone)]
pub struct PassArtifact {
    pub serial_number: String,
    pub content_type: &'static str,
    pub data: Bytes,
}

impl PassArtifact {
    pub fn pkpass(serial_number: String, data: impl Into<Bytes>) -> Self {
        Self {
            serial_number,
            content_type: PKPASS_CONTENT_TYPE,
            data: data.into(),
        }
    }

    /// File name used for downloads, e.g. `3f2a….pkpass`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.serial_number, PKPASS_EXTENSION)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_uses_client_field_names() {
        let body: PassRequestBody = serde_json::from_value(serde_json::json!({
            "name": "Jane Doe",
            "cardNr": "12345",
            "dateFrom": "01.01.2024",
            "dateTo": "31.12.2024",
            "dateBirth": "01.01.1990",
            "aztecCode": "XYZ123",
            "type": "Classic",
            "image": "aGVsbG8="
        }))
        .unwrap();

        assert_eq!(body.card_nr.as_deref(), Some("12345"));
        assert_eq!(body.date_birth.as_deref(), Some("01.01.1990"));
        assert_eq!(body.aztec_code.as_deref(), Some("XYZ123"));
        assert_eq!(body.pass_type.as_deref(), Some("Classic"));
    }

    #[test]
    fn test_body_tolerates_missing_and_unknown_fields() {
        let body: PassRequestBody =
            serde_json::from_value(serde_json::json!({ "name": "Jane", "extra": true })).unwrap();
        assert_eq!(body.name.as_deref(), Some("Jane"));
        assert!(body.image.is_none());
    }

    #[test]
    fn test_artifact_file_name() {
        let artifact = PassArtifact::pkpass("abc123".to_string(), vec![1u8, 2, 3]);
        assert_eq!(artifact.file_name(), "abc123.pkpass");
        assert_eq!(artifact.content_type, "application/vnd.apple.pkpass");
        assert_eq!(artifact.len(), 3);
    }
}
