//! Completeness check gating a pass request before any assembly work.
//!
//! A field counts as filled when it is present and not the empty string.
//! Values are not trimmed and dates are not parsed here, so `" "` passes and a
//! malformed `dateTo` is only caught by the assembler.

use crate::models::{PassRequest, PassRequestBody};

/// Wire names of the required fields, in declaration order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "cardNr",
    "dateFrom",
    "dateTo",
    "dateBirth",
    "type",
    "aztecCode",
    "image",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingFields(fields) => fields,
        }
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Boolean completeness verdict, usable to enable a submit action.
    pub fn is_complete(body: &PassRequestBody) -> bool {
        Self::missing_fields(body).is_empty()
    }

    /// Names of every field that is absent or empty.
    pub fn missing_fields(body: &PassRequestBody) -> Vec<&'static str> {
        let values = [
            &body.name,
            &body.card_nr,
            &body.date_from,
            &body.date_to,
            &body.date_birth,
            &body.pass_type,
            &body.aztec_code,
            &body.image,
        ];

        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(field, _)| *field)
            .collect()
    }

    /// Freeze a complete body into a [`PassRequest`].
    pub fn validate(body: PassRequestBody) -> Result<PassRequest, ValidationError> {
        let missing = Self::missing_fields(&body);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        // Every field was checked above.
        Ok(PassRequest {
            name: body.name.unwrap_or_default(),
            card_nr: body.card_nr.unwrap_or_default(),
            date_from: body.date_from.unwrap_or_default(),
            date_to: body.date_to.unwrap_or_default(),
            date_birth: body.date_birth.unwrap_or_default(),
            aztec_code: body.aztec_code.unwrap_or_default(),
            pass_type: body.pass_type.unwrap_or_default(),
            image: body.image.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_body() -> PassRequestBody {
        PassRequestBody {
            name: Some("Jane Doe".to_string()),
            card_nr: Some("12345".to_string()),
            date_from: Some("01.01.2024".to_string()),
            date_to: Some("31.12.2024".to_string()),
            date_birth: Some("01.01.1990".to_string()),
            aztec_code: Some("XYZ123".to_string()),
            pass_type: Some("Classic".to_string()),
            image: Some("aGVsbG8=".to_string()),
        }
    }

    fn clear_field(body: &mut PassRequestBody, field: &str, value: Option<String>) {
        let slot = match field {
            "name" => &mut body.name,
            "cardNr" => &mut body.card_nr,
            "dateFrom" => &mut body.date_from,
            "dateTo" => &mut body.date_to,
            "dateBirth" => &mut body.date_birth,
            "type" => &mut body.pass_type,
            "aztecCode" => &mut body.aztec_code,
            "image" => &mut body.image,
            other => panic!("unknown field {other}"),
        };
        *slot = value;
    }

    #[test]
    fn test_complete_body_is_accepted() {
        let body = complete_body();
        assert!(RequestValidator::is_complete(&body));

        let request = RequestValidator::validate(body).unwrap();
        assert_eq!(request.name, "Jane Doe");
        assert_eq!(request.pass_type, "Classic");
        assert_eq!(request.aztec_code, "XYZ123");
    }

    #[test]
    fn test_any_single_empty_field_is_rejected() {
        for field in REQUIRED_FIELDS {
            let mut body = complete_body();
            clear_field(&mut body, field, Some(String::new()));

            assert!(!RequestValidator::is_complete(&body), "{field} empty");
            let err = RequestValidator::validate(body).unwrap_err();
            assert_eq!(err.missing_fields(), &[field]);
        }
    }

    #[test]
    fn test_any_single_absent_field_is_rejected() {
        for field in REQUIRED_FIELDS {
            let mut body = complete_body();
            clear_field(&mut body, field, None);
            assert!(!RequestValidator::is_complete(&body), "{field} absent");
        }
    }

    #[test]
    fn test_all_missing_fields_are_reported_in_order() {
        let err = RequestValidator::validate(PassRequestBody::default()).unwrap_err();
        assert_eq!(err.missing_fields(), &REQUIRED_FIELDS);
        assert!(err.to_string().starts_with("missing required fields: name, cardNr"));
    }

    #[test]
    fn test_content_and_length_do_not_matter() {
        let mut body = complete_body();
        body.name = Some("x".to_string());
        body.image = Some("A".repeat(100_000));
        // Not a date, but date formats are checked later by the assembler.
        body.date_from = Some("soon".to_string());
        assert!(RequestValidator::is_complete(&body));
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        let mut body = complete_body();
        body.card_nr = Some("   ".to_string());
        assert!(RequestValidator::is_complete(&body));
    }
}
