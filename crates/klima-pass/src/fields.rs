//! Display fields of the four field groups.
//!
//! Order inside a group is the order the wallet renders the fields in, so the
//! groups are plain vectors appended to the template's own arrays.

use klima_core::{LabelLocale, PassRequest};
use serde::Serialize;
use serde_json::{Map, Value};

/// One label/value pair on the pass face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassField {
    pub key: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub value: String,
}

impl PassField {
    fn unlabeled(key: &'static str, value: &str) -> Self {
        Self {
            key,
            label: None,
            value: value.to_string(),
        }
    }

    fn labeled(key: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            key,
            label: Some(label),
            value: value.to_string(),
        }
    }
}

/// Labels of the secondary and auxiliary fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLabels {
    pub card_nr: &'static str,
    pub date_to: &'static str,
    pub date_birth: &'static str,
    pub date_from: &'static str,
}

impl FieldLabels {
    pub const ENGLISH: FieldLabels = FieldLabels {
        card_nr: "card number",
        date_to: "expiration date",
        date_birth: "birth date",
        date_from: "start date",
    };

    pub const GERMAN: FieldLabels = FieldLabels {
        card_nr: "Kartennummer",
        date_to: "Ablaufdatum",
        date_birth: "Geburtsdatum",
        date_from: "Beginn",
    };

    pub fn for_locale(locale: LabelLocale) -> Self {
        match locale {
            LabelLocale::English => Self::ENGLISH,
            LabelLocale::German => Self::GERMAN,
        }
    }
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self::ENGLISH
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroups {
    pub header: Vec<PassField>,
    pub primary: Vec<PassField>,
    pub secondary: Vec<PassField>,
    pub auxiliary: Vec<PassField>,
}

impl FieldGroups {
    pub fn from_request(request: &PassRequest, labels: &FieldLabels) -> Self {
        Self {
            header: vec![PassField::unlabeled("type", &request.pass_type)],
            primary: vec![PassField::unlabeled("name", &request.name)],
            secondary: vec![
                PassField::labeled("cardNr", labels.card_nr, &request.card_nr),
                PassField::labeled("dateTo", labels.date_to, &request.date_to),
            ],
            auxiliary: vec![
                PassField::labeled("dateBirth", labels.date_birth, &request.date_birth),
                PassField::labeled("dateFrom", labels.date_from, &request.date_from),
            ],
        }
    }

    /// Append every group to the matching array of a pass-style dictionary.
    pub fn apply_to(&self, style: &mut Map<String, Value>) -> Result<(), serde_json::Error> {
        let groups = [
            ("headerFields", &self.header),
            ("primaryFields", &self.primary),
            ("secondaryFields", &self.secondary),
            ("auxiliaryFields", &self.auxiliary),
        ];

        for (key, fields) in groups {
            let slot = style
                .entry(key)
                .or_insert_with(|| Value::Array(Vec::new()));
            if !slot.is_array() {
                tracing::warn!(group = key, "Pass model field group is not an array, replacing it");
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(existing) = slot {
                for field in fields {
                    existing.push(serde_json::to_value(field)?);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PassRequest {
        PassRequest {
            name: "Jane Doe".to_string(),
            card_nr: "12345".to_string(),
            date_from: "01.01.2024".to_string(),
            date_to: "31.12.2024".to_string(),
            date_birth: "01.01.1990".to_string(),
            aztec_code: "XYZ123".to_string(),
            pass_type: "Classic".to_string(),
            image: "aGVsbG8=".to_string(),
        }
    }

    fn keys(fields: &[PassField]) -> Vec<&'static str> {
        fields.iter().map(|f| f.key).collect()
    }

    #[test]
    fn test_group_population_and_order() {
        let groups = FieldGroups::from_request(&request(), &FieldLabels::ENGLISH);

        assert_eq!(groups.header[0].value, "Classic");
        assert_eq!(groups.header[0].label, None);
        assert_eq!(groups.primary[0].value, "Jane Doe");
        assert_eq!(keys(&groups.secondary), ["cardNr", "dateTo"]);
        assert_eq!(keys(&groups.auxiliary), ["dateBirth", "dateFrom"]);
        assert_eq!(groups.secondary[0].label, Some("card number"));
        assert_eq!(groups.secondary[1].label, Some("expiration date"));
        assert_eq!(groups.auxiliary[0].label, Some("birth date"));
        assert_eq!(groups.auxiliary[1].label, Some("start date"));
    }

    #[test]
    fn test_population_is_deterministic() {
        let labels = FieldLabels::default();
        assert_eq!(
            FieldGroups::from_request(&request(), &labels),
            FieldGroups::from_request(&request(), &labels)
        );
    }

    #[test]
    fn test_german_labels() {
        let groups = FieldGroups::from_request(
            &request(),
            &FieldLabels::for_locale(LabelLocale::German),
        );
        assert_eq!(groups.secondary[0].label, Some("Kartennummer"));
        assert_eq!(groups.auxiliary[1].label, Some("Beginn"));
    }

    #[test]
    fn test_apply_appends_after_template_fields() {
        let mut style = serde_json::json!({
            "secondaryFields": [{ "key": "zone", "value": "Core" }]
        })
        .as_object()
        .cloned()
        .unwrap();

        FieldGroups::from_request(&request(), &FieldLabels::ENGLISH)
            .apply_to(&mut style)
            .unwrap();

        let secondary = style["secondaryFields"].as_array().unwrap();
        let keys: Vec<_> = secondary.iter().map(|f| f["key"].as_str().unwrap()).collect();
        assert_eq!(keys, ["zone", "cardNr", "dateTo"]);
        assert_eq!(style["headerFields"][0], serde_json::json!({ "key": "type", "value": "Classic" }));
    }

    #[test]
    fn test_apply_replaces_non_array_group() {
        let mut style = Map::new();
        style.insert("primaryFields".to_string(), Value::String("bogus".to_string()));

        FieldGroups::from_request(&request(), &FieldLabels::ENGLISH)
            .apply_to(&mut style)
            .unwrap();

        assert_eq!(style["primaryFields"][0]["value"], "Jane Doe");
    }
}
