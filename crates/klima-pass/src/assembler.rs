//! Pass assembly.
//!
//! Merges a validated request into a clone of the pass-model template. The
//! template itself is shared between requests and never modified.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use klima_core::PassRequest;
use serde_json::{Map, Value};

use crate::barcode::Barcode;
use crate::error::PassError;
use crate::expiration::{expiration_instant, format_expiration};
use crate::fields::{FieldGroups, FieldLabels};
use crate::serial::serial_number;
use crate::template::{PassTemplate, TemplateError};
use crate::thumbnail::Thumbnail;
use crate::PassFiles;

/// An unsigned pass: its definition plus every asset file.
#[derive(Debug, Clone)]
pub struct PassContents {
    pub serial_number: String,
    pub pass_json: Value,
    pub files: PassFiles,
}

impl PassContents {
    pub fn style(&self) -> Option<&str> {
        crate::template::PASS_STYLES
            .iter()
            .copied()
            .find(|style| self.pass_json.get(*style).is_some())
    }
}

#[derive(Debug, Clone)]
pub struct PassAssembler {
    template: Arc<PassTemplate>,
    labels: FieldLabels,
}

impl PassAssembler {
    pub fn new(template: Arc<PassTemplate>, labels: FieldLabels) -> Self {
        Self { template, labels }
    }

    pub fn template(&self) -> &PassTemplate {
        &self.template
    }

    pub fn labels(&self) -> &FieldLabels {
        &self.labels
    }

    /// Build the pass for `request`, issued at `issued_at`.
    ///
    /// Malformed input (valid-until date, image) is rejected before any
    /// template data is copied.
    pub fn assemble(
        &self,
        request: &PassRequest,
        issued_at: DateTime<Utc>,
    ) -> Result<PassContents, PassError> {
        let expires_at = expiration_instant(&request.date_to)?;
        let thumbnail = Thumbnail::from_base64(&request.image)?;

        let barcode = Barcode::aztec(request.aztec_code.as_str());
        if !barcode.is_latin1() {
            tracing::warn!(
                encoding = barcode.message_encoding,
                "Barcode message contains characters outside its declared encoding"
            );
        }

        let serial = serial_number(&request.name, issued_at);
        let mut pass_json: Map<String, Value> = self.template.pass_json().clone();

        let style = self.template.style();
        let Some(Value::Object(style_dict)) = pass_json.get_mut(style) else {
            return Err(TemplateError::StyleNotObject(style).into());
        };
        FieldGroups::from_request(request, &self.labels).apply_to(style_dict)?;

        let barcode = serde_json::to_value(&barcode)?;
        pass_json.insert("serialNumber".to_string(), Value::String(serial.clone()));
        pass_json.insert("barcodes".to_string(), Value::Array(vec![barcode.clone()]));
        pass_json.insert("barcode".to_string(), barcode);
        pass_json.insert(
            "expirationDate".to_string(),
            Value::String(format_expiration(&expires_at)),
        );

        let mut files = self.template.assets().clone();
        thumbnail.attach(&mut files);

        tracing::debug!(
            serial_number = %serial,
            style,
            files = files.len(),
            "Pass assembled"
        );

        Ok(PassContents {
            serial_number: serial,
            pass_json: Value::Object(pass_json),
            files,
        })
    }
}
