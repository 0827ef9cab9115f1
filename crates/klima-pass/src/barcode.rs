use serde::Serialize;

/// Text encoding declared for the barcode message.
pub const BARCODE_MESSAGE_ENCODING: &str = "iso-8859-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarcodeFormat {
    #[serde(rename = "PKBarcodeFormatAztec")]
    Aztec,
}

/// Barcode entry of `pass.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    pub format: BarcodeFormat,
    pub message: String,
    pub message_encoding: &'static str,
}

impl Barcode {
    pub fn aztec(message: impl Into<String>) -> Self {
        Self {
            format: BarcodeFormat::Aztec,
            message: message.into(),
            message_encoding: BARCODE_MESSAGE_ENCODING,
        }
    }

    /// Whether every character of the message fits the declared single-byte encoding.
    pub fn is_latin1(&self) -> bool {
        self.message.chars().all(|c| (c as u32) <= 0xFF)
    }
}
