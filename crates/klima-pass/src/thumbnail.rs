use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::PassError;
use crate::PassFiles;

pub const THUMBNAIL_FILE: &str = "thumbnail.png";
pub const THUMBNAIL_2X_FILE: &str = "thumbnail@2x.png";

/// Decoded thumbnail image.
///
/// The same bytes are used for the standard and the double-density asset; no
/// resampling happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail(Vec<u8>);

impl Thumbnail {
    pub fn from_base64(encoded: &str) -> Result<Self, PassError> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| PassError::InvalidImage(format!("not valid base64: {}", e)))?;
        if bytes.is_empty() {
            return Err(PassError::InvalidImage("decoded image is empty".to_string()));
        }
        Ok(Self(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Insert both density variants, replacing any thumbnail from the pass model.
    pub fn attach(&self, files: &mut PassFiles) {
        files.insert(THUMBNAIL_FILE.to_string(), self.0.clone());
        files.insert(THUMBNAIL_2X_FILE.to_string(), self.0.clone());
    }
}
