//! Pass-model template.
//!
//! A pass model is a directory holding the static `pass.json` layout and the
//! image assets every issued pass shares. It is read once at startup and is
//! immutable afterwards; requests only ever clone from it.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::{PassFiles, PASS_JSON_FILE};

/// Top-level `pass.json` keys naming the pass style.
pub const PASS_STYLES: [&str; 5] = [
    "boardingPass",
    "coupon",
    "eventTicket",
    "generic",
    "storeCard",
];

/// Files produced during packaging; copies found in a model are ignored.
const GENERATED_FILES: [&str; 2] = ["manifest.json", "signature"];

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pass model {0} has no pass.json")]
    MissingPassJson(PathBuf),

    #[error("invalid pass.json: {0}")]
    InvalidPassJson(String),

    #[error("pass.json declares no pass style (expected one of {})", PASS_STYLES.join(", "))]
    NoPassStyle,

    #[error("pass.json declares several pass styles: {}", .0.join(", "))]
    MultiplePassStyles(Vec<&'static str>),

    #[error("pass style '{0}' is not an object")]
    StyleNotObject(&'static str),
}

#[derive(Debug, Clone)]
pub struct PassTemplate {
    pass_json: Map<String, Value>,
    style: &'static str,
    assets: PassFiles,
}

impl PassTemplate {
    /// Load a pass model directory.
    ///
    /// Regular files become assets under their own name; files inside
    /// `*.lproj` directories are kept as `xx.lproj/<file>`. Hidden files and
    /// other subdirectories are skipped.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        let mut pass_json = None;
        let mut assets = PassFiles::new();

        for (name, path) in list_dir(dir)? {
            if path.is_dir() {
                if name.ends_with(".lproj") {
                    for (file_name, file_path) in list_dir(&path)? {
                        if file_path.is_file() {
                            assets.insert(format!("{}/{}", name, file_name), read(&file_path)?);
                        }
                    }
                } else {
                    tracing::debug!(path = %path.display(), "Skipping directory in pass model");
                }
                continue;
            }

            if name == PASS_JSON_FILE {
                pass_json = Some(read(&path)?);
            } else if GENERATED_FILES.contains(&name.as_str()) {
                tracing::debug!(file = %name, "Ignoring generated file in pass model");
            } else {
                assets.insert(name, read(&path)?);
            }
        }

        let pass_json = pass_json.ok_or_else(|| TemplateError::MissingPassJson(dir.to_path_buf()))?;
        let pass_json: Value = serde_json::from_slice(&pass_json)
            .map_err(|e| TemplateError::InvalidPassJson(e.to_string()))?;

        let template = Self::from_parts(pass_json, assets)?;
        tracing::info!(
            path = %dir.display(),
            style = template.style,
            assets = template.assets.len(),
            "Pass model loaded"
        );
        Ok(template)
    }

    pub fn from_parts(pass_json: Value, assets: PassFiles) -> Result<Self, TemplateError> {
        let Value::Object(pass_json) = pass_json else {
            return Err(TemplateError::InvalidPassJson(
                "top level is not an object".to_string(),
            ));
        };

        let styles: Vec<&'static str> = PASS_STYLES
            .iter()
            .copied()
            .filter(|style| pass_json.contains_key(*style))
            .collect();
        let style = match styles.as_slice() {
            [] => return Err(TemplateError::NoPassStyle),
            [style] => *style,
            _ => return Err(TemplateError::MultiplePassStyles(styles)),
        };
        if !pass_json[style].is_object() {
            return Err(TemplateError::StyleNotObject(style));
        }

        Ok(Self {
            pass_json,
            style,
            assets,
        })
    }

    pub fn pass_json(&self) -> &Map<String, Value> {
        &self.pass_json
    }

    pub fn style(&self) -> &'static str {
        self.style
    }

    pub fn assets(&self) -> &PassFiles {
        &self.assets
    }

    pub fn pass_type_identifier(&self) -> Option<&str> {
        self.pass_json
            .get("passTypeIdentifier")
            .and_then(Value::as_str)
    }
}

fn list_dir(dir: &Path) -> Result<Vec<(String, PathBuf)>, TemplateError> {
    let io_err = |source| TemplateError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        entries.push((name, entry.path()));
    }
    entries.sort();
    Ok(entries)
}

fn read(path: &Path) -> Result<Vec<u8>, TemplateError> {
    fs::read(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
