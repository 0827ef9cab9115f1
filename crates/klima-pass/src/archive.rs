use std::io::Write;

use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::PassError;
use crate::manifest::MANIFEST_FILE;
use crate::PassFiles;

pub const SIGNATURE_FILE: &str = "signature";

/// Write the pass files, the manifest and its signature into a `.pkpass` zip.
pub fn write_pkpass(
    files: &PassFiles,
    manifest: &[u8],
    signature: &[u8],
) -> Result<Vec<u8>, PassError> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let entries = files
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
            .chain([(MANIFEST_FILE, manifest), (SIGNATURE_FILE, signature)]);

        for (name, data) in entries {
            zip.start_file(name, options)?;
            zip.write_all(data)?;
        }

        zip.finish()?;
    }

    Ok(buffer)
}
