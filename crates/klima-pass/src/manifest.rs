//! `manifest.json`: SHA-1 digest of every file in the pass.
//!
//! The signature covers the manifest only, so the manifest has to list each
//! archived file except itself and the signature.

use std::collections::BTreeMap;

use sha1::{Digest, Sha1};

use crate::PassFiles;

pub const MANIFEST_FILE: &str = "manifest.json";

pub fn file_digest(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

pub fn build_manifest(files: &PassFiles) -> Result<Vec<u8>, serde_json::Error> {
    let digests: BTreeMap<&str, String> = files
        .iter()
        .map(|(name, data)| (name.as_str(), file_digest(data)))
        .collect();
    serde_json::to_vec_pretty(&digests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_digest_is_lowercase_sha1_hex() {
        assert_eq!(
            file_digest(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_manifest_lists_every_file() {
        let mut files = PassFiles::new();
        files.insert("pass.json".to_string(), b"{}".to_vec());
        files.insert("de.lproj/pass.strings".to_string(), b"abc".to_vec());

        let manifest: BTreeMap<String, String> =
            serde_json::from_slice(&build_manifest(&files).unwrap()).unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest["pass.json"], file_digest(b"{}"));
        assert_eq!(
            manifest["de.lproj/pass.strings"],
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }
}
