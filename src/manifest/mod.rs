//! Dependency Manifest
//!
//! The generated manifest read and written by the build code generator. A
//! manifest records the module-to-dependency mapping derived from the
//! requirements list, plus an integrity digest over the inputs it was
//! generated from. The digest is what lets the synchronization check detect
//! a stale manifest without re-running the generator.

pub mod integrity;

use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Repository the generator resolves dependencies against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name as declared in the build configuration.
    pub name: String,
}

/// Manifest payload: the data the generator derives from the requirements list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Mapping from source module name to the dependency providing it.
    ///
    /// Kept sorted so generated output is deterministic.
    #[serde(default)]
    pub modules_mapping: BTreeMap<String, String>,

    /// Repository block, present when the generator targets a named repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

/// On-disk manifest document: payload plus the recorded integrity digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    /// Manifest payload; absent in a document that only records a digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Manifest>,

    /// Hex digest over the generator hash and requirements contents.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub integrity: String,
}

impl ManifestFile {
    /// Wrap a payload in a document with no digest recorded yet.
    pub fn new(manifest: Manifest) -> Self {
        ManifestFile {
            manifest: Some(manifest),
            integrity: String::new(),
        }
    }

    /// Read and decode a manifest document from disk.
    pub fn decode(path: &Path) -> Result<Self, SyncError> {
        let file = File::open(path).map_err(|e| SyncError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_yaml::from_reader(file).map_err(|e| SyncError::Decode {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Recompute the digest from the two input streams, record it, and write
    /// the document as YAML.
    pub fn encode<W, G, R>(
        &mut self,
        writer: W,
        generator_hash: &mut G,
        requirements: &mut R,
    ) -> Result<(), SyncError>
    where
        W: Write,
        G: Read,
        R: Read,
    {
        self.integrity = integrity::digest(generator_hash, requirements)?;
        serde_yaml::to_writer(writer, self).map_err(|e| SyncError::Encode(e.to_string()))
    }

    /// Recompute the digest from the two input streams and compare it to the
    /// recorded one.
    pub fn verify_integrity<G, R>(
        &self,
        generator_hash: &mut G,
        requirements: &mut R,
    ) -> Result<bool, SyncError>
    where
        G: Read,
        R: Read,
    {
        let computed = integrity::digest(generator_hash, requirements)?;
        Ok(computed == self.integrity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_manifest() -> Manifest {
        let mut modules_mapping = BTreeMap::new();
        modules_mapping.insert("requests".to_string(), "requests".to_string());
        modules_mapping.insert("yaml".to_string(), "pyyaml".to_string());
        Manifest {
            modules_mapping,
            repository: Some(Repository {
                name: "deps".to_string(),
            }),
        }
    }

    #[test]
    fn test_decode_tolerates_header_comments() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("manifest.yaml");
        fs::write(
            &path,
            "# generated file, do not edit\nmanifest:\n  modules_mapping:\n    yaml: pyyaml\nintegrity: abc123\n",
        )
        .unwrap();

        let decoded = ManifestFile::decode(&path).unwrap();
        assert_eq!(decoded.integrity, "abc123");
        let manifest = decoded.manifest.unwrap();
        assert_eq!(manifest.modules_mapping["yaml"], "pyyaml");
        assert!(manifest.repository.is_none());
    }

    #[test]
    fn test_decode_missing_file_is_open_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing.yaml");
        let err = ManifestFile::decode(&path).unwrap_err();
        assert!(matches!(err, SyncError::Open { .. }));
    }

    #[test]
    fn test_encode_records_digest_and_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("manifest.yaml");

        let mut document = ManifestFile::new(sample_manifest());
        let mut out = Vec::new();
        document
            .encode(&mut out, &mut "hash".as_bytes(), &mut "reqs".as_bytes())
            .unwrap();
        assert!(!document.integrity.is_empty());

        fs::write(&path, &out).unwrap();
        let decoded = ManifestFile::decode(&path).unwrap();
        assert_eq!(decoded, document);
    }

    #[test]
    fn test_verify_integrity_against_recorded_digest() {
        let mut document = ManifestFile::new(sample_manifest());
        let mut out = Vec::new();
        document
            .encode(&mut out, &mut "hash".as_bytes(), &mut "reqs".as_bytes())
            .unwrap();

        let valid = document
            .verify_integrity(&mut "hash".as_bytes(), &mut "reqs".as_bytes())
            .unwrap();
        assert!(valid);

        let valid = document
            .verify_integrity(&mut "hash".as_bytes(), &mut "reqs changed".as_bytes())
            .unwrap();
        assert!(!valid);
    }
}
