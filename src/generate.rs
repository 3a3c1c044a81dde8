//! Manifest Regeneration
//!
//! Writes a fresh manifest with a recomputed integrity digest and an in-file
//! header telling readers the file is generated and how to regenerate it.
//! Output is deterministic for identical inputs: the module mapping is kept
//! sorted and the document layout is fixed.

use crate::error::SyncError;
use crate::manifest::{Manifest, ManifestFile};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Update command recorded in the header when the caller does not name one.
pub const DEFAULT_UPDATE_COMMAND: &str = "depsync generate";

/// Write `payload` to `manifest_path` with a digest computed over the
/// generator hash and requirements files.
pub fn write_manifest(
    payload: &Manifest,
    manifest_path: &Path,
    generator_hash_path: &Path,
    requirements_path: &Path,
    update_command: Option<&str>,
) -> Result<(), SyncError> {
    let mut generator_hash = open(generator_hash_path)?;
    let mut requirements = open(requirements_path)?;

    let mut document = ManifestFile::new(payload.clone());
    let mut body = Vec::new();
    document.encode(&mut body, &mut generator_hash, &mut requirements)?;

    let mut contents = header(update_command.unwrap_or(DEFAULT_UPDATE_COMMAND)).into_bytes();
    contents.extend_from_slice(&body);
    std::fs::write(manifest_path, contents).map_err(|e| {
        SyncError::Encode(format!("writing {}: {}", manifest_path.display(), e))
    })?;

    info!(
        manifest = %manifest_path.display(),
        integrity = %document.integrity,
        "wrote manifest"
    );
    Ok(())
}

fn header(update_command: &str) -> String {
    format!(
        "# THIS FILE IS GENERATED. DO NOT EDIT IT BY HAND.\n\
         #\n\
         # It records the dependency mapping derived from the requirements list,\n\
         # together with an integrity digest over the inputs it was generated from.\n\
         # To update it, run:\n\
         #   {}\n",
        update_command
    )
}

fn open(path: &Path) -> Result<File, SyncError> {
    File::open(path).map_err(|e| SyncError::Open {
        path: path.to_path_buf(),
        source: e,
    })
}
