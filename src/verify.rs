//! Manifest Synchronization Check
//!
//! Recomputes the integrity digest over the generator hash and requirements
//! inputs and compares it against the digest recorded in the manifest.
//! Setup failures (decode, open, digest computation) are hard errors; a
//! digest mismatch is the soft `SyncStatus::Stale` outcome so callers can
//! still report the out-of-date file's real location and how to fix it.

use crate::error::SyncError;
use crate::manifest::ManifestFile;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of a synchronization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// The recorded digest matches the inputs.
    Current,
    /// The recorded digest diverges from the inputs. `manifest_path` is the
    /// symlink-evaluated location of the out-of-date file.
    Stale { manifest_path: PathBuf },
}

impl SyncStatus {
    /// True when the manifest matched its inputs.
    pub fn is_current(&self) -> bool {
        matches!(self, SyncStatus::Current)
    }
}

/// Check that the manifest at `manifest_path` is in sync with its inputs.
///
/// Input file handles are owned values scoped to this call, so they are
/// closed on every exit path, including early errors.
pub fn check_sync(
    manifest_path: &Path,
    generator_hash_path: &Path,
    requirements_path: &Path,
) -> Result<SyncStatus, SyncError> {
    let manifest = ManifestFile::decode(manifest_path)?;
    if manifest.integrity.is_empty() {
        return Err(SyncError::MissingIntegrity {
            path: manifest_path.to_path_buf(),
        });
    }

    let mut generator_hash = open(generator_hash_path)?;
    let mut requirements = open(requirements_path)?;

    let valid = manifest.verify_integrity(&mut generator_hash, &mut requirements)?;
    if valid {
        debug!(manifest = %manifest_path.display(), "manifest digest matches inputs");
        return Ok(SyncStatus::Current);
    }

    let manifest_realpath = manifest_path.canonicalize().map_err(|e| SyncError::Resolve {
        path: manifest_path.display().to_string(),
        source: e,
    })?;
    debug!(manifest = %manifest_realpath.display(), "manifest digest diverges from inputs");
    Ok(SyncStatus::Stale {
        manifest_path: manifest_realpath,
    })
}

fn open(path: &Path) -> Result<File, SyncError> {
    File::open(path).map_err(|e| SyncError::Open {
        path: path.to_path_buf(),
        source: e,
    })
}
