//! Runtime Location Resolution
//!
//! Maps declared file locations (handed to the check through environment
//! variables by the surrounding build harness) to filesystem paths usable by
//! the current process. An absolute declared path is used as given; a
//! relative one is resolved beneath the optional `DEPSYNC_LOCATION_ROOT`.

use crate::error::SyncError;
use std::path::{Path, PathBuf};

/// Environment variable naming the root that relative declared locations are
/// resolved beneath.
pub const LOCATION_ROOT_ENV: &str = "DEPSYNC_LOCATION_ROOT";

/// Resolve a declared location to a filesystem path the process can use.
///
/// The resolved path must exist; a failure carries the originating declared
/// path string and the underlying cause.
pub fn resolve_location(declared: &str) -> Result<PathBuf, SyncError> {
    let root = std::env::var(LOCATION_ROOT_ENV)
        .ok()
        .filter(|r| !r.is_empty());
    resolve_with_root(declared, root.as_deref().map(Path::new))
}

/// Read an environment variable and resolve its value as a declared location.
///
/// An unset or empty variable is an error naming the variable.
pub fn resolve_env_path(var: &str) -> Result<PathBuf, SyncError> {
    let declared = std::env::var(var).unwrap_or_default();
    if declared.is_empty() {
        return Err(SyncError::MissingEnv(var.to_string()));
    }
    resolve_location(&declared)
}

fn resolve_with_root(declared: &str, root: Option<&Path>) -> Result<PathBuf, SyncError> {
    let declared_path = Path::new(declared);
    let resolved = match root {
        Some(root) if declared_path.is_relative() => root.join(declared_path),
        _ => declared_path.to_path_buf(),
    };
    match resolved.metadata() {
        Ok(_) => Ok(resolved),
        Err(e) => Err(SyncError::Resolve {
            path: declared.to_string(),
            source: e,
        }),
    }
}
