//! Error Types
//!
//! Crate-wide error taxonomy. Missing environment, failed location
//! resolution, file I/O, and manifest decoding are all hard errors; a stale
//! manifest is not an error but a `SyncStatus` value returned by the
//! verifier, so callers can still report the file's real location.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, decoding, generating, or verifying a manifest.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Required environment variable is unset or empty.
    #[error("{0} must be set")]
    MissingEnv(String),

    /// A declared location could not be mapped to a usable filesystem path.
    #[error("failed to resolve location {path:?}: {source}")]
    Resolve {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened for reading.
    #[error("opening {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file did not decode as valid manifest data.
    #[error("decoding manifest file {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The manifest could not be serialized or written.
    #[error("encoding manifest file: {0}")]
    Encode(String),

    /// Reading an input stream while computing the digest failed.
    #[error("computing integrity digest: {0}")]
    Digest(#[source] std::io::Error),

    /// The manifest carries no integrity digest.
    #[error("failed to find the manifest integrity digest in {path:?}")]
    MissingIntegrity { path: PathBuf },

    /// The manifest digest no longer matches its inputs.
    ///
    /// Raised by the CLI surface only; the library reports staleness through
    /// `verify::SyncStatus` instead.
    #[error("{path:?} is out-of-date. Follow the update instructions in that file to resolve this")]
    OutOfDate { path: PathBuf },
}
