//! Integrity Digests
//!
//! Computes the digest recorded in a manifest: a single SHA-256 over the
//! generator hash stream followed by the requirements stream, hex-encoded.
//! Callers treat the scheme as opaque; everything else in the crate only
//! compares digests for equality.

use crate::error::SyncError;
use sha2::{Digest, Sha256};
use std::io::Read;

/// Compute the integrity digest over the generator hash and requirements streams.
///
/// Both streams are drained in full; the generator hash bytes are fed to the
/// hasher before the requirements bytes.
pub fn digest<G: Read, R: Read>(
    generator_hash: &mut G,
    requirements: &mut R,
) -> Result<String, SyncError> {
    let mut hasher = Sha256::new();
    std::io::copy(generator_hash, &mut hasher).map_err(SyncError::Digest)?;
    std::io::copy(requirements, &mut hasher).map_err(SyncError::Digest)?;
    Ok(hex::encode(hasher.finalize()))
}
