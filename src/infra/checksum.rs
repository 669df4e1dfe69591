//! Artifact checksums
//!
//! SHA-512 digests of published artifacts, streamed from disk.

use sha2::{Digest, Sha512};
use std::fs::File;
use std::path::Path;

use crate::error::ChecksumError;

/// Compute the SHA-512 of a file as lowercase hex
pub fn sha512_file(path: &Path) -> Result<String, ChecksumError> {
    let mut file = File::open(path).map_err(|e| ChecksumError::OpenError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut hasher = Sha512::new();
    std::io::copy(&mut file, &mut hasher).map_err(|e| ChecksumError::ReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    Ok(hex::encode(hasher.finalize()))
}

/// Compute the SHA-512 of in-memory data as lowercase hex
pub fn sha512_bytes(data: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
