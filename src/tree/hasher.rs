//! Content digests for stored items

use crate::error::StorageError;
use md5::{Digest, Md5};
use std::fs::File;
use std::io;
use std::path::Path;

/// Compute the md5 digest of a file, streamed, as lowercase hex.
pub fn md5_digest(path: &Path) -> Result<String, StorageError> {
    let mut file = File::open(path)
        .map_err(|e| StorageError::io(format!("Failed to open {:?} for digest", path), e))?;
    let mut hasher = Md5::new();
    io::copy(&mut file, &mut hasher)
        .map_err(|e| StorageError::io(format!("Failed to read {:?} for digest", path), e))?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
pub(crate) fn md5_bytes(content: &[u8]) -> String {
    hex::encode(Md5::digest(content))
}
