//! Path helpers for item locations

use crate::error::StorageError;
use std::path::{Path, PathBuf};

/// Absolute, symlink-resolved form of an existing path.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, StorageError> {
    dunce::canonicalize(path).map_err(|e| {
        StorageError::InvalidPath(format!("Failed to canonicalize {}: {}", path.display(), e))
    })
}

/// Absolute form of a path without touching the filesystem beyond the
/// current directory lookup. Used where the path may not exist yet.
pub fn absolutize(path: &Path) -> Result<PathBuf, StorageError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| StorageError::io("Failed to read current directory", e))?;
    Ok(cwd.join(path))
}

/// Every extension of the file name, concatenated: `reads.fastq.gz` -> `.fastq.gz`.
///
/// A leading dot (hidden file) does not start an extension.
pub fn all_suffixes(path: &Path) -> String {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return String::new(),
    };
    let trimmed = name.trim_start_matches('.');
    match trimmed.find('.') {
        Some(index) if index + 1 < trimmed.len() => trimmed[index..].to_string(),
        _ => String::new(),
    }
}
