//! Filesystem walks over stored items: recursive size and recursive copy

use crate::error::StorageError;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn walk_error(root: &Path, e: walkdir::Error) -> StorageError {
    StorageError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to walk {:?}: {}", root, e),
    ))
}

/// Size of a file, or the summed size of every regular file under a directory.
///
/// Symbolic links inside directories are not followed.
pub fn disk_usage(path: &Path) -> Result<u64, StorageError> {
    let metadata = fs::metadata(path)
        .map_err(|e| StorageError::io(format!("Failed to read metadata for {:?}", path), e))?;
    if metadata.is_file() {
        return Ok(metadata.len());
    }

    let mut total = 0;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(|e| walk_error(path, e))?;
        if entry.file_type().is_file() {
            let metadata = entry.metadata().map_err(|e| walk_error(path, e))?;
            total += metadata.len();
        }
    }
    Ok(total)
}

/// Recursively copy the directory `source` to `dest` (which must not exist).
///
/// Symbolic links are recreated as links on unix rather than followed.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<(), StorageError> {
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| walk_error(source, e))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| StorageError::InvalidPath(e.to_string()))?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| StorageError::io(format!("Failed to create {:?}", target), e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| {
                StorageError::io(format!("Failed to copy {:?} to {:?}", entry.path(), target), e)
            })?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<(), StorageError> {
    let points_to = fs::read_link(link)
        .map_err(|e| StorageError::io(format!("Failed to read link {:?}", link), e))?;
    std::os::unix::fs::symlink(&points_to, target)
        .map_err(|e| StorageError::io(format!("Failed to create link {:?}", target), e))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<(), StorageError> {
    fs::copy(link, target)
        .map(|_| ())
        .map_err(|e| StorageError::io(format!("Failed to copy {:?} to {:?}", link, target), e))
}
