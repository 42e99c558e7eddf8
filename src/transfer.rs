//! Item transfer: placing items into a collection's store and releasing them

use crate::error::StorageError;
use crate::tree::{hasher, path, walker};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How an item reaches the store root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Copy the file or directory tree
    #[default]
    Copy,
    /// Move (rename) the source into the store
    Move,
    /// Leave the source in place and store a symbolic link to it
    Link,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
            TransferMode::Link => "link",
        };
        f.write_str(name)
    }
}

/// Where an item should end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPlan {
    /// Transfer into `<store>/<base><suffixes>`
    Store { store: PathBuf, base: String },
    /// Record the caller's absolute path; nothing is transferred
    Record,
}

impl ItemPlan {
    pub fn for_store(store: Option<&Path>, base: impl Into<String>) -> Self {
        match store {
            Some(store) => ItemPlan::Store {
                store: store.to_path_buf(),
                base: base.into(),
            },
            None => ItemPlan::Record,
        }
    }
}

/// Result of placing an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    pub path: PathBuf,
    pub size: u64,
    pub md5: Option<String>,
}

/// Place `source` according to `plan`.
///
/// Size (recursive for directories) and, when `digest` is set and the source
/// is a regular file, md5 are computed from the source before it is moved.
pub fn place_item(
    source: &Path,
    plan: &ItemPlan,
    mode: TransferMode,
    digest: bool,
) -> Result<PlacedItem, StorageError> {
    let source = path::absolutize(source)?;
    if fs::symlink_metadata(&source).is_err() {
        return Err(StorageError::ItemNotFound(source));
    }
    let source = path::canonicalize_path(&source)?;

    let size = walker::disk_usage(&source)?;
    let md5 = if digest && source.is_file() {
        Some(hasher::md5_digest(&source)?)
    } else {
        None
    };

    let dest = match plan {
        ItemPlan::Record => {
            debug!(item = %source.display(), "Recording item in place");
            return Ok(PlacedItem {
                path: source,
                size,
                md5,
            });
        }
        ItemPlan::Store { store, base } => {
            store.join(format!("{}{}", base, path::all_suffixes(&source)))
        }
    };

    if fs::symlink_metadata(&dest).is_ok() {
        return Err(StorageError::AlreadyExists(dest));
    }

    match mode {
        TransferMode::Copy => copy_item(&source, &dest)?,
        TransferMode::Move => move_item(&source, &dest)?,
        TransferMode::Link => link_item(&source, &dest)?,
    }
    info!(source = %source.display(), dest = %dest.display(), %mode, "Transferred item");

    Ok(PlacedItem {
        path: dest,
        size,
        md5,
    })
}

fn copy_item(source: &Path, dest: &Path) -> Result<(), StorageError> {
    if source.is_dir() {
        walker::copy_tree(source, dest)
    } else {
        fs::copy(source, dest)
            .map(|_| ())
            .map_err(|e| StorageError::io(format!("Failed to copy {:?} to {:?}", source, dest), e))
    }
}

fn move_item(source: &Path, dest: &Path) -> Result<(), StorageError> {
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }
    // Rename fails across filesystems; fall back to copy then remove.
    copy_item(source, dest)?;
    release_item(source)
}

#[cfg(unix)]
fn link_item(source: &Path, dest: &Path) -> Result<(), StorageError> {
    std::os::unix::fs::symlink(source, dest)
        .map_err(|e| StorageError::io(format!("Failed to link {:?} to {:?}", dest, source), e))
}

#[cfg(not(unix))]
fn link_item(_source: &Path, dest: &Path) -> Result<(), StorageError> {
    Err(StorageError::InvalidPath(format!(
        "Symbolic links are not supported on this platform: {}",
        dest.display()
    )))
}

/// Remove a stored item: a file, a symbolic link (never its target), or a
/// directory tree. A missing path is not an error.
pub fn release_item(item: &Path) -> Result<(), StorageError> {
    let metadata = match fs::symlink_metadata(item) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(StorageError::io(format!("Failed to stat {:?}", item), e)),
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(item)
    } else {
        fs::remove_file(item)
    };
    result.map_err(|e| StorageError::io(format!("Failed to remove {:?}", item), e))?;
    info!(item = %item.display(), "Released item");
    Ok(())
}

/// A stored item moved aside while its replacement is placed
#[derive(Debug)]
pub struct StashedItem {
    original: PathBuf,
    stash: PathBuf,
}

impl StashedItem {
    /// Move `item` to a sibling `.replaced` path. A missing item has nothing
    /// to set aside and yields `None`.
    pub fn stash(item: &Path) -> Result<Option<Self>, StorageError> {
        match fs::symlink_metadata(item) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(item = %item.display(), "Replaced item already gone");
                return Ok(None);
            }
            Err(e) => return Err(StorageError::io(format!("Failed to stat {:?}", item), e)),
        }
        let mut name = item.as_os_str().to_os_string();
        name.push(".replaced");
        let stash = PathBuf::from(name);
        fs::rename(item, &stash)
            .map_err(|e| StorageError::io(format!("Failed to set aside {:?}", item), e))?;
        Ok(Some(Self {
            original: item.to_path_buf(),
            stash,
        }))
    }

    /// Put the stashed item back where it was.
    pub fn restore(self) -> Result<(), StorageError> {
        fs::rename(&self.stash, &self.original).map_err(|e| {
            StorageError::io(format!("Failed to restore {:?}", self.original), e)
        })
    }

    /// Drop the stashed item for good.
    pub fn discard(self) -> Result<(), StorageError> {
        release_item(&self.stash)
    }
}
