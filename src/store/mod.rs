//! Asset collection store
//!
//! An asset collection is one forest persisted as one YAML file, optionally
//! paired with a store root under which transferred items are kept.

pub mod persistence;

pub use persistence::{init_collection, is_collection_file, SIGNATURE_PREFIX};

use crate::tree::Forest;
use std::path::{Path, PathBuf};

/// One loaded asset collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCollection {
    /// Backing description file
    pub path: PathBuf,
    /// Store root for transferred items; `None` records caller paths as-is
    pub store: Option<PathBuf>,
    pub forest: Forest,
}

impl AssetCollection {
    /// An empty collection bound to `path`
    pub fn new(path: PathBuf, store: Option<PathBuf>) -> Self {
        Self {
            path,
            store,
            forest: Forest::new(),
        }
    }

    /// Whether `item` lives under this collection's store root.
    ///
    /// Only such items are owned by the collection and may be released.
    pub fn owns_item(&self, item: &Path) -> bool {
        match &self.store {
            Some(store) => item.starts_with(store) && item != store.as_path(),
            None => false,
        }
    }
}
