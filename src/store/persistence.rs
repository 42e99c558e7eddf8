//! Persistence layer for asset collections
//!
//! File layout: one signature line, then a YAML document
//! `{ store?: path, assets: { <id>: { ...node fields, parent?: <id> } } }`.
//! Parent edges live in the forest in memory and are projected into the
//! per-node `parent` field only when writing.

use crate::error::StorageError;
use crate::store::AssetCollection;
use crate::tree::path::absolutize;
use crate::tree::{AssetNode, Forest};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// First-line prefix identifying an asset description file
pub const SIGNATURE_PREFIX: &str = "# asset";

fn signature_line() -> String {
    format!("{} v{}", SIGNATURE_PREFIX, env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Serialize, Deserialize)]
struct CollectionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    store: Option<PathBuf>,
    #[serde(default)]
    assets: BTreeMap<NodeId, NodeDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeDocument {
    #[serde(flatten)]
    node: AssetNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<NodeId>,
}

/// True iff the first line of `path` carries the asset signature.
///
/// Unreadable files are not collection files.
pub fn is_collection_file(path: &Path) -> bool {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let mut first_line = String::new();
    match BufReader::new(file).read_line(&mut first_line) {
        Ok(_) => first_line.starts_with(SIGNATURE_PREFIX),
        Err(_) => false,
    }
}

impl AssetCollection {
    /// Load a collection file into memory.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let content = fs::read_to_string(path)
            .map_err(|e| StorageError::io(format!("Failed to read {:?}", path), e))?;

        let (first_line, body) = content.split_once('\n').unwrap_or((content.as_str(), ""));
        if !first_line.starts_with(SIGNATURE_PREFIX) {
            return Err(StorageError::Format(path.to_path_buf()));
        }

        let parse_error = |message: String| StorageError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let document: CollectionDocument =
            serde_yaml::from_str(body).map_err(|e| parse_error(e.to_string()))?;

        let mut forest = Forest::new();
        let mut edges = Vec::new();
        for (id, entry) in document.assets {
            if let Some(parent) = entry.parent {
                edges.push((id.clone(), parent));
            }
            forest.insert(id, entry.node);
        }
        for (child, parent) in edges {
            forest
                .attach(&child, &parent)
                .map_err(|e| parse_error(format!("invalid parent of {}: {}", child, e)))?;
        }

        debug!(path = %path.display(), nodes = forest.len(), "Loaded asset collection");
        Ok(Self {
            path: path.to_path_buf(),
            store: document.store,
            forest,
        })
    }

    /// Serialize the collection: signature line followed by the YAML document.
    pub fn to_file_string(&self) -> Result<String, StorageError> {
        let assets = self
            .forest
            .iter()
            .map(|(id, node)| {
                (
                    id.clone(),
                    NodeDocument {
                        node: node.clone(),
                        parent: self.forest.parent(id).cloned(),
                    },
                )
            })
            .collect();
        let document = CollectionDocument {
            store: self.store.clone(),
            assets,
        };
        let yaml = serde_yaml::to_string(&document).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to serialize asset collection: {}", e),
            ))
        })?;
        Ok(format!("{}\n{}", signature_line(), yaml))
    }

    /// Save to the collection's own path.
    pub fn save(&self) -> Result<(), StorageError> {
        self.save_to(&self.path)
    }

    /// Save atomically: write a sibling `.tmp` file, then rename it over `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        let serialized = self.to_file_string()?;

        let mut temp_name = OsString::from(path.as_os_str());
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, serialized).map_err(|e| {
            StorageError::io(format!("Failed to write asset collection to {:?}", temp_path), e)
        })?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::io(format!("Failed to rename temp file to {:?}", path), e)
        })?;

        info!(path = %path.display(), nodes = self.forest.len(), "Saved asset collection");
        Ok(())
    }
}

fn dir_exists_or_create(dir: &Path, mkdir: bool) -> Result<(), StorageError> {
    if dir.is_dir() {
        return Ok(());
    }
    if !mkdir {
        return Err(StorageError::MissingDirectory(dir.to_path_buf()));
    }
    fs::create_dir_all(dir)
        .map_err(|e| StorageError::io(format!("Failed to create directory {:?}", dir), e))
}

/// Create a new, empty collection file.
///
/// Fails with `AlreadyExists` when `path` exists and `force` is not set. With
/// `mkdir`, missing parent directories of `path` and a missing store root are
/// created; otherwise they are errors.
pub fn init_collection(
    path: &Path,
    store: Option<&Path>,
    force: bool,
    mkdir: bool,
) -> Result<AssetCollection, StorageError> {
    let path = absolutize(path)?;
    if let Some(parent) = path.parent() {
        dir_exists_or_create(parent, mkdir)?;
    }

    let store = match store {
        Some(store) => {
            let store = absolutize(store)?;
            dir_exists_or_create(&store, mkdir)?;
            Some(crate::tree::path::canonicalize_path(&store)?)
        }
        None => None,
    };

    if path.exists() && !force {
        return Err(StorageError::AlreadyExists(path));
    }

    let collection = AssetCollection::new(path, store);
    collection.save()?;
    info!(path = %collection.path.display(), "Initialized asset collection");
    Ok(collection)
}
