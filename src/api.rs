//! Asset API
//!
//! Operations across the configured, ordered list of collection files.
//! Searches visit every collection; point lookups and mutations stop at the
//! first collection that yields a result, and additions always target the
//! first collection.

use crate::error::AssetError;
use crate::mutation::{
    self, release_removed_items, AddRequest, DeleteRequest, Deleted, ModifyRequest, Outcome,
};
use crate::store::{init_collection, AssetCollection};
use crate::tree::resolve::{retrieve_item, search_nodes};
use crate::tree::{SearchOptions, SearchPath};
use crate::types::NodeId;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a mutation landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    /// Collection file that was rewritten
    pub collection: PathBuf,
    pub value: T,
}

/// Asset API service over an ordered list of collection files
#[derive(Debug, Clone)]
pub struct AssetApi {
    collections: Vec<PathBuf>,
}

impl AssetApi {
    pub fn new(collections: Vec<PathBuf>) -> Self {
        Self { collections }
    }

    pub fn collections(&self) -> &[PathBuf] {
        &self.collections
    }

    /// Create an empty collection file.
    pub fn init(
        path: &Path,
        store: Option<&Path>,
        force: bool,
        mkdir: bool,
    ) -> Result<AssetCollection, AssetError> {
        Ok(init_collection(path, store, force, mkdir)?)
    }

    /// Search every collection.
    ///
    /// Each returned collection carries the matching sub-forest, widened to
    /// ancestors and descendants. Without a search the whole forest is
    /// returned. Exact matching falls back to fuzzy unless `exact` is set.
    pub fn search(
        &self,
        search: Option<&SearchPath>,
        exact: bool,
    ) -> Result<Vec<AssetCollection>, AssetError> {
        let options = SearchOptions {
            ancestors: true,
            descendants: true,
            fuzzy_fallback: !exact,
        };
        let mut results = Vec::with_capacity(self.collections.len());
        for path in &self.collections {
            let mut collection = AssetCollection::load(path)?;
            if let Some(search) = search {
                collection.forest = search_nodes(&collection.forest, search, options);
            }
            debug!(
                collection = %path.display(),
                nodes = collection.forest.len(),
                "Searched collection"
            );
            results.push(collection);
        }
        Ok(results)
    }

    /// Item location of the first collection with a unique, item-bearing match.
    pub fn pull(&self, search: &SearchPath) -> Result<PathBuf, AssetError> {
        for path in &self.collections {
            let collection = AssetCollection::load(path)?;
            if let Some(item) = retrieve_item(&collection.forest, search)? {
                return Ok(item);
            }
        }
        Err(AssetError::NotFound(search.to_string()))
    }

    /// Add a node to the first collection and save it.
    pub fn add(&self, request: &AddRequest) -> Result<Applied<NodeId>, AssetError> {
        let path = self.collections.first().ok_or_else(|| {
            AssetError::ConfigError("no asset collection is configured".to_string())
        })?;
        let mut collection = AssetCollection::load(path)?;
        let id = mutation::add(&mut collection, request)?;
        collection.save()?;
        Ok(Applied {
            collection: path.clone(),
            value: id,
        })
    }

    /// Modify the first matching node and save its collection.
    pub fn modify(&self, request: &ModifyRequest) -> Result<Applied<NodeId>, AssetError> {
        for path in &self.collections {
            let mut collection = AssetCollection::load(path)?;
            if let Outcome::Applied(id) = mutation::modify(&mut collection, request)? {
                collection.save()?;
                return Ok(Applied {
                    collection: path.clone(),
                    value: id,
                });
            }
        }
        Err(AssetError::NotFound(request.target.to_string()))
    }

    /// Delete the first matching node, save its collection, then release the
    /// stored items of everything removed.
    pub fn delete(&self, request: &DeleteRequest) -> Result<Applied<Deleted>, AssetError> {
        for path in &self.collections {
            let mut collection = AssetCollection::load(path)?;
            if let Outcome::Applied(deleted) = mutation::delete(&mut collection, request)? {
                collection.save()?;
                let released = release_removed_items(&deleted);
                debug!(released, "Released stored items");
                return Ok(Applied {
                    collection: path.clone(),
                    value: deleted,
                });
            }
        }
        Err(AssetError::NotFound(request.target.to_string()))
    }
}
