use super::Outcome;
use crate::error::AssetError;
use crate::store::AssetCollection;
use crate::transfer::release_item;
use crate::tree::resolve::{resolve_unique, MatchMode, SearchPath};
use crate::types::NodeId;
use std::path::PathBuf;
use tracing::{info, warn};

/// Removal of a node, optionally with its whole subtree
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub target: SearchPath,
    pub recursive: bool,
}

/// What a delete took out of the forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    /// The resolved target
    pub id: NodeId,
    /// Every removed node, target included
    pub removed: Vec<NodeId>,
    /// Store-owned items of the removed nodes, to release once the collection
    /// file no longer references them
    pub items: Vec<PathBuf>,
}

/// Remove the node `request.target` resolves to.
///
/// A node with children is only removed together with its descendants, and
/// only when `recursive` is set.
pub fn delete(
    collection: &mut AssetCollection,
    request: &DeleteRequest,
) -> Result<Outcome<Deleted>, AssetError> {
    let id = match resolve_unique(&collection.forest, &request.target, MatchMode::Exact)? {
        Some(id) => id,
        None => return Ok(Outcome::Unmatched),
    };

    if collection.forest.has_children(&id) && !request.recursive {
        return Err(AssetError::HasChildren(request.target.to_string()));
    }

    let mut removed = vec![id.clone()];
    removed.extend(collection.forest.descendants(&id));

    let mut scratch = collection.forest.clone();
    let mut items = Vec::new();
    for node_id in &removed {
        if let Some(node) = scratch.remove(node_id) {
            if let Some(item) = node.item {
                if collection.owns_item(&item) {
                    items.push(item);
                }
            }
        }
    }
    collection.forest = scratch;

    info!(id = %id, removed = removed.len(), "Deleted asset");
    Ok(Outcome::Applied(Deleted { id, removed, items }))
}

/// Release the items of a completed delete. Failures are logged and skipped;
/// returns how many items were released.
pub fn release_removed_items(deleted: &Deleted) -> usize {
    let mut released = 0;
    for item in &deleted.items {
        match release_item(item) {
            Ok(()) => released += 1,
            Err(err) => warn!(item = %item.display(), error = %err, "Failed to release item"),
        }
    }
    released
}
