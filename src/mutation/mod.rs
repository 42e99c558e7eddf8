//! Forest mutations: add, modify and delete
//!
//! Every operation works on a scratch copy of the collection's forest and
//! swaps it in only once all checks and item transfers have succeeded. The
//! caller decides whether to persist based on the returned [`Outcome`].

pub mod add;
pub mod delete;
pub mod modify;

pub use add::{add, AddRequest};
pub use delete::{delete, release_removed_items, DeleteRequest, Deleted};
pub use modify::{modify, ModifyRequest};

use crate::error::AssetError;
use crate::store::AssetCollection;
use crate::transfer::{place_item, ItemPlan, PlacedItem, TransferMode};
use crate::tree::{AssetNode, Forest};
use crate::types::NodeId;
use std::path::PathBuf;

/// Result of a mutation addressed by a search path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The target was found and the change was made
    Applied(T),
    /// Nothing matched; the collection is untouched
    Unmatched,
}

/// An item to attach to a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub source: PathBuf,
    pub mode: TransferMode,
    /// Compute an md5 digest for regular files
    pub digest: bool,
    /// Name the stored item after the parent node instead of the node itself
    pub inherit: bool,
}

impl ItemRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            mode: TransferMode::default(),
            digest: true,
            inherit: false,
        }
    }
}

fn ensure_unique(
    forest: &Forest,
    scope: &[NodeId],
    aliases: &[String],
    tags: &[String],
) -> Result<(), AssetError> {
    match forest.find_collision(scope, aliases, tags) {
        Some(alias) => Err(AssetError::Duplicate {
            alias: alias.to_string(),
            tags: tags.join(", "),
        }),
        None => Ok(()),
    }
}

fn ensure_aliases(aliases: &[String]) -> Result<(), AssetError> {
    if aliases.is_empty() || aliases.iter().any(|alias| alias.is_empty()) {
        return Err(AssetError::InvalidRequest(
            "an asset needs at least one non-empty alias".to_string(),
        ));
    }
    Ok(())
}

/// Place `item` for node `id` (child of `parent`) and record it on `node`.
fn attach_item(
    collection: &AssetCollection,
    id: &NodeId,
    parent: Option<&NodeId>,
    item: &ItemRequest,
    node: &mut AssetNode,
) -> Result<(), AssetError> {
    let base = item_base(id, parent, item.inherit)?;
    let plan = ItemPlan::for_store(collection.store.as_deref(), base);
    let placed = place_item(&item.source, &plan, item.mode, item.digest)?;
    record_item(node, placed);
    Ok(())
}

fn item_base(id: &NodeId, parent: Option<&NodeId>, inherit: bool) -> Result<String, AssetError> {
    if !inherit {
        return Ok(id.to_string());
    }
    parent.map(|parent| parent.to_string()).ok_or_else(|| {
        AssetError::InvalidRequest("cannot inherit an item name without a parent".to_string())
    })
}

fn record_item(node: &mut AssetNode, placed: PlacedItem) {
    node.item = Some(placed.path);
    node.size = Some(placed.size);
    node.md5 = placed.md5;
}
