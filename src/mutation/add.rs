use super::{attach_item, ensure_aliases, ensure_unique, ItemRequest};
use crate::error::AssetError;
use crate::store::AssetCollection;
use crate::tree::resolve::{require_unique, SearchPath};
use crate::tree::AssetNode;
use crate::types::{now_timestamp, NodeId};
use tracing::info;

/// A new asset node
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub alias: Vec<String>,
    pub tag: Vec<String>,
    /// Unique search path of the parent; a root node when absent
    pub parent: Option<SearchPath>,
    pub description: Option<String>,
    pub cli: Option<String>,
    pub item: Option<ItemRequest>,
}

/// Add a node to the collection's forest and return its fresh id.
///
/// Fails with `Duplicate` when one of the aliases, combined with every
/// requested tag, already names a sibling.
pub fn add(collection: &mut AssetCollection, request: &AddRequest) -> Result<NodeId, AssetError> {
    ensure_aliases(&request.alias)?;

    let forest = &collection.forest;
    let parent = match &request.parent {
        Some(search) => Some(require_unique(forest, search)?),
        None => None,
    };
    let scope = forest.sibling_scope(parent.as_ref(), None);
    ensure_unique(forest, &scope, &request.alias, &request.tag)?;

    let id = NodeId::generate(|candidate| forest.contains(candidate));
    let mut node = AssetNode::new(request.alias.clone(), now_timestamp());
    node.tag = request.tag.clone();
    node.description = request.description.clone();
    node.cli = request.cli.clone();

    if let Some(item) = &request.item {
        attach_item(collection, &id, parent.as_ref(), item, &mut node)?;
    }

    let mut scratch = collection.forest.clone();
    scratch.insert(id.clone(), node);
    if let Some(parent) = &parent {
        scratch.attach(&id, parent)?;
    }
    collection.forest = scratch;

    info!(
        id = %id,
        alias = ?request.alias,
        parent = ?parent.as_ref().map(NodeId::as_str),
        "Added asset"
    );
    Ok(id)
}
