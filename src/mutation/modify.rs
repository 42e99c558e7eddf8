use super::{ensure_aliases, ensure_unique, item_base, record_item, ItemRequest, Outcome};
use crate::error::AssetError;
use crate::store::AssetCollection;
use crate::transfer::{place_item, ItemPlan, StashedItem};
use crate::tree::resolve::{require_unique, resolve_unique, MatchMode, SearchPath};
use crate::types::{now_timestamp, NodeId};
use tracing::{info, warn};

/// Changes to an existing node. `None` fields keep their current value.
#[derive(Debug, Clone)]
pub struct ModifyRequest {
    /// Exact search path of the node to change
    pub target: SearchPath,
    pub alias: Option<Vec<String>>,
    pub tag: Option<Vec<String>>,
    /// New parent; the node moves with its whole subtree
    pub parent: Option<SearchPath>,
    pub description: Option<String>,
    pub cli: Option<String>,
    pub item: Option<ItemRequest>,
}

impl ModifyRequest {
    pub fn new(target: impl Into<SearchPath>) -> Self {
        Self {
            target: target.into(),
            alias: None,
            tag: None,
            parent: None,
            description: None,
            cli: None,
            item: None,
        }
    }
}

/// Apply `request` to the node its target resolves to.
///
/// `Unmatched` when the target resolves to nothing; more than one match is
/// `AmbiguousPath`. Uniqueness is re-checked whenever the node's aliases, tags
/// or parent change, against its siblings but never against itself.
pub fn modify(
    collection: &mut AssetCollection,
    request: &ModifyRequest,
) -> Result<Outcome<NodeId>, AssetError> {
    let id = match resolve_unique(&collection.forest, &request.target, MatchMode::Exact)? {
        Some(id) => id,
        None => return Ok(Outcome::Unmatched),
    };

    let mut scratch = collection.forest.clone();
    if let Some(search) = &request.parent {
        let parent = require_unique(&scratch, search)?;
        scratch.attach(&id, &parent)?;
    }
    let parent = scratch.parent(&id).cloned();

    let Some(current) = scratch.get(&id) else {
        return Err(AssetError::NotFound(id.to_string()));
    };
    let aliases = request.alias.clone().unwrap_or_else(|| current.alias.clone());
    let tags = request.tag.clone().unwrap_or_else(|| current.tag.clone());
    let old_item = current.item.clone();

    if request.alias.is_some() || request.tag.is_some() || request.parent.is_some() {
        ensure_aliases(&aliases)?;
        let scope = scratch.sibling_scope(parent.as_ref(), Some(&id));
        ensure_unique(&scratch, &scope, &aliases, &tags)?;
    }

    let placed = match &request.item {
        Some(item) => {
            let base = item_base(&id, parent.as_ref(), item.inherit)?;
            let plan = ItemPlan::for_store(collection.store.as_deref(), base);
            let stashed = match old_item.as_deref() {
                Some(old) if collection.owns_item(old) => StashedItem::stash(old)?,
                _ => None,
            };
            match place_item(&item.source, &plan, item.mode, item.digest) {
                Ok(placed) => {
                    if let Some(stashed) = stashed {
                        if let Err(discard_err) = stashed.discard() {
                            warn!(error = %discard_err, "Failed to release replaced item");
                        }
                    }
                    Some(placed)
                }
                Err(err) => {
                    if let Some(stashed) = stashed {
                        if let Err(restore_err) = stashed.restore() {
                            warn!(error = %restore_err, "Failed to restore replaced item");
                        }
                    }
                    return Err(err.into());
                }
            }
        }
        None => None,
    };

    let Some(node) = scratch.get_mut(&id) else {
        return Err(AssetError::NotFound(id.to_string()));
    };
    node.alias = aliases;
    node.tag = tags;
    node.update_time = now_timestamp();
    if let Some(description) = &request.description {
        node.description = Some(description.clone());
    }
    if let Some(cli) = &request.cli {
        node.cli = Some(cli.clone());
    }
    if let Some(placed) = placed {
        record_item(node, placed);
    }
    collection.forest = scratch;

    info!(id = %id, target = %request.target, "Modified asset");
    Ok(Outcome::Applied(id))
}
