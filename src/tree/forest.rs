//! Asset forest: node records plus parent/children edge maps
//!
//! Every node has at most one parent. The parent map and the children index
//! are kept in step on every mutation, so both upward walks (ancestors) and
//! downward walks (descendants) are plain map traversals.

use crate::error::AssetError;
use crate::tree::node::AssetNode;
use crate::types::NodeId;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Forest of asset nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    nodes: BTreeMap<NodeId, AssetNode>,
    /// child -> parent (absence = root)
    parent_map: BTreeMap<NodeId, NodeId>,
    /// parent -> children (no entry for leaves)
    children_map: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&AssetNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut AssetNode> {
        self.nodes.get_mut(id)
    }

    /// Iterate nodes in id order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &AssetNode)> {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Insert or replace a node's metadata. Edges are untouched.
    pub fn insert(&mut self, id: NodeId, node: AssetNode) -> Option<AssetNode> {
        self.nodes.insert(id, node)
    }

    /// Make `parent` the single parent of `child`, dropping any previous parent edge.
    ///
    /// Fails when either node is missing or when `parent` is `child` itself or one
    /// of its descendants.
    pub fn attach(&mut self, child: &NodeId, parent: &NodeId) -> Result<(), AssetError> {
        if !self.contains(child) {
            return Err(AssetError::NotFound(child.to_string()));
        }
        if !self.contains(parent) {
            return Err(AssetError::NotFound(parent.to_string()));
        }
        if child == parent || self.descendants(child).contains(parent) {
            return Err(AssetError::Cycle {
                node: child.to_string(),
                parent: parent.to_string(),
            });
        }
        self.detach(child);
        self.parent_map.insert(child.clone(), parent.clone());
        self.children_map
            .entry(parent.clone())
            .or_default()
            .insert(child.clone());
        Ok(())
    }

    /// Remove the parent edge of `child`, making it a root. Returns the old parent.
    pub fn detach(&mut self, child: &NodeId) -> Option<NodeId> {
        let parent = self.parent_map.remove(child)?;
        if let Some(siblings) = self.children_map.get_mut(&parent) {
            siblings.remove(child);
            if siblings.is_empty() {
                self.children_map.remove(&parent);
            }
        }
        Some(parent)
    }

    /// Remove a node and its edges. Any children become roots.
    pub fn remove(&mut self, id: &NodeId) -> Option<AssetNode> {
        let node = self.nodes.remove(id)?;
        self.detach(id);
        if let Some(children) = self.children_map.remove(id) {
            for child in children {
                self.parent_map.remove(&child);
            }
        }
        Some(node)
    }

    pub fn parent(&self, id: &NodeId) -> Option<&NodeId> {
        self.parent_map.get(id)
    }

    /// Direct children of `id`, in id order
    pub fn children(&self, id: &NodeId) -> impl Iterator<Item = &NodeId> {
        self.children_map.get(id).into_iter().flatten()
    }

    pub fn has_children(&self, id: &NodeId) -> bool {
        self.children_map.contains_key(id)
    }

    /// Nodes without a parent, in id order
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .keys()
            .filter(|id| !self.parent_map.contains_key(*id))
            .cloned()
            .collect()
    }

    /// Transitive closure over child edges (excluding `id` itself)
    pub fn descendants(&self, id: &NodeId) -> BTreeSet<NodeId> {
        let mut found = BTreeSet::new();
        let mut queue: VecDeque<&NodeId> = self.children(id).collect();
        while let Some(next) = queue.pop_front() {
            if found.insert(next.clone()) {
                queue.extend(self.children(next));
            }
        }
        found
    }

    /// Parent chain of `id`, ordered root first (excluding `id` itself)
    pub fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent_map.get(current) {
            chain.push(parent.clone());
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Depth-first preorder from the roots: every parent precedes its children.
    pub fn topological_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots().into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            let children: Vec<&NodeId> = self.children(&id).collect();
            stack.extend(children.into_iter().rev().cloned());
            order.push(id);
        }
        order
    }

    /// Induced sub-forest over `ids`: those nodes and the edges between them.
    pub fn subforest(&self, ids: &BTreeSet<NodeId>) -> Forest {
        let mut sub = Forest::new();
        for id in ids {
            if let Some(node) = self.nodes.get(id) {
                sub.nodes.insert(id.clone(), node.clone());
            }
        }
        for id in ids {
            if let Some(parent) = self.parent_map.get(id) {
                if sub.contains(id) && sub.contains(parent) {
                    sub.parent_map.insert(id.clone(), parent.clone());
                    sub.children_map
                        .entry(parent.clone())
                        .or_default()
                        .insert(id.clone());
                }
            }
        }
        sub
    }

    /// Sibling group under `parent` (roots when `None`), without `exclude`.
    pub fn sibling_scope(&self, parent: Option<&NodeId>, exclude: Option<&NodeId>) -> Vec<NodeId> {
        let scope: Vec<NodeId> = match parent {
            Some(parent) => self.children(parent).cloned().collect(),
            None => self.roots(),
        };
        scope
            .into_iter()
            .filter(|id| Some(id) != exclude)
            .collect()
    }

    /// First alias of `aliases` that collides with a node in `scope` under the
    /// alias + tag rule.
    pub fn find_collision<'a>(
        &self,
        scope: &[NodeId],
        aliases: &'a [String],
        tags: &[String],
    ) -> Option<&'a str> {
        aliases
            .iter()
            .find(|alias| {
                scope
                    .iter()
                    .filter_map(|id| self.nodes.get(id))
                    .any(|node| node.collides_with(alias, tags))
            })
            .map(String::as_str)
    }

    /// Check the structural invariants: edges reference existing nodes, the
    /// two edge maps agree, and every node reaches a root.
    pub fn is_consistent(&self) -> bool {
        for (child, parent) in &self.parent_map {
            if !self.contains(child) || !self.contains(parent) {
                return false;
            }
            match self.children_map.get(parent) {
                Some(children) if children.contains(child) => {}
                _ => return false,
            }
        }
        for (parent, children) in &self.children_map {
            if children.is_empty() {
                return false;
            }
            if children
                .iter()
                .any(|child| self.parent_map.get(child) != Some(parent))
            {
                return false;
            }
        }
        self.topological_order().len() == self.nodes.len()
    }
}
