//! Asset node record

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata of one asset or collection node.
///
/// Parent relationships are not stored here; they live in the [`Forest`](super::forest::Forest)
/// edge maps and are projected into the persisted form by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetNode {
    pub alias: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    pub create_time: String,
    pub update_time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli: Option<String>,
}

impl AssetNode {
    /// A new node with both timestamps set to `timestamp`
    pub fn new(alias: Vec<String>, timestamp: String) -> Self {
        Self {
            alias,
            tag: Vec::new(),
            description: None,
            item: None,
            size: None,
            md5: None,
            create_time: timestamp.clone(),
            update_time: timestamp,
            cli: None,
        }
    }

    /// Whether this node tracks an item (as opposed to a pure grouping node)
    pub fn has_item(&self) -> bool {
        self.item.is_some()
    }

    /// Alias + tag collision rule used for sibling uniqueness: this node carries
    /// `alias` and every one of `tags`.
    pub fn collides_with(&self, alias: &str, tags: &[String]) -> bool {
        self.alias.iter().any(|a| a == alias) && tags.iter().all(|t| self.tag.contains(t))
    }
}
