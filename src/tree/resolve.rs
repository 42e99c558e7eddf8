//! Search path resolution over the asset forest
//!
//! A search path is a `/`-separated list of `alias[:tag]*` segments. Each
//! segment narrows the candidate set; after a non-final segment the candidates
//! become the descendants of the current matches, so `coll/sub:v2/leaf` means
//! "leaf somewhere under sub (tagged v2) somewhere under coll".

use crate::error::AssetError;
use crate::tree::forest::Forest;
use crate::tree::node::AssetNode;
use crate::types::NodeId;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// How alias and tag terms are compared against node metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Term equals one of the node's aliases / tags
    Exact,
    /// Case-insensitive substring of the `_`-joined aliases / tags
    Fuzzy,
}

/// One `alias[:tag]*` segment of a search path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub alias: String,
    pub tags: Vec<String>,
}

impl Segment {
    fn matches(&self, node: &AssetNode, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Exact => {
                (self.alias.is_empty() || node.alias.iter().any(|a| a == &self.alias))
                    && self.tags.iter().all(|t| node.tag.contains(t))
            }
            MatchMode::Fuzzy => {
                let alias_text = node.alias.join("_").to_lowercase();
                let tag_text = node.tag.join("_").to_lowercase();
                alias_text.contains(&self.alias.to_lowercase())
                    && self
                        .tags
                        .iter()
                        .all(|t| tag_text.contains(&t.to_lowercase()))
            }
        }
    }
}

/// Parsed search path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    raw: String,
    segments: Vec<Segment>,
}

impl SearchPath {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for SearchPath {
    fn from(value: &str) -> Self {
        let segments = value
            .split('/')
            .map(|part| {
                let mut pieces = part.split(':');
                let alias = pieces.next().unwrap_or_default().to_string();
                Segment {
                    alias,
                    tags: pieces.map(str::to_string).collect(),
                }
            })
            .collect();
        Self {
            raw: value.to_string(),
            segments,
        }
    }
}

impl FromStr for SearchPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Flags for [`search_nodes`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub ancestors: bool,
    pub descendants: bool,
    pub fuzzy_fallback: bool,
}

/// Resolve a search path to the set of matching node ids.
///
/// No match at an intermediate segment yields an empty set, not an error.
pub fn resolve(forest: &Forest, search: &SearchPath, mode: MatchMode) -> BTreeSet<NodeId> {
    let mut candidates: BTreeSet<NodeId> = forest.ids().cloned().collect();
    let mut matches = BTreeSet::new();
    let last = search.segments.len().saturating_sub(1);

    for (index, segment) in search.segments.iter().enumerate() {
        matches = candidates
            .iter()
            .filter(|id| {
                forest
                    .get(id)
                    .map(|node| segment.matches(node, mode))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        if index < last {
            candidates = matches
                .iter()
                .flat_map(|id| forest.descendants(id))
                .collect();
        }
    }

    debug!(search = %search, ?mode, matches = matches.len(), "Resolved search path");
    matches
}

/// Resolve to at most one node: `AmbiguousPath` when several match.
pub fn resolve_unique(
    forest: &Forest,
    search: &SearchPath,
    mode: MatchMode,
) -> Result<Option<NodeId>, AssetError> {
    let matches = resolve(forest, search, mode);
    if matches.len() > 1 {
        return Err(AssetError::AmbiguousPath(search.to_string()));
    }
    Ok(matches.into_iter().next())
}

/// Resolve to exactly one node: `AmbiguousPath` on several, `NotFound` on none.
pub fn require_unique(forest: &Forest, search: &SearchPath) -> Result<NodeId, AssetError> {
    resolve_unique(forest, search, MatchMode::Exact)?
        .ok_or_else(|| AssetError::NotFound(search.to_string()))
}

/// Search the forest and return the induced sub-forest of the matches,
/// optionally widened by their ancestor chains and descendants.
///
/// Exact matching is tried first; fuzzy matching only when that finds
/// nothing and `fuzzy_fallback` is set.
pub fn search_nodes(forest: &Forest, search: &SearchPath, options: SearchOptions) -> Forest {
    let mut found = resolve(forest, search, MatchMode::Exact);
    if found.is_empty() && options.fuzzy_fallback {
        found = resolve(forest, search, MatchMode::Fuzzy);
    }

    let mut selected = found.clone();
    if options.ancestors {
        for id in &found {
            selected.extend(forest.ancestors(id));
        }
    }
    if options.descendants {
        for id in &found {
            selected.extend(forest.descendants(id));
        }
    }
    forest.subforest(&selected)
}

/// Location of the uniquely matching node's item (exact matching only).
///
/// `Ok(None)` when nothing matches or the match is a pure grouping node.
pub fn retrieve_item(forest: &Forest, search: &SearchPath) -> Result<Option<PathBuf>, AssetError> {
    let found = resolve_unique(forest, search, MatchMode::Exact)?;
    Ok(found
        .and_then(|id| forest.get(&id))
        .and_then(|node| node.item.clone()))
}
