//! CLI presentation: tree listings (text and json) for avail and spider.

use crate::error::AssetError;
use crate::store::AssetCollection;
use crate::tree::{AssetNode, Forest};
use crate::types::NodeId;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use std::path::PathBuf;

/// Terminal styling switch
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, Style::new().bold().underline())
    }

    fn alias(&self, text: &str, has_item: bool) -> String {
        let style = if has_item {
            Style::new().bright_magenta()
        } else {
            Style::new().truecolor(255, 135, 0)
        };
        self.paint(text, style)
    }

    fn tag(&self, text: &str) -> String {
        self.paint(text, Style::new().cyan())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, Style::new().bright_black())
    }
}

/// Human-readable byte count: `0 B`, `12 KB`, `3.0 GB`, `1.25 TB`.
pub fn convert_size(size: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];
    if size == 0 {
        return "0 B".to_string();
    }
    let mut exponent = 0;
    let mut scaled = size as f64;
    while scaled >= 1024.0 && exponent + 1 < UNITS.len() {
        scaled /= 1024.0;
        exponent += 1;
    }
    let precision = match exponent {
        0..=2 => 0,
        3 => 1,
        _ => 2,
    };
    format!("{:.*} {}", precision, scaled, UNITS[exponent])
}

/// One node's label: aliases joined by `|`, then `:tag` for each tag.
fn node_label(node: &AssetNode, palette: Palette) -> String {
    let aliases: Vec<String> = node
        .alias
        .iter()
        .map(|alias| palette.alias(alias, node.has_item()))
        .collect();
    let mut label = aliases.join("|");
    for tag in &node.tag {
        label.push(':');
        label.push_str(&palette.tag(tag));
    }
    label
}

fn node_details(node: &AssetNode, palette: Palette) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(description) = &node.description {
        lines.push(description.clone());
    }
    if node.has_item() {
        if let Some(cli) = &node.cli {
            lines.push(palette.dim(&format!("[{}]", cli)));
        }
        lines.push(palette.dim(&format!(
            "created={}\tupdated={}",
            node.create_time, node.update_time
        )));
        let mut sizes = Vec::new();
        if let Some(size) = node.size {
            sizes.push(format!("size={}", convert_size(size)));
        }
        if let Some(md5) = &node.md5 {
            sizes.push(format!("md5={}", md5));
        }
        if !sizes.is_empty() {
            lines.push(palette.dim(&sizes.join("\t")));
        }
    }
    lines
}

/// Render a collection's forest as an indented tree under its file path.
///
/// `detail` adds description, command line, timestamps, size and digest.
pub fn format_collection_tree(collection: &AssetCollection, detail: bool, palette: Palette) -> String {
    let mut out = palette.heading(&collection.path.display().to_string());
    out.push('\n');
    let roots = collection.forest.roots();
    let last = roots.len().saturating_sub(1);
    for (index, root) in roots.iter().enumerate() {
        render_node(&collection.forest, root, "", index == last, detail, palette, &mut out);
    }
    out
}

fn render_node(
    forest: &Forest,
    id: &NodeId,
    prefix: &str,
    is_last: bool,
    detail: bool,
    palette: Palette,
    out: &mut String,
) {
    let Some(node) = forest.get(id) else {
        return;
    };
    let (branch, continuation) = if is_last {
        ("└── ", "    ")
    } else {
        ("├── ", "│   ")
    };
    out.push_str(&format!("{}{}{}\n", prefix, branch, node_label(node, palette)));

    let child_prefix = format!("{}{}", prefix, continuation);
    let children: Vec<&NodeId> = forest.children(id).collect();
    if detail {
        let rail = if children.is_empty() { "    " } else { "│   " };
        for line in node_details(node, palette) {
            out.push_str(&format!("{}{}{}\n", child_prefix, rail, line));
        }
    }
    let last = children.len().saturating_sub(1);
    for (index, child) in children.into_iter().enumerate() {
        render_node(forest, child, &child_prefix, index == last, detail, palette, out);
    }
}

#[derive(Serialize)]
struct CollectionView<'a> {
    collection: &'a PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<&'a PathBuf>,
    assets: Vec<NodeView<'a>>,
}

#[derive(Serialize)]
struct NodeView<'a> {
    id: NodeId,
    #[serde(flatten)]
    node: &'a AssetNode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeView<'a>>,
}

fn node_view<'a>(forest: &'a Forest, id: &NodeId) -> Option<NodeView<'a>> {
    let node = forest.get(id)?;
    let children = forest
        .children(id)
        .filter_map(|child| node_view(forest, child))
        .collect();
    Some(NodeView {
        id: id.clone(),
        node,
        children,
    })
}

/// Render collections as a JSON array of nested asset trees.
pub fn format_collections_json(collections: &[AssetCollection]) -> Result<String, AssetError> {
    let views: Vec<CollectionView<'_>> = collections
        .iter()
        .map(|collection| {
            let roots = collection.forest.roots();
            let assets = roots
                .iter()
                .filter_map(|root| node_view(&collection.forest, root))
                .collect();
            CollectionView {
                collection: &collection.path,
                store: collection.store.as_ref(),
                assets,
            }
        })
        .collect();
    serde_json::to_string_pretty(&views)
        .map_err(|e| AssetError::InvalidRequest(format!("Failed to render JSON: {}", e)))
}
