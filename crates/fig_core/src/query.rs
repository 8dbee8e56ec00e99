//! Domain queries over a document tree
//!
//! Built on the walker: name and id lookup, the fixed two-level top-level
//! frame scan, and full-depth component enumeration.

use crate::node::Node;
use crate::walk::{find_node, for_each_node};
use fig_common::Result;
use serde::Serialize;

/// Node types collected by the top-level frame scan
const TOP_LEVEL_TYPES: [&str; 3] = ["FRAME", "COMPONENT", "COMPONENT_SET"];

/// Node types collected by component enumeration
const COMPONENT_TYPES: [&str; 3] = ["COMPONENT", "COMPONENT_SET", "INSTANCE"];

/// Maximum number of alternative frame names offered after a failed lookup
pub const NAME_SUGGESTION_LIMIT: usize = 20;

/// A top-level frame/component, tagged with its owning page
#[derive(Debug, Clone, Serialize)]
pub struct FrameInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub page: String,
}

/// A component-like node, identity fields only
#[derive(Debug, Clone, Serialize)]
pub struct ComponentInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

/// Find a node by name: case-insensitive, whitespace-trimmed exact match,
/// first match in document order. Nodes with empty names never match.
pub fn find_by_name<'a>(root: &'a Node, name: &str) -> Result<Option<&'a Node>> {
    let needle = name.trim().to_lowercase();
    tracing::debug!(target: "query", name = %needle, "Searching node by name");
    find_node(root, |n| {
        !n.name.is_empty() && n.name.trim().to_lowercase() == needle
    })
}

/// Find a node by id: exact equality, ids are opaque tokens
pub fn find_by_id<'a>(root: &'a Node, node_id: &str) -> Result<Option<&'a Node>> {
    find_node(root, |n| n.id == node_id)
}

/// List top-level frames and components
///
/// Inspects exactly two levels below the root: the root's direct children
/// (pages) and each page's direct children. A frame nested any deeper is not
/// top-level and is never collected, whatever its type.
pub fn top_level_frames(root: &Node) -> Vec<FrameInfo> {
    let mut frames = Vec::new();

    for page in &root.children {
        for node in &page.children {
            if TOP_LEVEL_TYPES.contains(&node.node_type.as_str()) {
                frames.push(FrameInfo {
                    id: node.id.clone(),
                    name: display_name(&node.name, "Unnamed"),
                    node_type: node.node_type.clone(),
                    page: display_name(&page.name, "Unnamed Page"),
                });
            }
        }
    }

    frames
}

/// List every component, component set, and instance in the whole tree,
/// in pre-order document order
pub fn all_components(root: &Node) -> Result<Vec<ComponentInfo>> {
    tracing::debug!(target: "query", "Enumerating components");
    let mut components = Vec::new();

    for_each_node(root, |node| {
        if COMPONENT_TYPES.contains(&node.node_type.as_str()) {
            components.push(ComponentInfo {
                id: node.id.clone(),
                name: display_name(&node.name, "Unnamed"),
                node_type: node.node_type.clone(),
            });
        }
    })?;

    Ok(components)
}

/// Bounded list of top-level frame names, for "did you mean" responses
/// after a failed name lookup
pub fn frame_name_suggestions(root: &Node, limit: usize) -> Vec<String> {
    top_level_frames(root)
        .into_iter()
        .take(limit)
        .map(|f| f.name)
        .collect()
}

fn display_name(name: &str, fallback: &str) -> String {
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}
