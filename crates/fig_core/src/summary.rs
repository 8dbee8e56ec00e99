//! Bounded node projection
//!
//! A summary is a fixed-size rendering of a node for consumers with a
//! limited context budget: identity and type always, geometry as width and
//! height only, a capped text preview, and at most one level of child
//! summaries. The caps guarantee bounded output whatever the input tree
//! size, and are deliberately not configurable.

use crate::node::Node;
use serde::Serialize;

/// Text nodes contribute at most this many characters of content.
/// Truncation is silent.
pub const TEXT_PREVIEW_CHARS: usize = 100;

/// At most this many children are summarized; the true count is always
/// reported alongside.
pub const MAX_CHILD_SUMMARIES: usize = 10;

/// Bounded summary of a node
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,

    #[serde(rename = "childCount", skip_serializing_if = "Option::is_none")]
    pub child_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSummary>>,

    #[serde(rename = "childrenTruncated", skip_serializing_if = "Option::is_none")]
    pub children_truncated: Option<bool>,
}

/// Width and height of a summarized node; position is dropped
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Size {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Summarize a node, optionally with one level of child summaries
///
/// With `include_children`, `childCount` reflects the true number of
/// children while `children` holds summaries for at most the first
/// [`MAX_CHILD_SUMMARIES`] of them, each without children of its own.
/// `childrenTruncated` appears only when the cap was hit.
pub fn summarize_node(node: &Node, include_children: bool) -> NodeSummary {
    let mut summary = NodeSummary {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        size: None,
        characters: None,
        child_count: None,
        children: None,
        children_truncated: None,
    };

    if let Some(rect) = &node.absolute_bounding_box {
        summary.size = Some(Size {
            width: rect.width,
            height: rect.height,
        });
    }

    if node.node_type == "TEXT" {
        let text = node.characters.as_deref().unwrap_or("");
        summary.characters = Some(text.chars().take(TEXT_PREVIEW_CHARS).collect());
    }

    if include_children {
        summary.child_count = Some(node.children.len());
        summary.children = Some(
            node.children
                .iter()
                .take(MAX_CHILD_SUMMARIES)
                .map(|child| summarize_node(child, false))
                .collect(),
        );
        if node.children.len() > MAX_CHILD_SUMMARIES {
            summary.children_truncated = Some(true);
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use serde_json::json;

    #[test]
    fn test_identity_fields_always_present() {
        let node = Node::from_value(json!({"id": "1:1", "name": "Box", "type": "FRAME"})).unwrap();
        let summary = summarize_node(&node, false);
        assert_eq!(summary.id, "1:1");
        assert_eq!(summary.name, "Box");
        assert_eq!(summary.node_type, "FRAME");
        assert!(summary.size.is_none());
        assert!(summary.child_count.is_none());
    }

    #[test]
    fn test_geometry_projects_size_only() {
        let node = Node::from_value(json!({
            "id": "1:1", "type": "FRAME",
            "absoluteBoundingBox": {"x": 10.0, "y": 20.0, "width": 375.0, "height": 812.0}
        }))
        .unwrap();
        let summary = summarize_node(&node, false);
        let size = summary.size.unwrap();
        assert_eq!(size.width, Some(375.0));
        assert_eq!(size.height, Some(812.0));

        // Position must not leak into the serialized form
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value["size"].get("x").is_none());
    }

    #[test]
    fn test_text_truncated_to_100_chars_silently() {
        let long_text: String = "x".repeat(150);
        let node = Node::from_value(json!({
            "id": "1:1", "type": "TEXT", "characters": long_text
        }))
        .unwrap();
        let summary = summarize_node(&node, false);
        let preview = summary.characters.unwrap();
        assert_eq!(preview.len(), 100);
        assert!(preview.chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_text_preview_counts_characters_not_bytes() {
        let text: String = "ä".repeat(120);
        let node = Node::from_value(json!({
            "id": "1:1", "type": "TEXT", "characters": text
        }))
        .unwrap();
        let summary = summarize_node(&node, false);
        assert_eq!(summary.characters.unwrap().chars().count(), 100);
    }

    #[test]
    fn test_child_cap_and_truncation_flag() {
        let children: Vec<_> = (0..1000)
            .map(|i| json!({"id": format!("c:{}", i), "type": "RECTANGLE"}))
            .collect();
        let node = Node::from_value(json!({
            "id": "1:1", "type": "FRAME", "children": children
        }))
        .unwrap();

        let summary = summarize_node(&node, true);
        assert_eq!(summary.child_count, Some(1000));
        assert_eq!(summary.children.as_ref().unwrap().len(), 10);
        assert_eq!(summary.children_truncated, Some(true));
    }

    #[test]
    fn test_few_children_no_truncation_flag() {
        let children: Vec<_> = (0..5)
            .map(|i| json!({"id": format!("c:{}", i), "type": "RECTANGLE"}))
            .collect();
        let node = Node::from_value(json!({
            "id": "1:1", "type": "FRAME", "children": children
        }))
        .unwrap();

        let summary = summarize_node(&node, true);
        assert_eq!(summary.child_count, Some(5));
        assert_eq!(summary.children.as_ref().unwrap().len(), 5);
        assert_eq!(summary.children_truncated, None);
    }

    #[test]
    fn test_child_summaries_never_nest() {
        let node = Node::from_value(json!({
            "id": "1:1", "type": "FRAME", "children": [
                {"id": "2:1", "type": "FRAME", "children": [
                    {"id": "3:1", "type": "TEXT", "characters": "deep"}
                ]}
            ]
        }))
        .unwrap();

        let summary = summarize_node(&node, true);
        let child = &summary.children.as_ref().unwrap()[0];
        // One level down: identity only, no grandchild summaries
        assert!(child.children.is_none());
        assert!(child.child_count.is_none());
    }
}
