//! Document tree data model
//!
//! A Figma document is an untyped, recursively nested record. Rather than a
//! type-per-kind hierarchy, every node is the same record with all attribute
//! groups optional; `type` determines which groups are usually populated but
//! never guarantees it, so every read stays defensive. Unknown attributes are
//! kept in `extra` so a node survives a serialize round-trip unchanged.

use fig_common::{FigError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of the document tree (page, frame, component, shape, text...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    /// Unique within a document, stable across fetches
    #[serde(default)]
    pub id: String,

    /// Author-assigned, not unique
    #[serde(default)]
    pub name: String,

    /// Open vocabulary: DOCUMENT, CANVAS, FRAME, COMPONENT, COMPONENT_SET,
    /// INSTANCE, TEXT, and various shape types
    #[serde(default, rename = "type")]
    pub node_type: String,

    /// Ordered children; order is z-order / layout order and is preserved
    /// by every query and summary
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Absolute geometry, when the node has any
    #[serde(
        default,
        rename = "absoluteBoundingBox",
        skip_serializing_if = "Option::is_none"
    )]
    pub absolute_bounding_box: Option<Rect>,

    /// Text content, for TEXT nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,

    /// Paint attributes, copied verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Value>,

    /// Visual effects (shadows, blurs), copied verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Value>,

    /// Text style attributes, copied verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,

    /// Auto-layout mode (HORIZONTAL / VERTICAL), when auto-layout is on
    #[serde(default, rename = "layoutMode", skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<String>,

    #[serde(default, rename = "itemSpacing", skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,

    #[serde(default, rename = "paddingLeft", skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,

    #[serde(default, rename = "paddingRight", skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,

    #[serde(default, rename = "paddingTop", skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,

    #[serde(default, rename = "paddingBottom", skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,

    /// Everything else the API returned for this node
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Node {
    /// Parse a raw API payload into a node tree
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| FigError::MalformedNode(e.to_string()))
    }
}

/// Axis-aligned bounding rectangle; every field is optional in the wire format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// RGBA color with channels in the 0-1 range
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl Default for Color {
    fn default() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}
