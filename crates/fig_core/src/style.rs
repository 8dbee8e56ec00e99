//! Style extraction and color conversion
//!
//! Pulls the visual attribute groups actually present on a node into a
//! normalized side-structure. No group is synthesized: a node without fills
//! yields no `fills` key at all.

use crate::node::{Color, Node, Rect};
use serde::Serialize;
use serde_json::Value;

/// Effective alpha at or above this threshold renders as a 3-channel color
pub const OPAQUE_ALPHA: f64 = 0.999;

/// Visual attribute groups extracted from a single node
#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fills: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Value>,

    #[serde(rename = "textStyle", skip_serializing_if = "Option::is_none")]
    pub text_style: Option<Value>,

    #[serde(rename = "boundingBox", skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<Rect>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutStyle>,
}

/// Auto-layout attributes, assembled when `layoutMode` is present.
/// Spacing and padding stay nullable; absent values are not zeroes.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutStyle {
    pub mode: String,
    #[serde(rename = "itemSpacing")]
    pub item_spacing: Option<f64>,
    #[serde(rename = "paddingLeft")]
    pub padding_left: Option<f64>,
    #[serde(rename = "paddingRight")]
    pub padding_right: Option<f64>,
    #[serde(rename = "paddingTop")]
    pub padding_top: Option<f64>,
    #[serde(rename = "paddingBottom")]
    pub padding_bottom: Option<f64>,
}

/// Extract the style groups present on a node
///
/// `fills`, `strokes`, and `effects` are copied verbatim; text attributes
/// surface under `textStyle` and geometry under `boundingBox`.
pub fn extract_styles(node: &Node) -> NodeStyles {
    let layout = node.layout_mode.as_ref().map(|mode| LayoutStyle {
        mode: mode.clone(),
        item_spacing: node.item_spacing,
        padding_left: node.padding_left,
        padding_right: node.padding_right,
        padding_top: node.padding_top,
        padding_bottom: node.padding_bottom,
    });

    NodeStyles {
        fills: node.fills.clone(),
        strokes: node.strokes.clone(),
        effects: node.effects.clone(),
        text_style: node.style.clone(),
        bounding_box: node.absolute_bounding_box,
        layout,
    }
}

/// Convert an RGBA color plus an external opacity multiplier to a CSS string
///
/// Channels are scaled to 0-255 and rounded half away from zero. The
/// effective alpha is the color's own alpha times `opacity`; at or above
/// [`OPAQUE_ALPHA`] the result is `rgb(r, g, b)`, below it
/// `rgba(r, g, b, a)` with alpha at exactly 3 decimal places. No color in,
/// no color out.
pub fn color_to_css(color: Option<&Color>, opacity: f64) -> Option<String> {
    let color = color?;

    let r = (color.r * 255.0).round() as i64;
    let g = (color.g * 255.0).round() as i64;
    let b = (color.b * 255.0).round() as i64;
    let a = color.a * opacity;

    if a >= OPAQUE_ALPHA {
        Some(format!("rgb({}, {}, {})", r, g, b))
    } else {
        Some(format!("rgba({}, {}, {}, {:.3})", r, g, b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use serde_json::json;

    #[test]
    fn test_absent_groups_produce_no_keys() {
        let node = Node::from_value(json!({"id": "1:1", "type": "RECTANGLE"})).unwrap();
        let styles = extract_styles(&node);
        let value = serde_json::to_value(&styles).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_paint_groups_copied_verbatim() {
        let fills = json!([{"type": "SOLID", "color": {"r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0}}]);
        let node = Node::from_value(json!({
            "id": "1:1", "type": "RECTANGLE",
            "fills": fills,
            "strokes": [{"type": "SOLID"}]
        }))
        .unwrap();

        let styles = extract_styles(&node);
        assert_eq!(styles.fills.unwrap(), fills);
        assert!(styles.strokes.is_some());
        assert!(styles.effects.is_none());
    }

    #[test]
    fn test_renamed_groups() {
        let node = Node::from_value(json!({
            "id": "1:1", "type": "TEXT",
            "style": {"fontFamily": "Inter", "fontSize": 16.0},
            "absoluteBoundingBox": {"x": 0.0, "y": 0.0, "width": 100.0, "height": 20.0}
        }))
        .unwrap();

        let value = serde_json::to_value(extract_styles(&node)).unwrap();
        assert_eq!(value["textStyle"]["fontFamily"], json!("Inter"));
        assert_eq!(value["boundingBox"]["width"], json!(100.0));
        assert!(value.get("style").is_none());
    }

    #[test]
    fn test_layout_group_assembled_with_nullable_fields() {
        let node = Node::from_value(json!({
            "id": "1:1", "type": "FRAME",
            "layoutMode": "VERTICAL",
            "itemSpacing": 8.0,
            "paddingLeft": 16.0
        }))
        .unwrap();

        let value = serde_json::to_value(extract_styles(&node)).unwrap();
        assert_eq!(value["layout"]["mode"], json!("VERTICAL"));
        assert_eq!(value["layout"]["itemSpacing"], json!(8.0));
        assert_eq!(value["layout"]["paddingLeft"], json!(16.0));
        // Absent paddings are null, not zero
        assert_eq!(value["layout"]["paddingTop"], json!(null));
    }

    #[test]
    fn test_no_layout_group_without_layout_mode() {
        let node = Node::from_value(json!({
            "id": "1:1", "type": "FRAME", "itemSpacing": 8.0
        }))
        .unwrap();
        assert!(extract_styles(&node).layout.is_none());
    }

    #[test]
    fn test_color_none_in_none_out() {
        assert_eq!(color_to_css(None, 1.0), None);
    }

    #[test]
    fn test_color_opaque_three_channel_form() {
        let color = Color {
            r: 1.0,
            g: 0.5,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(color_to_css(Some(&color), 1.0).unwrap(), "rgb(255, 128, 0)");
    }

    #[test]
    fn test_color_alpha_boundary_at_opaque_threshold() {
        let color = Color {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.999,
        };
        // Exactly at the threshold: still the 3-channel form
        assert_eq!(color_to_css(Some(&color), 1.0).unwrap(), "rgb(0, 0, 0)");

        let color = Color { a: 0.998, ..color };
        assert_eq!(
            color_to_css(Some(&color), 1.0).unwrap(),
            "rgba(0, 0, 0, 0.998)"
        );
    }

    #[test]
    fn test_color_half_red_half_alpha() {
        // 0.5 * 255 = 127.5 rounds away from zero to 128
        let color = Color {
            r: 0.5,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(
            color_to_css(Some(&color), 0.5).unwrap(),
            "rgba(128, 0, 0, 0.500)"
        );
    }

    #[test]
    fn test_color_opacity_multiplies_alpha() {
        let color = Color {
            r: 0.0,
            g: 0.0,
            b: 1.0,
            a: 0.8,
        };
        assert_eq!(
            color_to_css(Some(&color), 0.5).unwrap(),
            "rgba(0, 0, 255, 0.400)"
        );
    }
}
