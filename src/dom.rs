//! The typed shape of what the browser hands back when asked to describe a
//! laid-out page. Per spec §9 design note, the extractor conceptually runs
//! as a single self-contained script inside the page and returns a plain
//! JSON value; these types are that value's shape on the host side.

use crate::units::PxRect;
use serde::Deserialize;
use std::collections::HashMap;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub width_px: f64,
    pub height_px: f64,
    pub scroll_width_px: f64,
    pub scroll_height_px: f64,
}

impl BodyMetrics {
    pub fn overflow_x_px(&self) -> f64 {
        (self.scroll_width_px - self.width_px).max(0.0)
    }

    pub fn overflow_y_px(&self) -> f64 {
        (self.scroll_height_px - self.height_px).max(0.0)
    }
}

/// A single border edge as the browser's computed style reports it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderEdge {
    pub width_px: f64,
    pub style: String,
    pub color: String,
}

impl BorderEdge {
    pub fn is_rendered(&self) -> bool {
        self.width_px > 0.0 && self.style != "none" && self.style != "hidden"
    }
}

/// The subset of `getComputedStyle()` this engine reads. Lengths other than
/// `border_radius` arrive pre-resolved to pixels, matching how a real
/// browser normalises most computed length properties; `border_radius` is
/// kept as the raw specified-style string because its percentage form is
/// only meaningful before resolution (spec §4.1, §8 boundary behaviours).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    pub display: String,
    pub background_color: String,
    pub background_image: String,
    pub background_repeat: String,
    pub background_size: String,
    pub background_position: String,
    pub border_top: BorderEdge,
    pub border_right: BorderEdge,
    pub border_bottom: BorderEdge,
    pub border_left: BorderEdge,
    pub border_radius: String,
    pub box_shadow: String,
    pub color: String,
    pub font_family: String,
    pub font_size_px: f64,
    pub font_weight: f64,
    pub font_style: String,
    pub text_decoration_line: String,
    pub text_align: String,
    pub text_transform: String,
    /// `"normal"` or a px string, mirroring `getComputedStyle().lineHeight`.
    pub line_height: String,
    pub margin_top_px: f64,
    pub margin_right_px: f64,
    pub margin_bottom_px: f64,
    pub margin_left_px: f64,
    pub padding_top_px: f64,
    pub padding_right_px: f64,
    pub padding_bottom_px: f64,
    pub padding_left_px: f64,
    pub transform: String,
    pub writing_mode: String,
    pub object_fit: String,
    pub object_position: String,
    pub list_style_type: String,
}

impl ComputedStyle {
    pub fn has_uniform_border(&self) -> bool {
        let edges = [&self.border_top, &self.border_right, &self.border_bottom, &self.border_left];
        let rendered: Vec<&BorderEdge> = edges.iter().copied().filter(|e| e.is_rendered()).collect();
        if rendered.is_empty() {
            return false;
        }
        rendered.windows(2).all(|w| {
            (w[0].width_px - w[1].width_px).abs() < 0.01 && w[0].color == w[1].color
        }) && edges.iter().all(|e| e.is_rendered())
    }

    pub fn has_any_border(&self) -> bool {
        [&self.border_top, &self.border_right, &self.border_bottom, &self.border_left]
            .iter()
            .any(|e| e.is_rendered())
    }

    pub fn has_background_color(&self) -> bool {
        crate::color::parse_color(&self.background_color)
            .map(|c| c.transparency < 100)
            .unwrap_or(false)
    }

    pub fn has_background_image(&self) -> bool {
        let v = self.background_image.trim();
        !v.is_empty() && v != "none"
    }

    pub fn has_box_shadow(&self) -> bool {
        let v = self.box_shadow.trim();
        !v.is_empty() && v != "none"
    }
}

/// An `<element>` node: the markup, its attributes, and everything the
/// classifier needs to know about its computed box.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub tag: String,
    #[serde(default)]
    pub id_attr: Option<String>,
    #[serde(default)]
    pub class_list: Vec<String>,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    pub rect: PxRect,
    pub offset_width: f64,
    pub offset_height: f64,
    pub computed: ComputedStyle,
    #[serde(default)]
    pub pseudo_before_content: Option<String>,
    #[serde(default)]
    pub pseudo_after_content: Option<String>,
    /// Set only for `<svg>` elements: the serialized `outerHTML`.
    #[serde(default)]
    pub outer_html: Option<String>,
}

impl ElementNode {
    pub fn has_class(&self, name: &str) -> bool {
        self.class_list.iter().any(|c| c == name)
    }

    pub fn is_layout_display(&self) -> bool {
        let d = self.computed.display.trim();
        d == "flex" || d == "grid" || d == "inline-flex" || d == "inline-grid"
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub enum NodeData {
    Element(ElementNode),
    Text { content: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

impl ExtractedNode {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            NodeData::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { content } => Some(content),
            NodeData::Element(_) => None,
        }
    }
}

/// The whole extracted tree plus body-level metrics, as handed back by
/// [`crate::browser::Page::extract`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub nodes: Vec<ExtractedNode>,
    pub root: NodeId,
    pub body: NodeId,
    pub body_metrics: BodyMetrics,
}

impl ExtractedDocument {
    pub fn node(&self, id: NodeId) -> &ExtractedNode {
        &self.nodes[id]
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        self.node(id).as_element()
    }

    /// The parent element, if any and if it is itself an element (not the
    /// document root's text, which never happens, but keeps the return type
    /// honest).
    pub fn parent_element(&self, id: NodeId) -> Option<&ElementNode> {
        self.node(id).parent.and_then(|p| self.element(p))
    }

    /// Children in document order, skipping whitespace-only text nodes that
    /// carry no meaning.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Concatenates and collapses the subtree's text content, the way
    /// `element.textContent` would, for places that just need plain text
    /// (manual-bullet detection, plain table cells).
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        collapse_whitespace(&out)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match &node.data {
            NodeData::Text { content } => out.push_str(content),
            NodeData::Element(_) => {
                for &child in &node.children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// `true` if any descendant (or the node itself) has following
    /// meaningful siblings after it at its own level — used by the
    /// block-aware run flattener. Implemented directly on the tree rather
    /// than duplicated in `runs.rs`.
    pub fn has_following_meaningful_sibling(&self, id: NodeId) -> bool {
        let node = self.node(id);
        let Some(parent) = node.parent else { return false };
        let siblings = &self.node(parent).children;
        let Some(pos) = siblings.iter().position(|&s| s == id) else { return false };
        siblings[pos + 1..].iter().any(|&s| !self.is_whitespace_only(s))
    }

    fn is_whitespace_only(&self, id: NodeId) -> bool {
        match &self.node(id).data {
            NodeData::Text { content } => content.trim().is_empty(),
            NodeData::Element(_) => false,
        }
    }
}

pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_of_whitespace() {
        assert_eq!(collapse_whitespace("  Hello   \n  world  "), "Hello world");
    }

    #[test]
    fn uniform_border_requires_all_four_edges_rendered_and_equal() {
        let edge = BorderEdge { width_px: 2.0, style: "solid".into(), color: "rgb(0,0,0)".into() };
        let mut style = ComputedStyle {
            border_top: edge.clone(),
            border_right: edge.clone(),
            border_bottom: edge.clone(),
            border_left: edge,
            ..Default::default()
        };
        assert!(style.has_uniform_border());

        style.border_left.width_px = 4.0;
        assert!(!style.has_uniform_border());
    }

    #[test]
    fn missing_border_is_not_uniform() {
        assert!(!ComputedStyle::default().has_uniform_border());
    }
}
