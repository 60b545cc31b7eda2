//! A reference [`Page`] good enough to drive this crate's own tests without
//! a real browser. `scraper` gives us a DOM tree and attribute access but no
//! layout engine, so the geometry and computed style a real browser would
//! report are supplied by the test as a map of per-`id` overrides; elements
//! with no override get a zeroed box. This mirrors how the teacher keeps its
//! live API client behind a feature flag and exercises everything else
//! against fixtures.

use std::collections::HashMap;
use std::path::Path;

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::browser::{InjectedHandle, Page, ScreenshotOptions, Viewport};
use crate::dom::{BodyMetrics, ComputedStyle, ElementNode, ExtractedDocument, ExtractedNode, NodeData, NodeId};
use crate::errors::Result;
use crate::units::PxRect;

/// The computed box and style a real browser would report for one element,
/// supplied by the test for whichever elements it cares about.
#[derive(Debug, Clone, Default)]
pub struct NodeOverride {
    pub rect: PxRect,
    pub offset_width: f64,
    pub offset_height: f64,
    pub computed: ComputedStyle,
}

pub struct StaticPage {
    html: String,
    overrides: HashMap<String, NodeOverride>,
    body_metrics: BodyMetrics,
    viewport: Viewport,
}

impl StaticPage {
    pub fn new(html: impl Into<String>, body_metrics: BodyMetrics) -> Self {
        StaticPage {
            html: html.into(),
            overrides: HashMap::new(),
            viewport: Viewport {
                width_px: body_metrics.width_px as u32,
                height_px: body_metrics.height_px as u32,
            },
            body_metrics,
        }
    }

    pub fn with_override(mut self, id: impl Into<String>, ov: NodeOverride) -> Self {
        self.overrides.insert(id.into(), ov);
        self
    }
}

impl Page for StaticPage {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.viewport = viewport;
        Ok(())
    }

    fn navigate_file(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn extract(&mut self) -> Result<ExtractedDocument> {
        let document = Html::parse_document(&self.html);
        let mut nodes = Vec::new();
        let root = build_element(document.root_element(), None, &self.overrides, &mut nodes);
        let body = find_tag(&nodes, "body").unwrap_or(root);
        Ok(ExtractedDocument { nodes, root, body, body_metrics: self.body_metrics })
    }

    fn inject_fixed_element(&mut self, _css: &str) -> Result<InjectedHandle> {
        Ok(InjectedHandle(0))
    }

    fn remove_injected_element(&mut self, _handle: InjectedHandle) -> Result<()> {
        Ok(())
    }

    fn screenshot_element(
        &mut self,
        _node_id: NodeId,
        out_path: &Path,
        _options: ScreenshotOptions,
    ) -> Result<()> {
        std::fs::write(out_path, [])?;
        Ok(())
    }
}

fn reserve(out: &mut Vec<ExtractedNode>, parent: Option<NodeId>) -> NodeId {
    let id = out.len();
    out.push(ExtractedNode { id, parent, children: Vec::new(), data: NodeData::Text { content: String::new() } });
    id
}

fn build_element(
    el: ElementRef,
    parent: Option<NodeId>,
    overrides: &HashMap<String, NodeOverride>,
    out: &mut Vec<ExtractedNode>,
) -> NodeId {
    let id = reserve(out, parent);

    let value = el.value();
    let tag = value.name().to_string();
    let id_attr = value.attr("id").map(str::to_string);
    let class_list = value
        .attr("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    let attrs = value.attrs().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    let ov = id_attr.as_ref().and_then(|i| overrides.get(i)).cloned().unwrap_or_default();
    let outer_html = (tag == "svg").then(|| el.html());

    let mut children = Vec::new();
    for child in el.children() {
        match child.value() {
            ScraperNode::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    children.push(build_element(child_el, Some(id), overrides, out));
                }
            }
            ScraperNode::Text(text) => {
                let content = text.to_string();
                if !content.is_empty() {
                    let text_id = reserve(out, Some(id));
                    out[text_id].data = NodeData::Text { content };
                    children.push(text_id);
                }
            }
            _ => {}
        }
    }

    out[id].data = NodeData::Element(ElementNode {
        tag,
        id_attr,
        class_list,
        attrs,
        rect: ov.rect,
        offset_width: ov.offset_width,
        offset_height: ov.offset_height,
        computed: ov.computed,
        pseudo_before_content: None,
        pseudo_after_content: None,
        outer_html,
    });
    out[id].children = children;
    id
}

fn find_tag(nodes: &[ExtractedNode], tag: &str) -> Option<NodeId> {
    nodes.iter().find(|n| n.as_element().map(|e| e.tag == tag).unwrap_or(false)).map(|n| n.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tag_tree_and_text() {
        let mut page = StaticPage::new(
            "<html><body><p id=\"greeting\">Hello <b>world</b></p></body></html>",
            BodyMetrics { width_px: 960.0, height_px: 540.0, scroll_width_px: 960.0, scroll_height_px: 540.0 },
        )
        .with_override(
            "greeting",
            NodeOverride { rect: PxRect { x: 10.0, y: 20.0, w: 100.0, h: 30.0 }, offset_width: 100.0, offset_height: 30.0, computed: ComputedStyle::default() },
        );

        let doc = page.extract().unwrap();
        let body_el = doc.element(doc.body).unwrap();
        assert_eq!(body_el.tag, "body");

        let p_id = find_tag(&doc.nodes, "p").unwrap();
        let p_el = doc.element(p_id).unwrap();
        assert_eq!(p_el.id_attr.as_deref(), Some("greeting"));
        assert_eq!(p_el.rect, PxRect { x: 10.0, y: 20.0, w: 100.0, h: 30.0 });
        assert_eq!(doc.text_content(p_id), "Hello world");
    }

    #[test]
    fn missing_override_defaults_to_zeroed_box() {
        let mut page = StaticPage::new(
            "<html><body><div id=\"box\"></div></body></html>",
            BodyMetrics { width_px: 960.0, height_px: 540.0, scroll_width_px: 960.0, scroll_height_px: 540.0 },
        );
        let doc = page.extract().unwrap();
        let div_id = find_tag(&doc.nodes, "div").unwrap();
        assert_eq!(doc.element(div_id).unwrap().rect, PxRect::default());
    }
}
