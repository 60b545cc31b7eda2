//! Text-tag and inline-text-`<div>` extraction (spec §4.4): flattens a
//! text-bearing element's inline content into a `TextElement`, deciding
//! between a single plain string and a styled `Run[]`.

use crate::color::parse_color;
use crate::constants::{INLINE_TEXT_WHITELIST, MANUAL_BULLET_GLYPHS};
use crate::dom::{ElementNode, ExtractedDocument, NodeData, NodeId};
use crate::errors::ValidationError;
use crate::font::{normalize_font_family, resolve_bold};
use crate::model::{Align, ElementRecord, Run, RunOptions, TextContent, TextElement, TextStyle, TextTag};
use crate::rotation::extract_rotation_deg;
use crate::units::{px_to_pt, Length};

const TEXT_TAGS: &[(&str, TextTag)] = &[
    ("p", TextTag::P),
    ("h1", TextTag::H1),
    ("h2", TextTag::H2),
    ("h3", TextTag::H3),
    ("h4", TextTag::H4),
    ("h5", TextTag::H5),
    ("h6", TextTag::H6),
];

pub fn try_extract_text_tag(
    doc: &ExtractedDocument,
    node_id: NodeId,
    el: &ElementNode,
    errors: &mut Vec<ValidationError>,
) -> Option<ElementRecord> {
    let tag = TEXT_TAGS.iter().find(|(name, _)| *name == el.tag).map(|(_, t)| *t)?;
    Some(build_text_element(doc, node_id, el, tag, errors))
}

/// A `<div>` whose children are all text or whitelisted inline wrappers
/// behaves like a paragraph rather than a layout container (spec §4.3
/// step "inline-text div").
pub fn try_extract_inline_text_div(
    doc: &ExtractedDocument,
    node_id: NodeId,
    el: &ElementNode,
    errors: &mut Vec<ValidationError>,
) -> Option<ElementRecord> {
    if el.tag != "div" {
        return None;
    }
    let children = doc.children(node_id);
    if children.is_empty() || !children.iter().all(|&c| is_inline_child(doc, c)) {
        return None;
    }
    Some(build_text_element(doc, node_id, el, TextTag::Div, errors))
}

/// A `<span>` whose parent is a flex/grid container is an independent text
/// block, not inline content of anything (spec §4.3 step 6). Reached only
/// for spans visited directly as a flex/grid container's child, since a
/// span already absorbed into a text tag's run flattening is never visited
/// on its own (spec §4.3's mark-processed-and-return short-circuit).
pub fn try_extract_flex_grid_span(
    doc: &ExtractedDocument,
    node_id: NodeId,
    el: &ElementNode,
    errors: &mut Vec<ValidationError>,
) -> Option<ElementRecord> {
    if el.tag != "span" {
        return None;
    }
    if !doc.parent_element(node_id).is_some_and(ElementNode::is_layout_display) {
        return None;
    }
    Some(build_text_element(doc, node_id, el, TextTag::Span, errors))
}

fn is_inline_child(doc: &ExtractedDocument, node_id: NodeId) -> bool {
    match &doc.node(node_id).data {
        NodeData::Text { .. } => true,
        NodeData::Element(e) => INLINE_TEXT_WHITELIST.contains(&e.tag.as_str()),
    }
}

fn build_text_element(
    doc: &ExtractedDocument,
    node_id: NodeId,
    el: &ElementNode,
    tag: TextTag,
    errors: &mut Vec<ValidationError>,
) -> ElementRecord {
    let (runs, run_errors) = crate::runs::flatten_runs(doc, node_id, false);
    errors.extend(run_errors);
    let runs = TextContent::trim_runs(runs);
    check_manual_bullet(&runs, errors);

    ElementRecord::Text(TextElement {
        tag,
        text: to_text_content(runs),
        position: super::resolved_position(el),
        style: build_text_style(el),
    })
}

/// Collapses a run sequence to a single plain string when none of the runs
/// carry any inline formatting; otherwise keeps the `Run[]` shape (spec
/// §4.4).
pub(crate) fn to_text_content(runs: Vec<Run>) -> TextContent {
    match runs.len() {
        0 => TextContent::Plain(String::new()),
        1 if runs[0].options == RunOptions::default() => {
            TextContent::Plain(runs.into_iter().next().expect("len checked").text)
        }
        _ => TextContent::Runs(runs),
    }
}

fn check_manual_bullet(runs: &[Run], errors: &mut Vec<ValidationError>) {
    let Some(first) = runs.first() else { return };
    let Some(glyph) = first.text.trim_start().chars().next() else { return };
    if MANUAL_BULLET_GLYPHS.contains(&glyph) {
        errors.push(ValidationError::ManualBulletGlyph { glyph });
    }
}

fn build_text_style(el: &ElementNode) -> TextStyle {
    TextStyle {
        font_size: px_to_pt(el.computed.font_size_px),
        font_face: normalize_font_family(&el.computed.font_family),
        color: parse_color(&el.computed.color).map(|c| c.hex_string()).unwrap_or_default(),
        align: Align::from_css(&el.computed.text_align),
        line_spacing: line_height_pt(&el.computed.line_height),
        para_space_before: px_to_pt(el.computed.margin_top_px),
        para_space_after: px_to_pt(el.computed.margin_bottom_px),
        margin: [
            px_to_pt(el.computed.margin_left_px),
            px_to_pt(el.computed.margin_right_px),
            px_to_pt(el.computed.margin_bottom_px),
            px_to_pt(el.computed.margin_top_px),
        ],
        bold: resolve_bold(el.computed.font_weight, &el.computed.font_family).then_some(true),
        italic: (el.computed.font_style == "italic").then_some(true),
        underline: el.computed.text_decoration_line.contains("underline").then_some(true),
        rotate: extract_rotation_deg(&el.computed.transform, &el.computed.writing_mode),
        transparency: parse_color(&el.computed.color).map(|c| c.transparency),
        valign: None,
    }
}

pub(crate) fn line_height_pt(raw: &str) -> Option<f64> {
    if raw.trim() == "normal" || raw.trim().is_empty() {
        return None;
    }
    Length::parse(raw).and_then(Length::to_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{BodyMetrics, ComputedStyle};
    use crate::harness::StaticPage;

    fn extract_doc(html: &str) -> ExtractedDocument {
        let mut page = StaticPage::new(
            html,
            BodyMetrics { width_px: 960.0, height_px: 540.0, scroll_width_px: 960.0, scroll_height_px: 540.0 },
        );
        crate::browser::Page::extract(&mut page).unwrap()
    }

    fn find(doc: &ExtractedDocument, tag: &str) -> NodeId {
        doc.nodes.iter().find(|n| n.as_element().map(|e| e.tag == tag).unwrap_or(false)).unwrap().id
    }

    #[test]
    fn plain_paragraph_becomes_plain_string() {
        let doc = extract_doc("<html><body><p>Hello there</p></body></html>");
        let p = find(&doc, "p");
        let el = doc.element(p).unwrap();
        let mut errors = Vec::new();
        let record = try_extract_text_tag(&doc, p, el, &mut errors).unwrap();
        let ElementRecord::Text(t) = record else { panic!("expected text") };
        assert_eq!(t.text, TextContent::Plain("Hello there".into()));
    }

    #[test]
    fn formatted_paragraph_becomes_runs() {
        let doc = extract_doc("<html><body><p>Hello <b>there</b></p></body></html>");
        let p = find(&doc, "p");
        let el = doc.element(p).unwrap();
        let mut errors = Vec::new();
        let record = try_extract_text_tag(&doc, p, el, &mut errors).unwrap();
        let ElementRecord::Text(t) = record else { panic!("expected text") };
        assert!(matches!(t.text, TextContent::Runs(_)));
    }

    #[test]
    fn manual_bullet_glyph_is_flagged() {
        let doc = extract_doc("<html><body><p>• not a real bullet</p></body></html>");
        let p = find(&doc, "p");
        let el = doc.element(p).unwrap();
        let mut errors = Vec::new();
        try_extract_text_tag(&doc, p, el, &mut errors);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ManualBulletGlyph { .. })));
    }

    #[test]
    fn div_with_only_inline_children_is_text() {
        let doc = extract_doc("<html><body><div>Hello <span>world</span></div></body></html>");
        let div = find(&doc, "div");
        let el = doc.element(div).unwrap();
        let mut errors = Vec::new();
        let record = try_extract_inline_text_div(&doc, div, el, &mut errors).unwrap();
        assert!(matches!(record, ElementRecord::Text(_)));
    }

    #[test]
    fn div_with_block_child_is_not_inline_text() {
        let doc = extract_doc("<html><body><div><p>one</p></div></body></html>");
        let div = find(&doc, "div");
        let el = doc.element(div).unwrap();
        let mut errors = Vec::new();
        assert!(try_extract_inline_text_div(&doc, div, el, &mut errors).is_none());
    }

    #[test]
    fn line_height_normal_is_none() {
        assert_eq!(line_height_pt("normal"), None);
        assert!(line_height_pt("24px").is_some());
    }

    #[test]
    fn zero_size_default_computed_style_is_accepted() {
        let _ = ComputedStyle::default();
    }
}
