//! The classifier/extractor (spec §4.3): a single traversal of the body
//! subtree that turns each element into exactly one kind of element record,
//! a placeholder, or nothing (pure structural wrapper). A `processed` set
//! keeps an element a descendant branch already consumed (a table's cells,
//! a list's items) from also being visited generically on the way back up.

pub mod container;
pub mod list;
pub mod overflow;
pub mod table;
pub mod text;

use std::collections::HashSet;

use crate::dom::{ElementNode, ExtractedDocument, NodeData, NodeId};
use crate::errors::ValidationError;
use crate::model::{ElementRecord, ImageElement, ImageStyle, Placeholder, Position, SvgElement};
use crate::rotation::{extract_rotation_deg, rotation_aware_rect};

pub struct ExtractionResult {
    pub elements: Vec<ElementRecord>,
    /// `node_ids[i]` is the extracted node `elements[i]` came from, in
    /// lockstep so `rasterize::rasterize_all` can screenshot the right
    /// element without re-walking the document.
    pub node_ids: Vec<NodeId>,
    pub placeholders: Vec<Placeholder>,
    pub errors: Vec<ValidationError>,
}

/// Walks the body's children, not the body element itself: the body's own
/// background is always captured separately as the description's
/// `background` (spec §4.2), never as an extra styled-container record.
pub fn extract(doc: &ExtractedDocument) -> ExtractionResult {
    let mut elements = Vec::new();
    let mut node_ids = Vec::new();
    let mut placeholders = Vec::new();
    let mut errors = Vec::new();
    let mut processed = HashSet::new();

    for &child in doc.children(doc.body) {
        visit(doc, child, &mut elements, &mut node_ids, &mut placeholders, &mut errors, &mut processed);
    }

    ExtractionResult { elements, node_ids, placeholders, errors }
}

fn visit(
    doc: &ExtractedDocument,
    node_id: NodeId,
    elements: &mut Vec<ElementRecord>,
    node_ids: &mut Vec<NodeId>,
    placeholders: &mut Vec<Placeholder>,
    errors: &mut Vec<ValidationError>,
    processed: &mut HashSet<NodeId>,
) {
    if processed.contains(&node_id) {
        return;
    }
    let Some(el) = doc.element(node_id) else { return };

    check_pseudo_elements(el, errors);
    check_forbidden_styling(el, errors);

    // A container's own background/border/shadow is independent of
    // whichever leaf kind (if any) its children also resolve to.
    container::emit_container_styling(node_id, el, elements, node_ids);

    if classify(doc, node_id, el, elements, node_ids, placeholders, errors, processed) {
        processed.insert(node_id);
        return;
    }

    check_unwrapped_text_in_div(doc, node_id, el, errors);
    for &child in doc.children(node_id) {
        visit(doc, child, elements, node_ids, placeholders, errors, processed);
    }
}

fn check_unwrapped_text_in_div(doc: &ExtractedDocument, node_id: NodeId, el: &ElementNode, errors: &mut Vec<ValidationError>) {
    if el.tag != "div" {
        return;
    }
    for &child in doc.children(node_id) {
        if let NodeData::Text { content } = &doc.node(child).data {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                errors.push(ValidationError::UnwrappedTextInDiv {
                    snippet: trimmed.chars().take(40).collect(),
                });
            }
        }
    }
}

/// Dispatch order per spec §4.3: placeholder, image, svg, flex/grid child
/// span, table, inline-text div, list, text tag. Returns `true` when the
/// element was consumed as a standalone leaf and should not be descended
/// into again.
fn classify(
    doc: &ExtractedDocument,
    node_id: NodeId,
    el: &ElementNode,
    elements: &mut Vec<ElementRecord>,
    node_ids: &mut Vec<NodeId>,
    placeholders: &mut Vec<Placeholder>,
    errors: &mut Vec<ValidationError>,
    processed: &mut HashSet<NodeId>,
) -> bool {
    if let Some(ph) = try_placeholder(el) {
        placeholders.push(ph);
        return true;
    }
    if let Some(img) = try_image(el) {
        elements.push(img);
        node_ids.push(node_id);
        return true;
    }
    if let Some(svg) = try_svg(el) {
        elements.push(svg);
        node_ids.push(node_id);
        return true;
    }
    if let Some(record) = text::try_extract_flex_grid_span(doc, node_id, el, errors) {
        elements.push(record);
        node_ids.push(node_id);
        return true;
    }
    if el.is_layout_display() {
        for &child in doc.children(node_id) {
            visit(doc, child, elements, node_ids, placeholders, errors, processed);
        }
        return true;
    }
    if let Some(record) = table::try_extract_table(doc, node_id, el, errors) {
        elements.push(record);
        node_ids.push(node_id);
        return true;
    }
    if let Some(record) = text::try_extract_inline_text_div(doc, node_id, el, errors) {
        elements.push(record);
        node_ids.push(node_id);
        return true;
    }
    if let Some(record) = list::try_extract_list(doc, node_id, el, errors) {
        elements.push(record);
        node_ids.push(node_id);
        return true;
    }
    if let Some(record) = text::try_extract_text_tag(doc, node_id, el, errors) {
        elements.push(record);
        node_ids.push(node_id);
        return true;
    }
    false
}

fn check_pseudo_elements(el: &ElementNode, errors: &mut Vec<ValidationError>) {
    let is_meaningful = |content: &str| {
        let c = content.trim();
        !c.is_empty() && c != "\"\"" && c != "none" && c != "''"
    };
    if el.pseudo_before_content.as_deref().is_some_and(is_meaningful) {
        errors.push(ValidationError::PseudoElementContent { tag: el.tag.clone(), pseudo: "::before" });
    }
    if el.pseudo_after_content.as_deref().is_some_and(is_meaningful) {
        errors.push(ValidationError::PseudoElementContent { tag: el.tag.clone(), pseudo: "::after" });
    }
}

const TEXT_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li"];

fn check_forbidden_styling(el: &ElementNode, errors: &mut Vec<ValidationError>) {
    if !TEXT_TAGS.contains(&el.tag.as_str()) {
        return;
    }
    if el.computed.has_background_color() {
        errors.push(ValidationError::ForbiddenStylingOnText {
            tag: el.tag.clone(),
            reason: "background-color is not supported on text elements".into(),
        });
    }
    if el.computed.has_background_image() {
        errors.push(ValidationError::ForbiddenStylingOnText {
            tag: el.tag.clone(),
            reason: "background-image is not supported on text elements".into(),
        });
    }
    if el.computed.has_any_border() {
        errors.push(ValidationError::ForbiddenStylingOnText {
            tag: el.tag.clone(),
            reason: "border is not supported on text elements".into(),
        });
    }
    if el.computed.has_box_shadow() {
        errors.push(ValidationError::ForbiddenStylingOnText {
            tag: el.tag.clone(),
            reason: "box-shadow is not supported on text elements".into(),
        });
    }
}

fn try_placeholder(el: &ElementNode) -> Option<Placeholder> {
    if el.tag == "table" || !el.has_class("placeholder") {
        return None;
    }
    let id = el.id_attr.clone().filter(|id| !id.is_empty())?;
    let position = resolved_position(el);
    Some(Placeholder { id, x: position.x, y: position.y, w: position.w, h: position.h })
}

fn try_image(el: &ElementNode) -> Option<ElementRecord> {
    if el.tag != "img" {
        return None;
    }
    let src = el.attrs.get("src").cloned().unwrap_or_default();
    let style = image_style(el);
    Some(ElementRecord::Image(ImageElement { src, position: resolved_position(el), style }))
}

fn image_style(el: &ElementNode) -> Option<ImageStyle> {
    let style = ImageStyle {
        object_fit: non_default(&el.computed.object_fit, "fill"),
        object_position: non_default(&el.computed.object_position, "center"),
        border_radius: non_default(&el.computed.border_radius, "0px"),
    };
    (style.object_fit.is_some() || style.object_position.is_some() || style.border_radius.is_some())
        .then_some(style)
}

fn try_svg(el: &ElementNode) -> Option<ElementRecord> {
    if el.tag != "svg" {
        return None;
    }
    let svg = el.outer_html.clone().unwrap_or_default();
    Some(ElementRecord::Svg(SvgElement { svg, position: resolved_position(el) }))
}

fn non_default(value: &str, default: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() || v.eq_ignore_ascii_case(default) || (default == "0px" && v == "0") {
        None
    } else {
        Some(v.to_string())
    }
}

/// Applies unit conversion and rotation-aware bounding-box correction to an
/// element's computed box (spec §4.1).
pub(crate) fn resolved_position(el: &ElementNode) -> Position {
    let rotation = extract_rotation_deg(&el.computed.transform, &el.computed.writing_mode);
    rotation_aware_rect(el.rect, el.offset_width, el.offset_height, rotation).to_position()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::BodyMetrics;
    use crate::harness::StaticPage;

    fn extract_doc(html: &str) -> ExtractedDocument {
        let mut page = StaticPage::new(
            html,
            BodyMetrics { width_px: 1280.0, height_px: 720.0, scroll_width_px: 1280.0, scroll_height_px: 720.0 },
        );
        crate::browser::Page::extract(&mut page).unwrap()
    }

    #[test]
    fn simple_paragraph_becomes_one_text_element() {
        let doc = extract_doc("<html><body><p>Hello</p></body></html>");
        let result = extract(&doc);
        assert_eq!(result.elements.len(), 1);
        assert!(matches!(result.elements[0], ElementRecord::Text(_)));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn image_tag_becomes_image_element() {
        let doc = extract_doc("<html><body><img src=\"a.png\"></body></html>");
        let result = extract(&doc);
        assert_eq!(result.elements.len(), 1);
        let ElementRecord::Image(img) = &result.elements[0] else { panic!("expected image") };
        assert_eq!(img.src, "a.png");
    }

    #[test]
    fn table_and_surrounding_paragraph_both_extracted() {
        let doc = extract_doc(
            "<html><body><p>caption</p><table><tr><td>a</td></tr></table></body></html>",
        );
        let result = extract(&doc);
        assert_eq!(result.elements.len(), 2);
        assert!(result.elements.iter().any(|e| matches!(e, ElementRecord::Text(_))));
        assert!(result.elements.iter().any(|e| matches!(e, ElementRecord::Table(_))));
    }

    #[test]
    fn placeholder_div_is_not_an_element() {
        let doc = extract_doc("<html><body><div id=\"chart1\" class=\"placeholder\"></div></body></html>");
        let result = extract(&doc);
        assert_eq!(result.placeholders.len(), 1);
        assert_eq!(result.placeholders[0].id, "chart1");
        assert!(result.elements.is_empty());
    }

    #[test]
    fn flex_child_span_becomes_independent_text_block() {
        use crate::dom::ComputedStyle;
        use crate::harness::NodeOverride;

        let mut page = StaticPage::new(
            "<html><body><div id=\"row\"><span>first</span><span>second</span></div></body></html>",
            BodyMetrics { width_px: 1280.0, height_px: 720.0, scroll_width_px: 1280.0, scroll_height_px: 720.0 },
        )
        .with_override(
            "row",
            NodeOverride { computed: ComputedStyle { display: "flex".into(), ..Default::default() }, ..Default::default() },
        );
        let doc = crate::browser::Page::extract(&mut page).unwrap();

        let result = extract(&doc);
        assert_eq!(result.elements.len(), 2);
        assert!(result.elements.iter().all(|e| matches!(e, ElementRecord::Text(t) if t.tag == crate::model::TextTag::Span)));
    }

    #[test]
    fn plain_span_child_of_block_div_is_not_a_span_text_block() {
        let doc = extract_doc("<html><body><div><span>hi</span></div></body></html>");
        let result = extract(&doc);
        assert!(!result.elements.iter().any(|e| matches!(e, ElementRecord::Text(t) if t.tag == crate::model::TextTag::Span)));
    }

    fn bare_element(tag: &str, computed: crate::dom::ComputedStyle) -> ElementNode {
        ElementNode {
            tag: tag.into(),
            id_attr: None,
            class_list: Vec::new(),
            attrs: Default::default(),
            rect: crate::units::PxRect::default(),
            offset_width: 0.0,
            offset_height: 0.0,
            computed,
            pseudo_before_content: None,
            pseudo_after_content: None,
            outer_html: None,
        }
    }

    #[test]
    fn background_color_on_list_item_is_forbidden() {
        use crate::dom::ComputedStyle;
        let el = bare_element("li", ComputedStyle { background_color: "rgb(10,20,30)".into(), ..Default::default() });
        let mut errors = Vec::new();
        check_forbidden_styling(&el, &mut errors);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ForbiddenStylingOnText { reason, .. } if reason.contains("background-color"))));
    }

    #[test]
    fn border_on_heading_is_forbidden() {
        use crate::dom::{BorderEdge, ComputedStyle};
        let el = bare_element(
            "h1",
            ComputedStyle {
                border_top: BorderEdge { width_px: 1.0, color: "black".into(), style: "solid".into() },
                ..Default::default()
            },
        );
        let mut errors = Vec::new();
        check_forbidden_styling(&el, &mut errors);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ForbiddenStylingOnText { reason, .. } if reason.contains("border"))));
    }

    #[test]
    fn flex_display_on_heading_is_not_flagged_by_forbidden_styling() {
        use crate::dom::ComputedStyle;
        let el = bare_element("h1", ComputedStyle { display: "flex".into(), ..Default::default() });
        let mut errors = Vec::new();
        check_forbidden_styling(&el, &mut errors);
        assert!(errors.is_empty());
    }
}
