//! `<ul>`/`<ol>` extraction (spec §4.6): each `<li>` becomes a run or short
//! run sequence in one flattened `items` list, with a `bullet` marker on the
//! first run of every item whose `list-style-type` is not `none`.

use crate::color::parse_color;
use crate::dom::{ElementNode, ExtractedDocument, NodeId};
use crate::errors::ValidationError;
use crate::font::normalize_font_family;
use crate::model::{Align, Bullet, ElementRecord, ListElement, ListStyle, Run};
use crate::units::px_to_pt;

pub fn try_extract_list(
    doc: &ExtractedDocument,
    node_id: NodeId,
    el: &ElementNode,
    errors: &mut Vec<ValidationError>,
) -> Option<ElementRecord> {
    if el.tag != "ul" && el.tag != "ol" {
        return None;
    }

    let bulleted = el.computed.list_style_type.trim() != "none";
    let indent_pt = px_to_pt(el.computed.padding_left_px.max(el.computed.margin_left_px));

    let mut items = Vec::new();
    for &child in doc.children(node_id) {
        let Some(item_el) = doc.element(child) else { continue };
        if item_el.tag != "li" {
            continue;
        }

        let (runs, run_errors) = crate::runs::flatten_runs(doc, child, true);
        errors.extend(run_errors);
        let mut runs = crate::model::TextContent::trim_runs(runs);

        if bulleted {
            match runs.first_mut() {
                Some(first) => first.options.bullet = Some(Bullet { indent: indent_pt }),
                None => {
                    let mut r = Run::plain("");
                    r.options.bullet = Some(Bullet { indent: indent_pt });
                    runs.push(r);
                }
            }
        }

        items.extend(runs);
        if doc.has_following_meaningful_sibling(child) {
            let mut br = Run::plain("");
            br.set_break_line();
            items.push(br);
        }
    }

    let style = ListStyle {
        font_size: px_to_pt(el.computed.font_size_px),
        font_face: normalize_font_family(&el.computed.font_family),
        color: parse_color(&el.computed.color).map(|c| c.hex_string()).unwrap_or_default(),
        align: Some(Align::from_css(&el.computed.text_align)),
        line_spacing: super::text::line_height_pt(&el.computed.line_height),
        para_space_before: px_to_pt(el.computed.margin_top_px),
        para_space_after: px_to_pt(el.computed.margin_bottom_px),
        margin: [
            px_to_pt(el.computed.margin_left_px),
            px_to_pt(el.computed.margin_right_px),
            px_to_pt(el.computed.margin_bottom_px),
            px_to_pt(el.computed.margin_top_px),
        ],
    };

    Some(ElementRecord::List(ListElement { items, position: super::resolved_position(el), style }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{BodyMetrics, ComputedStyle};
    use crate::harness::{NodeOverride, StaticPage};
    use crate::units::PxRect;

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
    fn each_item_carries_a_bullet_on_its_first_run() {
        let doc = extract_doc("<html><body><ul><li>one</li><li>two</li></ul></body></html>");
        let ul = find(&doc, "ul");
        let el = doc.element(ul).unwrap();
        let mut errors = Vec::new();
        let record = try_extract_list(&doc, ul, el, &mut errors).unwrap();
        let ElementRecord::List(l) = record else { panic!("expected list") };
        assert!(l.items[0].options.bullet.is_some());
        let break_count = l.items.iter().filter(|r| r.options.break_line == Some(true)).count();
        assert_eq!(break_count, 1);
    }

    #[test]
    fn list_style_none_suppresses_bullet() {
        let mut page = StaticPage::new(
            "<html><body><ul id=\"u\"><li>one</li></ul></body></html>",
            BodyMetrics { width_px: 960.0, height_px: 540.0, scroll_width_px: 960.0, scroll_height_px: 540.0 },
        )
        .with_override(
            "u",
            NodeOverride {
                rect: PxRect::default(),
                offset_width: 0.0,
                offset_height: 0.0,
                computed: ComputedStyle { list_style_type: "none".into(), ..Default::default() },
            },
        );
        let doc = crate::browser::Page::extract(&mut page).unwrap();
        let ul = find(&doc, "ul");
        let el = doc.element(ul).unwrap();
        let mut errors = Vec::new();
        let record = try_extract_list(&doc, ul, el, &mut errors).unwrap();
        let ElementRecord::List(l) = record else { panic!("expected list") };
        assert!(l.items[0].options.bullet.is_none());
    }
}
