//! Styled-container extraction (spec §4.6): the background, border, and
//! shadow of a plain `<div>`-like element become a `Shape`/`BgImage`/
//! `Gradient`/`Line` record, emitted under whatever text the same element's
//! children produce rather than consuming the element outright.

use crate::color::parse_color;
use crate::dom::{BorderEdge, ElementNode, NodeId};
use crate::model::{
    BackgroundStyle, BgImageElement, ElementRecord, GradientElement, LineElement, LineStyle,
    ShapeElement, ShapeStyle,
};
use crate::shadow::parse_box_shadow;
use crate::units::{px_to_in, px_to_pt};

const CONTAINER_STYLING_EXEMPT_TAGS: &[&str] = &["table", "img", "svg", "ul", "ol", "li"];

/// Pushes zero or more decoration records for `el`'s own background/border/
/// shadow, independent of whatever leaf kind the element is also classified
/// as (a `<div>` can simultaneously be a styled container and, via its
/// children, host a text or list element drawn on top of it). Every pushed
/// record shares `node_id`, the one that also feeds `rasterize::rasterize_all`.
pub fn emit_container_styling(
    node_id: NodeId,
    el: &ElementNode,
    elements: &mut Vec<ElementRecord>,
    node_ids: &mut Vec<NodeId>,
) {
    if CONTAINER_STYLING_EXEMPT_TAGS.contains(&el.tag.as_str()) {
        return;
    }
    let pushed_before = elements.len();

    let position = super::resolved_position(el);
    let bg = el.computed.background_image.trim();
    if !bg.is_empty() && bg != "none" {
        if bg.to_ascii_lowercase().contains("gradient") {
            elements.push(ElementRecord::Gradient(GradientElement {
                gradient: bg.to_string(),
                position,
                style: None,
            }));
        } else {
            elements.push(ElementRecord::BgImage(BgImageElement { position, style: background_style(el) }));
        }
    }

    let fill = el.computed.has_background_color().then(|| {
        parse_color(&el.computed.background_color).expect("has_background_color implies parseable").hex_string()
    });
    let transparency = parse_color(&el.computed.background_color).map(|c| c.transparency);
    let shadow = parse_box_shadow(&el.computed.box_shadow);

    if el.computed.has_uniform_border() {
        let edge = &el.computed.border_top;
        elements.push(ElementRecord::Shape(ShapeElement {
            position,
            text: String::new(),
            shape: ShapeStyle {
                fill,
                transparency,
                line: Some(LineStyle { color: edge_hex(edge), width_pt: px_to_pt(edge.width_px) }),
                rect_radius_inches: border_radius_in(el),
                shadow,
            },
        }));
    } else if el.computed.has_any_border() {
        if fill.is_some() || shadow.is_some() {
            elements.push(ElementRecord::Shape(ShapeElement {
                position,
                text: String::new(),
                shape: ShapeStyle { fill, transparency, line: None, rect_radius_inches: 0.0, shadow },
            }));
        }
        for (edge, (x1, y1, x2, y2)) in border_edges_with_geometry(el) {
            if edge.is_rendered() {
                elements.push(ElementRecord::Line(LineElement {
                    x1,
                    y1,
                    x2,
                    y2,
                    width_pt: px_to_pt(edge.width_px),
                    color: edge_hex(edge),
                }));
            }
        }
    } else if fill.is_some() || shadow.is_some() {
        elements.push(ElementRecord::Shape(ShapeElement {
            position,
            text: String::new(),
            shape: ShapeStyle { fill, transparency, line: None, rect_radius_inches: border_radius_in(el), shadow },
        }));
    }

    node_ids.extend(std::iter::repeat(node_id).take(elements.len() - pushed_before));
}

fn background_style(el: &ElementNode) -> BackgroundStyle {
    let field = |raw: &str| (!raw.trim().is_empty() && raw.trim() != "none").then(|| raw.to_string());
    BackgroundStyle {
        background_image: field(&el.computed.background_image),
        background_repeat: field(&el.computed.background_repeat),
        background_size: field(&el.computed.background_size),
        background_position: field(&el.computed.background_position),
        background_color: el.computed.has_background_color().then(|| el.computed.background_color.clone()),
    }
}

fn edge_hex(edge: &BorderEdge) -> String {
    parse_color(&edge.color).map(|c| c.hex_string()).unwrap_or_default()
}

fn border_radius_in(el: &ElementNode) -> f64 {
    crate::units::Length::parse(&el.computed.border_radius).and_then(crate::units::Length::to_inches).unwrap_or(0.0)
}

/// Each edge's line is drawn at the edge's own centerline, inset by half its
/// own thickness from the box's outer edge (spec §4.6), not on the raw box
/// boundary.
fn border_edges_with_geometry(el: &ElementNode) -> [(&BorderEdge, (f64, f64, f64, f64)); 4] {
    let r = el.rect;
    let (x, y, w, h) = (px_to_in(r.x), px_to_in(r.y), px_to_in(r.w), px_to_in(r.h));
    let inset = |edge: &BorderEdge| px_to_in(edge.width_px) / 2.0;

    let top = inset(&el.computed.border_top);
    let right = inset(&el.computed.border_right);
    let bottom = inset(&el.computed.border_bottom);
    let left = inset(&el.computed.border_left);

    [
        (&el.computed.border_top, (x, y + top, x + w, y + top)),
        (&el.computed.border_right, (x + w - right, y, x + w - right, y + h)),
        (&el.computed.border_bottom, (x, y + h - bottom, x + w, y + h - bottom)),
        (&el.computed.border_left, (x + left, y, x + left, y + h)),
    ]
}
