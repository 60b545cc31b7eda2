//! The inline run flattener (spec §4.2/§4.4): walks a text element's
//! children and turns inline markup (`<b>`, `<span style="color:...">`,
//! `<br>`, ...) into a flat `Run[]`, the shape every downstream text/list/
//! table-cell extractor needs before it can decide between `Run[]` and a
//! single plain string.

use crate::color::parse_color;
use crate::constants::INLINE_TEXT_WHITELIST;
use crate::dom::{ElementNode, ExtractedDocument, NodeData, NodeId};
use crate::errors::ValidationError;
use crate::font::resolve_bold;
use crate::model::{Run, RunOptions};
use crate::units::px_to_pt;

/// Flattens the inline content of `node_id`'s children into a run list.
///
/// In `block_aware` mode, direct children that are not on the inline
/// whitelist are treated as block-level paragraphs rather than malformed
/// inline wrappers: each is walked for its own runs, and if it has a
/// following meaningful sibling a line break is inserted after it. This is
/// how a styled container holding several `<p>` children collapses into one
/// text body (spec §4.6).
pub fn flatten_runs(
    doc: &ExtractedDocument,
    node_id: NodeId,
    block_aware: bool,
) -> (Vec<Run>, Vec<ValidationError>) {
    let mut runs = Vec::new();
    let mut errors = Vec::new();

    for &child in doc.children(node_id) {
        walk(doc, child, &RunOptions::default(), block_aware, &mut runs, &mut errors);
    }

    (runs, errors)
}

fn walk(
    doc: &ExtractedDocument,
    node_id: NodeId,
    inherited: &RunOptions,
    block_aware: bool,
    runs: &mut Vec<Run>,
    errors: &mut Vec<ValidationError>,
) {
    let node = doc.node(node_id);
    match &node.data {
        NodeData::Text { content } => {
            let text = collapse_runs(content);
            if !text.is_empty() {
                runs.push(Run { text, options: inherited.clone() });
            }
        }
        NodeData::Element(el) => walk_element(doc, node_id, el, inherited, block_aware, runs, errors),
    }
}

fn walk_element(
    doc: &ExtractedDocument,
    node_id: NodeId,
    el: &ElementNode,
    inherited: &RunOptions,
    block_aware: bool,
    runs: &mut Vec<Run>,
    errors: &mut Vec<ValidationError>,
) {
    if el.tag == "br" {
        let mut r = Run::plain("");
        r.options = inherited.clone();
        r.set_break_line();
        runs.push(r);
        return;
    }

    // Flex/grid containers encountered mid-run are classified as their own
    // standalone elements elsewhere in extraction; their content is not
    // part of this run sequence.
    if el.is_layout_display() {
        return;
    }

    let whitelisted = INLINE_TEXT_WHITELIST.contains(&el.tag.as_str());

    if !whitelisted && block_aware {
        for &child in &doc.node(node_id).children {
            walk(doc, child, inherited, false, runs, errors);
        }
        if doc.has_following_meaningful_sibling(node_id) {
            let mut r = Run::plain("");
            r.options = inherited.clone();
            r.set_break_line();
            runs.push(r);
        }
        return;
    }

    if el.computed.margin_left_px > 0.0 || el.computed.margin_right_px > 0.0 {
        errors.push(ValidationError::InlineHorizontalMargin { tag: el.tag.clone() });
    }

    let options = merge_options(inherited, el);
    for &child in &doc.node(node_id).children {
        walk(doc, child, &options, block_aware, runs, errors);
    }
}

fn merge_options(inherited: &RunOptions, el: &ElementNode) -> RunOptions {
    let mut options = inherited.clone();
    let tag = el.tag.as_str();

    if tag == "b" || tag == "strong" || resolve_bold(el.computed.font_weight, &el.computed.font_family) {
        options.bold = Some(true);
    }
    if tag == "i" || tag == "em" || el.computed.font_style == "italic" {
        options.italic = Some(true);
    }
    if tag == "u" || el.computed.text_decoration_line.contains("underline") {
        options.underline = Some(true);
    }
    if let Some(color) = parse_color(&el.computed.color) {
        options.color = Some(color.hex_string());
        options.transparency = Some(color.transparency);
    }
    if el.computed.font_size_px > 0.0 {
        options.font_size = Some(px_to_pt(el.computed.font_size_px));
    }

    options
}

/// Collapses runs of whitespace to a single space without trimming the
/// ends — end-trimming is [`crate::model::TextContent::trim_runs`]'s job,
/// applied once to the whole flattened sequence rather than per text node.
fn collapse_runs(s: &str) -> String {
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
    out
}
