//! `<table>` extraction (spec §4.5): rows and cells in document order, with
//! column/row sizing derived from the first row's per-cell rects (spec
//! §4.5 line 126) and per-cell styling.

use crate::color::parse_color;
use crate::dom::{BorderEdge, ElementNode, ExtractedDocument, NodeId};
use crate::errors::ValidationError;
use crate::font::{normalize_font_family, resolve_bold};
use crate::model::{Align, BorderSide, Cell, CellOptions, ElementRecord, TableElement};
use crate::units::{px_to_in, px_to_pt};

pub fn try_extract_table(
    doc: &ExtractedDocument,
    node_id: NodeId,
    el: &ElementNode,
    errors: &mut Vec<ValidationError>,
) -> Option<ElementRecord> {
    if el.tag != "table" {
        return None;
    }

    let mut rows_raw = Vec::new();
    collect_rows(doc, node_id, &mut rows_raw);

    if rows_raw.is_empty() || rows_raw.iter().all(|(_, cells)| cells.is_empty()) {
        errors.push(ValidationError::EmptyTable);
        return Some(ElementRecord::Table(TableElement {
            rows: Vec::new(),
            position: super::resolved_position(el),
            col_w: Vec::new(),
            row_h: Vec::new(),
        }));
    }

    let col_w = column_widths(doc, &rows_raw, el.rect.w);
    let row_h = row_heights(doc, &rows_raw, el.rect.h);

    let rows = rows_raw
        .into_iter()
        .map(|(_, cells)| cells.into_iter().map(|cell_id| build_cell(doc, cell_id, errors)).collect())
        .collect();

    Some(ElementRecord::Table(TableElement { rows, position: super::resolved_position(el), col_w, row_h }))
}

fn collect_rows(doc: &ExtractedDocument, node_id: NodeId, out: &mut Vec<(NodeId, Vec<NodeId>)>) {
    for &child in doc.children(node_id) {
        let Some(e) = doc.element(child) else { continue };
        match e.tag.as_str() {
            "thead" | "tbody" | "tfoot" => collect_rows(doc, child, out),
            "tr" => {
                let cells = doc
                    .children(child)
                    .iter()
                    .copied()
                    .filter(|&c| matches!(doc.element(c).map(|e| e.tag.as_str()), Some("td") | Some("th")))
                    .collect();
                out.push((child, cells));
            }
            _ => {}
        }
    }
}

fn colspan_of(el: &ElementNode) -> usize {
    el.attrs.get("colspan").and_then(|v| v.parse().ok()).filter(|&n: &usize| n > 0).unwrap_or(1)
}

/// Each first-row cell's rect width divided by its colspan, repeated once
/// per spanned column, then scaled so the array sums to the table's own
/// rect width (spec §4.5 line 126).
fn column_widths(doc: &ExtractedDocument, rows: &[(NodeId, Vec<NodeId>)], table_width_px: f64) -> Vec<f64> {
    let Some((_, first_row)) = rows.iter().find(|(_, cells)| !cells.is_empty()) else {
        return Vec::new();
    };
    let mut widths_px = Vec::new();
    for &cell_id in first_row {
        let Some(cell) = doc.element(cell_id) else { continue };
        let colspan = colspan_of(cell);
        let per_column = cell.rect.w / colspan as f64;
        widths_px.extend(std::iter::repeat(per_column).take(colspan));
    }
    scale_to_sum(widths_px, table_width_px)
}

/// Each row's own rect height, scaled so the array sums to the table's own
/// rect height (spec §4.5 line 126).
fn row_heights(doc: &ExtractedDocument, rows: &[(NodeId, Vec<NodeId>)], table_height_px: f64) -> Vec<f64> {
    let heights_px = rows.iter().map(|(row_id, _)| doc.element(*row_id).map(|r| r.rect.h).unwrap_or(0.0)).collect();
    scale_to_sum(heights_px, table_height_px)
}

/// Scales a raw px array so it sums to `target_px`, then converts to inches.
/// Falls back to an even split if the raw array sums to zero (no usable
/// per-cell rects to scale from).
fn scale_to_sum(raw_px: Vec<f64>, target_px: f64) -> Vec<f64> {
    let count = raw_px.len();
    if count == 0 {
        return Vec::new();
    }
    let raw_sum: f64 = raw_px.iter().sum();
    if raw_sum <= 0.0 {
        return uniform_split(target_px, count);
    }
    let scale = target_px / raw_sum;
    raw_px.into_iter().map(|v| px_to_in(v * scale)).collect()
}

fn build_cell(doc: &ExtractedDocument, cell_id: NodeId, errors: &mut Vec<ValidationError>) -> Cell {
    let el = doc.element(cell_id).expect("collect_rows only yields element ids");

    let (runs, run_errors) = crate::runs::flatten_runs(doc, cell_id, true);
    errors.extend(run_errors);
    let runs = crate::model::TextContent::trim_runs(runs);
    let text = super::text::to_text_content(runs);

    let colspan = el.attrs.get("colspan").and_then(|v| v.parse().ok()).filter(|&n| n > 1);
    let rowspan = el.attrs.get("rowspan").and_then(|v| v.parse().ok()).filter(|&n| n > 1);

    let options = CellOptions {
        font_size: px_to_pt(el.computed.font_size_px),
        font_face: normalize_font_family(&el.computed.font_family),
        color: parse_color(&el.computed.color).map(|c| c.hex_string()).unwrap_or_default(),
        bold: resolve_bold(el.computed.font_weight, &el.computed.font_family),
        italic: el.computed.font_style == "italic",
        underline: el.computed.text_decoration_line.contains("underline"),
        align: Some(Align::from_css(&el.computed.text_align)),
        valign: None,
        line_spacing: super::text::line_height_pt(&el.computed.line_height),
        margin: [
            px_to_pt(el.computed.padding_left_px),
            px_to_pt(el.computed.padding_right_px),
            px_to_pt(el.computed.padding_bottom_px),
            px_to_pt(el.computed.padding_top_px),
        ],
        fill: el
            .computed
            .has_background_color()
            .then(|| parse_color(&el.computed.background_color).expect("has_background_color implies parseable").hex_string()),
        border: cell_borders(el),
        colspan,
        rowspan,
        transparency: parse_color(&el.computed.background_color).map(|c| c.transparency),
    };

    Cell { text, options }
}

fn cell_borders(el: &ElementNode) -> [Option<BorderSide>; 4] {
    let side = |edge: &BorderEdge| {
        edge.is_rendered().then(|| BorderSide {
            pt: px_to_pt(edge.width_px),
            color: parse_color(&edge.color).map(|c| c.hex_string()).unwrap_or_default(),
        })
    };
    [
        side(&el.computed.border_left),
        side(&el.computed.border_right),
        side(&el.computed.border_bottom),
        side(&el.computed.border_top),
    ]
}

fn uniform_split(total_px: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    vec![px_to_in(total_px) / count as f64; count]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::BodyMetrics;
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
    fn two_by_two_table_has_uniform_columns() {
        let doc = extract_doc(
            "<html><body><table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table></body></html>",
        );
        let table_id = find(&doc, "table");
        let el = doc.element(table_id).unwrap();
        let mut errors = Vec::new();
        let record = try_extract_table(&doc, table_id, el, &mut errors).unwrap();
        let ElementRecord::Table(t) = record else { panic!("expected table") };
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[0].len(), 2);
        assert_eq!(t.col_w.len(), 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn table_with_no_cells_is_flagged_empty() {
        let doc = extract_doc("<html><body><table></table></body></html>");
        let table_id = find(&doc, "table");
        let el = doc.element(table_id).unwrap();
        let mut errors = Vec::new();
        try_extract_table(&doc, table_id, el, &mut errors);
        assert_eq!(errors, vec![ValidationError::EmptyTable]);
    }

    #[test]
    fn colspan_of_one_is_not_recorded() {
        let doc = extract_doc("<html><body><table><tr><td colspan=\"1\">a</td></tr></table></body></html>");
        let table_id = find(&doc, "table");
        let el = doc.element(table_id).unwrap();
        let mut errors = Vec::new();
        let record = try_extract_table(&doc, table_id, el, &mut errors).unwrap();
        let ElementRecord::Table(t) = record else { panic!("expected table") };
        assert_eq!(t.rows[0][0].options.colspan, None);
    }

    #[test]
    fn column_widths_follow_first_row_cell_rects() {
        use crate::harness::NodeOverride;
        use crate::units::PxRect;

        let mut page = StaticPage::new(
            "<html><body><table id=\"t\"><tr><td id=\"c1\">a</td><td id=\"c2\">b</td></tr><tr><td>c</td><td>d</td></tr></table></body></html>",
            BodyMetrics { width_px: 960.0, height_px: 540.0, scroll_width_px: 960.0, scroll_height_px: 540.0 },
        )
        .with_override("t", NodeOverride { rect: PxRect { x: 0.0, y: 0.0, w: 300.0, h: 100.0 }, ..Default::default() })
        .with_override("c1", NodeOverride { rect: PxRect { x: 0.0, y: 0.0, w: 100.0, h: 50.0 }, ..Default::default() })
        .with_override("c2", NodeOverride { rect: PxRect { x: 100.0, y: 0.0, w: 200.0, h: 50.0 }, ..Default::default() });

        let doc = crate::browser::Page::extract(&mut page).unwrap();
        let table_id = find(&doc, "table");
        let el = doc.element(table_id).unwrap();
        let mut errors = Vec::new();
        let record = try_extract_table(&doc, table_id, el, &mut errors).unwrap();
        let ElementRecord::Table(t) = record else { panic!("expected table") };

        assert_eq!(t.col_w.len(), 2);
        assert!((t.col_w[0] - px_to_in(100.0)).abs() < 1e-9);
        assert!((t.col_w[1] - px_to_in(200.0)).abs() < 1e-9);
    }
}
