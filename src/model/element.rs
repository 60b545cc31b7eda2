use serde::{Deserialize, Serialize};

use super::background::BackgroundStyle;
use super::position::{Margin, Position};
use super::run::{Run, TextContent};
use super::style::{Align, VAlign};
use crate::shadow::Shadow;

/// `object-fit`/`object-position`/`border-radius` carried on an `<img>`
/// record. Present only until the rasterizer decides whether it needs to
/// bake the image (spec §4.8); dropped once baked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
}

impl ImageStyle {
    /// Whether this image needs rasterization per spec §4.8: an SVG source,
    /// a non-`fill` object-fit, a non-centred object-position, or any
    /// border-radius.
    pub fn needs_rasterization(&self, src_is_svg: bool) -> bool {
        src_is_svg
            || self.object_fit.as_deref().is_some_and(|v| v != "fill")
            || self
                .object_position
                .as_deref()
                .is_some_and(|v| v.trim() != "center" && v.trim() != "center center" && v.trim() != "50% 50%")
            || self
                .border_radius
                .as_deref()
                .is_some_and(|v| v.trim() != "0" && v.trim() != "0px")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub src: String,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
}

/// Intermediate record for an inline `<svg>`; always rasterized into an
/// `ImageElement` before emission (invariant 2, spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgElement {
    pub svg: String,
    pub position: Position,
}

/// Intermediate record for an element whose background is an image;
/// always rasterized into an `ImageElement` before emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgImageElement {
    pub position: Position,
    pub style: BackgroundStyle,
}

/// Intermediate record for a CSS gradient; always rasterized into an
/// `ImageElement` before emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientElement {
    pub gradient: String,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BackgroundStyle>,
}

/// A single straight border edge, derived from a non-uniform or
/// image-overlapping border on a styled container (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width_pt: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub color: String,
    pub width_pt: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    pub rect_radius_inches: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

/// The background colour and/or uniform border of a styled container,
/// rendered under whatever text lives on top of it (spec §4.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub position: Position,
    /// Always the empty string; the shape carries no text of its own.
    pub text: String,
    pub shape: ShapeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderSide {
    pub pt: f64,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellOptions {
    pub font_size: f64,
    pub font_face: String,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: Option<Align>,
    pub valign: Option<VAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    pub margin: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Four sides in `[left, right, bottom, top]` order, each `Some` when
    /// that edge has a border.
    pub border: [Option<BorderSide>; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub text: TextContent,
    pub options: CellOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    pub rows: Vec<Vec<Cell>>,
    pub position: Position,
    pub col_w: Vec<f64>,
    pub row_h: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStyle {
    pub font_size: f64,
    pub font_face: String,
    pub color: String,
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    pub para_space_before: f64,
    pub para_space_after: f64,
    pub margin: Margin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListElement {
    pub items: Vec<Run>,
    pub position: Position,
    pub style: ListStyle,
}

/// The HTML tag a text element was extracted from. PowerPoint has no notion
/// of heading levels, but the description preserves the source tag so the
/// emitter and any downstream styling can still tell a title from a body
/// paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTag {
    P,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Div,
    Span,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f64,
    pub font_face: String,
    pub color: String,
    pub align: Align,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    pub para_space_before: f64,
    pub para_space_after: f64,
    pub margin: Margin,
    /// Only meaningful when `text` is a plain string; per-run formatting
    /// carries its own bold/italic/underline instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valign: Option<VAlign>,
}

impl Default for Align {
    fn default() -> Self {
        Align::Left
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub tag: TextTag,
    pub text: TextContent,
    pub position: Position,
    pub style: TextStyle,
}

/// The closed sum type every extracted, rasterized, and emitted element
/// belongs to. Exhaustive matching in the rasterizer and emitter means the
/// compiler refuses an unhandled variant (spec §9 design note).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ElementRecord {
    Image(ImageElement),
    Svg(SvgElement),
    BgImage(BgImageElement),
    Gradient(GradientElement),
    Line(LineElement),
    Shape(ShapeElement),
    Table(TableElement),
    List(ListElement),
    Text(TextElement),
}

impl ElementRecord {
    /// Invariant 3 (spec §3): every position has strictly positive width and
    /// height. Elements with no position concept (none currently) return
    /// `true` vacuously.
    pub fn has_positive_size(&self) -> bool {
        match self.position() {
            Some(pos) => pos.is_positive_size(),
            None => true,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            ElementRecord::Image(e) => Some(e.position),
            ElementRecord::Svg(e) => Some(e.position),
            ElementRecord::BgImage(e) => Some(e.position),
            ElementRecord::Gradient(e) => Some(e.position),
            ElementRecord::Line(_) => None,
            ElementRecord::Shape(e) => Some(e.position),
            ElementRecord::Table(e) => Some(e.position),
            ElementRecord::List(e) => Some(e.position),
            ElementRecord::Text(e) => Some(e.position),
        }
    }

    /// Invariant 2 (spec §3): after rasterization no element is one of the
    /// CSS-only intermediate kinds.
    pub fn is_rasterization_intermediate(&self) -> bool {
        matches!(
            self,
            ElementRecord::Svg(_) | ElementRecord::BgImage(_) | ElementRecord::Gradient(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_needing_rasterization_detects_non_fill_object_fit() {
        let style = ImageStyle {
            object_fit: Some("contain".into()),
            ..Default::default()
        };
        assert!(style.needs_rasterization(false));
    }

    #[test]
    fn image_with_fill_and_no_radius_skips_rasterization() {
        let style = ImageStyle::default();
        assert!(!style.needs_rasterization(false));
    }

    #[test]
    fn svg_and_gradient_are_intermediate() {
        let svg = ElementRecord::Svg(SvgElement { svg: "<svg/>".into(), position: Position { x: 0.0, y: 0.0, w: 1.0, h: 1.0 } });
        assert!(svg.is_rasterization_intermediate());

        let image = ElementRecord::Image(ImageElement {
            src: "a.png".into(),
            position: Position { x: 0.0, y: 0.0, w: 1.0, h: 1.0 },
            style: None,
        });
        assert!(!image.is_rasterization_intermediate());
    }
}
