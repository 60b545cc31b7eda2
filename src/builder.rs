//! The presentation-builder collaborator (spec §4.10/§6), modeled as a
//! trait pair the caller implements against whatever slide deck library or
//! API they target. `emit` drives it through this narrow interface; this
//! crate ships no concrete implementation, the same way it carries no
//! concrete browser driver (see [`crate::browser`]).

use std::path::Path;

use crate::errors::Result;
use crate::model::{ListElement, Position, ShapeStyle, TableElement, TextElement};

/// The kind of vector shape a `Shape`/`Line` record maps onto. The bounded
/// CSS subset this engine translates only ever needs these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Rect,
    RoundRect,
    Line,
}

/// One slide under construction. Each method corresponds to one kind of
/// `ElementRecord` the emitter walks the validated description for (spec
/// §4.10), plus the description's background and placeholders.
pub trait Slide {
    fn set_background_color(&mut self, hex: &str) -> Result<()>;
    fn set_background_image(&mut self, path: &Path) -> Result<()>;

    fn add_image(&mut self, position: Position, path: &Path) -> Result<()>;
    fn add_shape(&mut self, position: Position, shape_type: ShapeType, style: &ShapeStyle) -> Result<()>;
    fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width_pt: f64, color: &str) -> Result<()>;
    fn add_text(&mut self, text: &TextElement) -> Result<()>;
    fn add_table(&mut self, table: &TableElement) -> Result<()>;
    fn add_list(&mut self, list: &ListElement) -> Result<()>;
    fn add_placeholder(&mut self, id: &str, position: Position) -> Result<()>;
}

/// Owns slide creation within a presentation/deck. `translate` asks for one
/// new slide per HTML page it translates and hands it back when done.
pub trait SlideBuilder {
    type Slide: Slide;

    /// The presentation's configured slide dimensions, in EMUs. The caller
    /// is responsible for pre-configuring a layout matching the HTML body
    /// size to within 0.1in (spec §6); `translate` only checks this, it
    /// never sets it.
    fn layout_size_emu(&self) -> (f64, f64);

    fn new_slide(&mut self) -> Result<Self::Slide>;

    /// Commits a populated slide into the deck and hands it back, so
    /// `translate` can return it to the caller per spec §6's `{slide,
    /// placeholders}` contract.
    fn finish_slide(&mut self, slide: Self::Slide) -> Result<Self::Slide>;
}
