//! The slide description data model (spec §3): a closed sum type of element
//! records, a background, placeholders, and accumulated errors.

mod background;
mod description;
mod element;
mod placeholder;
mod position;
mod run;
mod style;

pub use background::{Background, BackgroundStyle};
pub use description::SlideDescription;
pub use element::{
    BgImageElement, BorderSide, Cell, CellOptions, ElementRecord, GradientElement, ImageElement,
    ImageStyle, LineElement, LineStyle, ListElement, ListStyle, ShapeElement, ShapeStyle,
    SvgElement, TableElement, TextElement, TextStyle, TextTag,
};
pub use placeholder::Placeholder;
pub use position::{Margin, Position};
pub use run::{Bullet, Run, RunOptions, TextContent};
pub use style::{Align, VAlign};
