//! Translates a rendered HTML document into a declarative slide description
//! and drives it into a presentation builder. See `translate::translate` for
//! the entry point.

pub mod browser;
pub mod builder;
pub mod color;
pub mod constants;
pub mod dom;
pub mod emit;
pub mod errors;
pub mod extract;
pub mod font;
pub mod model;
pub mod rasterize;
pub mod rotation;
pub mod runs;
pub mod shadow;
pub mod translate;
pub mod units;
pub mod validate;

#[cfg(any(test, feature = "harness"))]
pub mod harness;

pub use errors::{Result, TranslateError, ValidationError};
pub use model::SlideDescription;
pub use translate::{translate, TranslateOptions, TranslateOutput};
