use thiserror::Error;

/// Errors surfaced by the host collaborator: the headless browser driving the
/// page, or the filesystem the rasterizer writes into. These fail fast
/// (spec §7 category 4) rather than accumulating with validation errors.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to navigate to page: {0}")]
    Navigate(String),

    #[error("failed to evaluate extraction script in page context: {0}")]
    Evaluate(String),

    #[error("failed to screenshot element: {0}")]
    Screenshot(String),

    #[error("timed out waiting for {0}")]
    Timeout(String),
}

/// A single rule violation gathered by the validator. `Display` produces the
/// human-readable message that ends up, numbered, in the aggregate error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error(
        "body overflows horizontally by {overflow_pt:.1}pt (tolerance is {tolerance_pt:.1}pt)"
    )]
    HorizontalOverflow { overflow_pt: f64, tolerance_pt: f64 },

    #[error(
        "body overflows vertically by {overflow_pt:.1}pt (tolerance is {tolerance_pt:.1}pt); \
         remember the slide needs a 0.5in bottom margin"
    )]
    VerticalOverflow { overflow_pt: f64, tolerance_pt: f64 },

    #[error(
        "slide layout ({layout_in:.3}in) and body size ({body_in:.3}in) disagree on {axis} by \
         {diff_in:.3}in, more than the {tolerance_in:.2}in tolerance"
    )]
    LayoutMismatch {
        axis: &'static str,
        layout_in: f64,
        body_in: f64,
        diff_in: f64,
        tolerance_in: f64,
    },

    #[error(
        "text box (font size {font_size_pt:.1}pt) is only {distance_in:.3}in from the slide \
         bottom, less than the required {margin_in:.2}in"
    )]
    TextNearBottom {
        font_size_pt: f64,
        distance_in: f64,
        margin_in: f64,
    },

    #[error("{pseudo} on <{tag}> has non-empty `content`, which is not supported")]
    PseudoElementContent { tag: String, pseudo: &'static str },

    #[error("<{tag}> has forbidden styling for a text element: {reason}")]
    ForbiddenStylingOnText { tag: String, reason: String },

    #[error("placeholder \"{id}\" has zero width or height")]
    ZeroSizePlaceholder { id: String },

    #[error("<div> contains a raw text node that is not wrapped in a text tag: {snippet:?}")]
    UnwrappedTextInDiv { snippet: String },

    #[error("text starts with a manual bullet glyph {glyph:?}; use a <ul>/<ol> instead")]
    ManualBulletGlyph { glyph: char },

    #[error("<{tag}> has a non-zero horizontal margin, which inline elements cannot express")]
    InlineHorizontalMargin { tag: String },

    #[error("table has no cells")]
    EmptyTable,

    #[error("referenced file does not exist: {path}")]
    MissingFile { path: String },
}

/// Top-level error for the whole pipeline.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// One or more validation errors were found; emission never ran.
    #[error("{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("{0}")]
    Host(#[from] HostError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Formats a batch of validation errors as either a single line (one
/// violation) or the numbered multi-line aggregate spec §6 specifies.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    if errors.len() == 1 {
        return errors[0].to_string();
    }
    let mut out = String::from("Multiple validation errors found:\n");
    for (i, err) in errors.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, err));
    }
    out.pop();
    out
}

pub type Result<T> = std::result::Result<T, TranslateError>;
