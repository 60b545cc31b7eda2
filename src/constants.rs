//! Shared conversion factors and calibration constants for the translation pipeline.

/// Points per CSS pixel (96 DPI assumption, matching every modern browser).
pub const PT_PER_PX: f64 = 0.75;
/// CSS pixels per inch.
pub const PX_PER_IN: f64 = 96.0;
/// English Metric Units per inch, the unit PowerPoint's layout interface uses.
pub const EMU_PER_IN: f64 = 914_400.0;
/// Points per inch.
pub const PT_PER_IN: f64 = 72.0;

/// Body overflow of up to this many pixels is tolerated before becoming a
/// validation error.
pub const OVERFLOW_TOLERANCE_PX: f64 = 1.0;

/// Slide-layout-vs-body-size mismatch of up to this many inches is tolerated.
pub const LAYOUT_MISMATCH_TOLERANCE_IN: f64 = 0.1;

/// Text boxes with a font size above this (in points) are checked against the
/// bottom-margin rule.
pub const TEXT_NEAR_BOTTOM_FONT_SIZE_PT: f64 = 12.0;

/// Minimum clearance, in inches, a large-font text box must keep from the
/// slide's bottom edge.
pub const TEXT_NEAR_BOTTOM_MARGIN_IN: f64 = 0.5;

/// Calibration constant for the single-line text width expansion the emitter
/// applies to compensate for the downstream renderer's systematic width
/// underestimation. A different renderer may need a different factor, or
/// none (spec Open Question) — kept as a named constant rather than inlined
/// so that day is a one-line change.
pub const SINGLE_LINE_WIDTH_EXPANSION: f64 = 0.02;

/// Font families that are single-weight: the renderer has no bold variant for
/// them, so bold emission is suppressed even when the computed weight says
/// otherwise.
pub const SINGLE_WEIGHT_FONT_FAMILIES: &[&str] = &["impact"];

/// Manual bullet glyphs that must not appear at the start of non-`<li>` text.
pub const MANUAL_BULLET_GLYPHS: &[char] =
    &['•', '-', '*', '▪', '▸', '○', '●', '◆', '◇', '■', '□'];

/// Inline formatting tags recognised by the run flattener and by the
/// inline-text-container whitelist.
pub const INLINE_TEXT_WHITELIST: &[&str] =
    &["span", "b", "strong", "i", "em", "u", "code", "br", "small", "sup", "sub", "a"];
