//! Length conversions between the units the browser reports (mostly px) and
//! the units the slide description uses (inches for position/size, points
//! for font sizes and offsets).

use crate::constants::{EMU_PER_IN, PT_PER_IN, PT_PER_PX, PX_PER_IN};

/// A CSS length carrying its original unit, as parsed from a raw computed- or
/// specified-style string (e.g. `"12px"`, `"1.5pt"`, `"50%"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Pt(f64),
    In(f64),
    /// A bare percentage, meaningful only relative to some other dimension
    /// (e.g. `border-radius: 50%`); the caller resolves it.
    Percent(f64),
}

impl Length {
    /// Parses a CSS length string such as `"12px"`, `"1.5pt"`, `"0.2in"`, or
    /// `"50%"`. Returns `None` for unparsable or unitless (other than `0`)
    /// values.
    pub fn parse(raw: &str) -> Option<Length> {
        let raw = raw.trim();
        if raw == "0" {
            return Some(Length::Px(0.0));
        }
        let (num_part, unit) = raw.split_at(
            raw.find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')
                .unwrap_or(raw.len()),
        );
        let magnitude: f64 = num_part.parse().ok()?;
        match unit {
            "px" => Some(Length::Px(magnitude)),
            "pt" => Some(Length::Pt(magnitude)),
            "in" => Some(Length::In(magnitude)),
            "%" => Some(Length::Percent(magnitude)),
            "" => None,
            _ => None,
        }
    }

    /// Converts to inches. Percentages cannot be converted without a base and
    /// return `None`.
    pub fn to_inches(self) -> Option<f64> {
        match self {
            Length::Px(v) => Some(px_to_in(v)),
            Length::Pt(v) => Some(pt_to_in(v)),
            Length::In(v) => Some(v),
            Length::Percent(_) => None,
        }
    }

    /// Converts to points. Percentages cannot be converted without a base and
    /// return `None`.
    pub fn to_points(self) -> Option<f64> {
        match self {
            Length::Px(v) => Some(px_to_pt(v)),
            Length::Pt(v) => Some(v),
            Length::In(v) => Some(v * PT_PER_IN),
            Length::Percent(_) => None,
        }
    }
}

/// A bounding box in CSS pixels, as `getBoundingClientRect()` would report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PxRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PxRect {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Converts to an inches-based [`crate::model::Position`].
    pub fn to_position(&self) -> crate::model::Position {
        crate::model::Position {
            x: px_to_in(self.x),
            y: px_to_in(self.y),
            w: px_to_in(self.w),
            h: px_to_in(self.h),
        }
    }
}

pub fn px_to_pt(px: f64) -> f64 {
    px * PT_PER_PX
}

pub fn pt_to_px(pt: f64) -> f64 {
    pt / PT_PER_PX
}

pub fn px_to_in(px: f64) -> f64 {
    px / PX_PER_IN
}

pub fn in_to_px(inches: f64) -> f64 {
    inches * PX_PER_IN
}

pub fn pt_to_in(pt: f64) -> f64 {
    pt / PT_PER_IN
}

pub fn in_to_pt(inches: f64) -> f64 {
    inches * PT_PER_IN
}

pub fn in_to_emu(inches: f64) -> f64 {
    inches * EMU_PER_IN
}

pub fn emu_to_in(emu: f64) -> f64 {
    emu / EMU_PER_IN
}

/// Parses a raw px-suffixed computed-style string into a float, defaulting to
/// `0.0` for anything unparsable (mirrors the defensive `unwrap_or(0.0)`
/// style the rest of the pipeline uses for missing/malformed style data).
pub fn parse_px_or_zero(raw: &str) -> f64 {
    Length::parse(raw)
        .and_then(|l| match l {
            Length::Px(v) => Some(v),
            _ => None,
        })
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_px_pt_in_percent() {
        assert_eq!(Length::parse("12px"), Some(Length::Px(12.0)));
        assert_eq!(Length::parse("1.5pt"), Some(Length::Pt(1.5)));
        assert_eq!(Length::parse("0.2in"), Some(Length::In(0.2)));
        assert_eq!(Length::parse("49%"), Some(Length::Percent(49.0)));
        assert_eq!(Length::parse("0"), Some(Length::Px(0.0)));
    }

    #[test]
    fn px_round_trips_through_inches() {
        let px = 96.0;
        let inches = px_to_in(px);
        assert_eq!(inches, 1.0);
        assert_eq!(in_to_px(inches), px);
    }

    #[test]
    fn in_to_emu_is_exact() {
        assert_eq!(in_to_emu(1.0), 914_400.0);
        assert_eq!(emu_to_in(914_400.0), 1.0);
    }

    #[test]
    fn px_to_pt_matches_browser_dpi_assumption() {
        assert_eq!(px_to_pt(96.0), 72.0);
    }
}
