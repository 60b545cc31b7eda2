//! `box-shadow` parsing. The browser reports a single computed shadow as
//! `"rgba(...) dx dy blur spread [inset]"`. Spread is not representable in
//! the target renderer and is ignored; inset shadows are dropped entirely
//! because they corrupt the renderer's output (empirical, spec §4.1).

use crate::color::parse_color;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A single outer box-shadow, translated into the renderer's angle/blur/
/// offset model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub shadow_type: String,
    /// Degrees, 0 = right, 90 = down (screen-space, y grows downward).
    pub angle_deg: f64,
    pub blur_pt: f64,
    pub color: String,
    pub offset_pt: f64,
    /// 0-100 percent opacity (not the transparency complement used
    /// elsewhere — the renderer's shadow field wants opacity directly).
    pub opacity: u8,
}

fn shadow_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(?P<color>rgba?\([^)]*\)|#[0-9a-fA-F]{3,8})\s+(?P<dx>-?[0-9.]+)px\s+(?P<dy>-?[0-9.]+)px\s+(?P<blur>-?[0-9.]+)px(?:\s+-?[0-9.]+px)?\s*(?P<inset>inset)?\s*$",
        )
        .expect("valid regex")
    })
}

/// Parses a single computed `box-shadow` value. Returns `None` for `"none"`,
/// unparsable input, or an inset shadow.
pub fn parse_box_shadow(raw: &str) -> Option<Shadow> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return None;
    }
    let caps = shadow_regex().captures(raw)?;
    if caps.name("inset").is_some() {
        return None;
    }
    let color = parse_color(&caps["color"])?;
    let dx: f64 = caps["dx"].parse().ok()?;
    let dy: f64 = caps["dy"].parse().ok()?;
    let blur: f64 = caps["blur"].parse().ok()?;

    Some(Shadow {
        shadow_type: "outer".to_string(),
        angle_deg: dy.atan2(dx).to_degrees(),
        blur_pt: blur * 0.75,
        color: color.hex_string(),
        offset_pt: dx.hypot(dy) * 0.75,
        opacity: 100 - color.transparency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_shadow() {
        let s = parse_box_shadow("rgba(0, 0, 0, 0.5) 2px 4px 6px 0px").unwrap();
        assert_eq!(s.color, "000000");
        assert_eq!(s.opacity, 50);
        assert_eq!(s.blur_pt, 4.5);
        assert!((s.offset_pt - (2.0_f64.hypot(4.0) * 0.75)).abs() < 1e-9);
    }

    #[test]
    fn angle_down_is_90() {
        let s = parse_box_shadow("rgb(0, 0, 0) 0px 10px 0px").unwrap();
        assert!((s.angle_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn inset_is_dropped() {
        assert!(parse_box_shadow("rgba(0,0,0,0.5) 2px 4px 6px 0px inset").is_none());
    }

    #[test]
    fn none_is_dropped() {
        assert!(parse_box_shadow("none").is_none());
    }
}
