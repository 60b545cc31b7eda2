//! Colour parsing: the browser reports computed colours as `rgb(r, g, b)` or
//! `rgba(r, g, b, a)` strings; the slide description wants uppercase 6-hex
//! plus a separate 0-100 transparency percentage.

use regex::Regex;
use std::sync::OnceLock;

/// A colour resolved to the slide description's representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedColor {
    pub hex: [u8; 3],
    /// 0 = opaque, 100 = fully transparent. This is the *complement* of
    /// alpha, not alpha itself (spec §4.1).
    pub transparency: u8,
}

impl ParsedColor {
    pub fn hex_string(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.hex[0], self.hex[1], self.hex[2])
    }
}

fn rgba_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^rgba?\(\s*([0-9]+)\s*,\s*([0-9]+)\s*,\s*([0-9]+)\s*(?:,\s*([0-9.]+)\s*)?\)$",
        )
        .expect("static regex is valid")
    })
}

/// Parses a CSS colour string as reported by `getComputedStyle` (`rgb(...)`,
/// `rgba(...)`, or a `#rrggbb`/`#rgb` literal). Returns `None` for keywords
/// other than `transparent`, which callers should special-case per context
/// (see [`background_color_or_default`]).
pub fn parse_color(raw: &str) -> Option<ParsedColor> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("transparent") {
        return Some(ParsedColor { hex: [0, 0, 0], transparency: 100 });
    }
    if let Some(hex) = raw.strip_prefix('#') {
        return parse_hex(hex);
    }
    let caps = rgba_regex().captures(raw)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    let alpha: f64 = caps
        .get(4)
        .map(|m| m.as_str().parse().unwrap_or(1.0))
        .unwrap_or(1.0);
    Some(ParsedColor {
        hex: [r, g, b],
        transparency: alpha_to_transparency(alpha),
    })
}

fn parse_hex(hex: &str) -> Option<ParsedColor> {
    let expand = |c: char| -> Option<u8> {
        let s: String = [c, c].iter().collect();
        u8::from_str_radix(&s, 16).ok()
    };
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(ParsedColor { hex: [r, g, b], transparency: 0 })
        }
        3 => {
            let mut chars = hex.chars();
            let r = expand(chars.next()?)?;
            let g = expand(chars.next()?)?;
            let b = expand(chars.next()?)?;
            Some(ParsedColor { hex: [r, g, b], transparency: 0 })
        }
        _ => None,
    }
}

/// `round((1 - alpha) * 100)`, per spec §4.1 — percent-opacity complement,
/// not alpha itself.
pub fn alpha_to_transparency(alpha: f64) -> u8 {
    ((1.0 - alpha) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Resolves a background colour, applying the spec's background-defaulting
/// rule: a fully transparent background (`rgba(0,0,0,0)` or the keyword
/// `transparent`) becomes opaque white rather than a transparent black.
pub fn background_color_or_default(raw: &str) -> ParsedColor {
    match parse_color(raw) {
        Some(c) if c.transparency >= 100 => ParsedColor { hex: [255, 255, 255], transparency: 0 },
        Some(c) => c,
        None => ParsedColor { hex: [255, 255, 255], transparency: 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb() {
        let c = parse_color("rgb(255, 0, 16)").unwrap();
        assert_eq!(c.hex_string(), "FF0010");
        assert_eq!(c.transparency, 0);
    }

    #[test]
    fn parses_rgba_alpha() {
        let c = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(c.transparency, 50);
    }

    #[test]
    fn parses_hex_literal() {
        let c = parse_color("#123456").unwrap();
        assert_eq!(c.hex_string(), "123456");
    }

    #[test]
    fn transparent_background_defaults_to_white() {
        let c = background_color_or_default("rgba(0, 0, 0, 0)");
        assert_eq!(c.hex_string(), "FFFFFF");
        assert_eq!(c.transparency, 0);

        let c2 = background_color_or_default("transparent");
        assert_eq!(c2.hex_string(), "FFFFFF");
    }

    #[test]
    fn non_transparent_background_is_kept() {
        let c = background_color_or_default("#123456");
        assert_eq!(c.hex_string(), "123456");
    }
}
