//! Rotation extraction from `transform`/`writing-mode`, and the bounding-box
//! correction needed to feed a renderer that rotates a box around its centre.

use crate::units::PxRect;
use regex::Regex;
use std::sync::OnceLock;

fn rotate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)rotate\(\s*(-?[0-9.]+)deg\s*\)").expect("valid regex"))
}

fn matrix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)matrix\(\s*(-?[0-9.]+)\s*,\s*(-?[0-9.]+)\s*,\s*(-?[0-9.]+)\s*,\s*(-?[0-9.]+)\s*,\s*(-?[0-9.]+)\s*,\s*(-?[0-9.]+)\s*\)",
        )
        .expect("valid regex")
    })
}

/// Extracts a rotation angle in `[0, 360)` degrees from the computed
/// `transform` and `writing-mode` properties. Returns `None` when the net
/// rotation is exactly 0 (per spec, 0 degrees is emitted as absent rather
/// than `Some(0.0)`).
pub fn extract_rotation_deg(transform: &str, writing_mode: &str) -> Option<f64> {
    let mut deg = rotation_from_transform(transform);

    deg += match writing_mode.trim() {
        "vertical-rl" => 90.0,
        "vertical-lr" => 270.0,
        _ => 0.0,
    };

    let normalized = deg.rem_euclid(360.0);
    if normalized == 0.0 {
        None
    } else {
        Some(normalized)
    }
}

fn rotation_from_transform(transform: &str) -> f64 {
    let transform = transform.trim();
    if transform.is_empty() || transform.eq_ignore_ascii_case("none") {
        return 0.0;
    }
    if let Some(caps) = rotate_regex().captures(transform) {
        return caps[1].parse().unwrap_or(0.0);
    }
    if let Some(caps) = matrix_regex().captures(transform) {
        let a: f64 = caps[1].parse().unwrap_or(1.0);
        let b: f64 = caps[2].parse().unwrap_or(0.0);
        return b.atan2(a).to_degrees().round();
    }
    0.0
}

/// Recomputes the top-left position/size a rotation-aware renderer should
/// place an element at, given the rect the browser reported for the
/// (already-rotated) box, the element's own unrotated `offsetWidth`/
/// `offsetHeight`, and the extracted rotation.
///
/// For 90/270 degree rotations the browser's bounding rect has width and
/// height swapped relative to the unrotated box; width/height are swapped
/// back and the top-left recomputed so the box stays centred on the same
/// point. For any other non-zero rotation the unrotated offset dimensions
/// are used directly, centred on the bounding rect's centre.
pub fn rotation_aware_rect(
    bounding_rect: PxRect,
    offset_width: f64,
    offset_height: f64,
    rotation_deg: Option<f64>,
) -> PxRect {
    let (cx, cy) = bounding_rect.center();
    match rotation_deg {
        None => bounding_rect,
        Some(deg) if is_quarter_turn(deg) => PxRect {
            x: cx - bounding_rect.h / 2.0,
            y: cy - bounding_rect.w / 2.0,
            w: bounding_rect.h,
            h: bounding_rect.w,
        },
        Some(_) => PxRect {
            x: cx - offset_width / 2.0,
            y: cy - offset_height / 2.0,
            w: offset_width,
            h: offset_height,
        },
    }
}

fn is_quarter_turn(deg: f64) -> bool {
    (deg - 90.0).abs() < f64::EPSILON || (deg - 270.0).abs() < f64::EPSILON
}
