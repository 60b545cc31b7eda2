use serde::{Deserialize, Serialize};

/// A position and size in inches, the unit every emitted geometry uses.
/// Derived from the browser's bounding rect after unit conversion and
/// rotation-aware correction (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Position {
    /// Invariant 3 (spec §3): every emitted position has strictly positive
    /// width and height.
    pub fn is_positive_size(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }
}

/// `[left, right, bottom, top]` in points. This is a quirk of the downstream
/// renderer, not a standard CSS order — documented at every boundary per
/// spec §4.9.
pub type Margin = [f64; 4];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_not_positive() {
        let p = Position { x: 0.0, y: 0.0, w: 0.0, h: 1.0 };
        assert!(!p.is_positive_size());
    }

    #[test]
    fn positive_size_passes() {
        let p = Position { x: 0.0, y: 0.0, w: 1.0, h: 1.0 };
        assert!(p.is_positive_size());
    }
}
