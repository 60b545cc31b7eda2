use serde::{Deserialize, Serialize};

/// Horizontal text alignment. `justify` is passed through uninterpreted
/// (spec Open Questions) via the `Justify` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Center,
    Justify,
}

impl Align {
    /// Normalises `start`/`end` to `left`/`right` per spec §4.4. Text
    /// direction is assumed left-to-right; the engine does not read
    /// `direction`/`dir` (out of the bounded CSS subset).
    pub fn from_css(value: &str) -> Align {
        match value.trim() {
            "start" | "left" => Align::Left,
            "end" | "right" => Align::Right,
            "center" => Align::Center,
            "justify" => Align::Justify,
            _ => Align::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_end_normalise() {
        assert_eq!(Align::from_css("start"), Align::Left);
        assert_eq!(Align::from_css("end"), Align::Right);
    }

    #[test]
    fn justify_passes_through() {
        assert_eq!(Align::from_css("justify"), Align::Justify);
    }
}
