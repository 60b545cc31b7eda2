use serde::{Deserialize, Serialize};

use super::background::Background;
use super::element::ElementRecord;
use super::placeholder::Placeholder;

/// The complete translation of one HTML slide: background, positioned
/// visual elements in document order, named placeholder regions, and any
/// validation errors gathered along the way (empty on a description the
/// emitter actually ran against, since emission only happens once
/// validation passes — spec §4/§7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDescription {
    pub background: Background,
    pub elements: Vec<ElementRecord>,
    pub placeholders: Vec<Placeholder>,
    pub errors: Vec<String>,
}

impl SlideDescription {
    pub fn new(background: Background) -> Self {
        SlideDescription {
            background,
            elements: Vec::new(),
            placeholders: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Invariant 2 (spec §3): after rasterization, no element is a CSS-only
    /// intermediate kind and the background is fully resolved.
    pub fn is_fully_rasterized(&self) -> bool {
        self.background.is_final()
            && !self.elements.iter().any(ElementRecord::is_rasterization_intermediate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_description_is_not_rasterized_with_gradient_background() {
        let desc = SlideDescription::new(Background::Gradient {
            value: "linear-gradient(red, blue)".into(),
            style: None,
        });
        assert!(!desc.is_fully_rasterized());
    }

    #[test]
    fn color_background_with_no_elements_is_rasterized() {
        let desc = SlideDescription::new(Background::Color { value: "FFFFFF".into() });
        assert!(desc.is_fully_rasterized());
    }
}
