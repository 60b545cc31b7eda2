//! The validator (spec §4.9): accumulates every rule violation found across
//! extraction, rasterization, and the body/layout measurements into one
//! list and fails once with all of them, rather than stopping at the first
//! problem found.

use crate::dom::BodyMetrics;
use crate::errors::{Result, TranslateError, ValidationError};
use crate::extract::overflow;
use crate::model::SlideDescription;

pub fn validate(
    description: &SlideDescription,
    body_metrics: &BodyMetrics,
    layout_w_in: f64,
    layout_h_in: f64,
    mut errors: Vec<ValidationError>,
) -> Result<()> {
    debug_assert!(
        description.is_fully_rasterized(),
        "validate must run after rasterization replaces every intermediate record"
    );

    overflow::check_body_overflow(body_metrics, &mut errors);
    overflow::check_layout_mismatch(body_metrics, layout_w_in, layout_h_in, &mut errors);
    overflow::check_text_near_bottom(&description.elements, layout_h_in, &mut errors);

    for placeholder in &description.placeholders {
        if placeholder.w <= 0.0 || placeholder.h <= 0.0 {
            errors.push(ValidationError::ZeroSizePlaceholder { id: placeholder.id.clone() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TranslateError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Background, Placeholder};

    fn metrics() -> BodyMetrics {
        BodyMetrics { width_px: 960.0, height_px: 540.0, scroll_width_px: 960.0, scroll_height_px: 540.0 }
    }

    #[test]
    fn clean_description_validates() {
        let description = SlideDescription::new(Background::Color { value: "FFFFFF".into() });
        let result = validate(&description, &metrics(), 10.0, 5.625, Vec::new());
        assert!(result.is_ok());
    }

    #[test]
    fn zero_size_placeholder_is_rejected() {
        let mut description = SlideDescription::new(Background::Color { value: "FFFFFF".into() });
        description.placeholders.push(Placeholder { id: "chart1".into(), x: 0.0, y: 0.0, w: 0.0, h: 2.0 });
        let err = validate(&description, &metrics(), 10.0, 5.625, Vec::new()).unwrap_err();
        assert!(matches!(err, TranslateError::Validation(errs) if errs.len() == 1));
    }

    #[test]
    fn pre_existing_extraction_errors_are_carried_through() {
        let description = SlideDescription::new(Background::Color { value: "FFFFFF".into() });
        let prior = vec![ValidationError::EmptyTable];
        let err = validate(&description, &metrics(), 10.0, 5.625, prior).unwrap_err();
        assert!(matches!(err, TranslateError::Validation(errs) if errs == vec![ValidationError::EmptyTable]));
    }
}
