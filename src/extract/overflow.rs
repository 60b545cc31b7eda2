//! Body-overflow, slide/body layout mismatch, and text-near-bottom checks
//! (spec §4.9). Pure functions operating on the already-extracted document
//! and body metrics, kept next to the rest of extraction since both read
//! the same browser-reported numbers.

use crate::constants::{
    LAYOUT_MISMATCH_TOLERANCE_IN, OVERFLOW_TOLERANCE_PX, TEXT_NEAR_BOTTOM_FONT_SIZE_PT,
    TEXT_NEAR_BOTTOM_MARGIN_IN,
};
use crate::dom::BodyMetrics;
use crate::errors::ValidationError;
use crate::model::ElementRecord;
use crate::units::{px_to_in, px_to_pt};

pub fn check_body_overflow(metrics: &BodyMetrics, errors: &mut Vec<ValidationError>) {
    let overflow_x = metrics.overflow_x_px();
    if overflow_x > OVERFLOW_TOLERANCE_PX {
        errors.push(ValidationError::HorizontalOverflow {
            overflow_pt: px_to_pt(overflow_x),
            tolerance_pt: px_to_pt(OVERFLOW_TOLERANCE_PX),
        });
    }

    let overflow_y = metrics.overflow_y_px();
    if overflow_y > OVERFLOW_TOLERANCE_PX {
        errors.push(ValidationError::VerticalOverflow {
            overflow_pt: px_to_pt(overflow_y),
            tolerance_pt: px_to_pt(OVERFLOW_TOLERANCE_PX),
        });
    }
}

pub fn check_layout_mismatch(
    metrics: &BodyMetrics,
    layout_w_in: f64,
    layout_h_in: f64,
    errors: &mut Vec<ValidationError>,
) {
    let body_w_in = px_to_in(metrics.width_px);
    let diff_w = (layout_w_in - body_w_in).abs();
    if diff_w > LAYOUT_MISMATCH_TOLERANCE_IN {
        errors.push(ValidationError::LayoutMismatch {
            axis: "width",
            layout_in: layout_w_in,
            body_in: body_w_in,
            diff_in: diff_w,
            tolerance_in: LAYOUT_MISMATCH_TOLERANCE_IN,
        });
    }

    let body_h_in = px_to_in(metrics.height_px);
    let diff_h = (layout_h_in - body_h_in).abs();
    if diff_h > LAYOUT_MISMATCH_TOLERANCE_IN {
        errors.push(ValidationError::LayoutMismatch {
            axis: "height",
            layout_in: layout_h_in,
            body_in: body_h_in,
            diff_in: diff_h,
            tolerance_in: LAYOUT_MISMATCH_TOLERANCE_IN,
        });
    }
}

pub fn check_text_near_bottom(elements: &[ElementRecord], slide_height_in: f64, errors: &mut Vec<ValidationError>) {
    for el in elements {
        let ElementRecord::Text(text) = el else { continue };
        if text.style.font_size <= TEXT_NEAR_BOTTOM_FONT_SIZE_PT {
            continue;
        }
        let distance_in = slide_height_in - (text.position.y + text.position.h);
        if distance_in < TEXT_NEAR_BOTTOM_MARGIN_IN {
            errors.push(ValidationError::TextNearBottom {
                font_size_pt: text.style.font_size,
                distance_in,
                margin_in: TEXT_NEAR_BOTTOM_MARGIN_IN,
            });
        }
    }
}
