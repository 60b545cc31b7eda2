//! The emitter (spec §4.10): walks a validated `SlideDescription` in
//! extraction order and drives a [`Slide`] through it. The only
//! transformation left at this stage is the single-line text width
//! calibration (spec Open Questions) — units, rotation, and colour were
//! all resolved during extraction.

use std::path::Path;

use crate::builder::{ShapeType, Slide};
use crate::constants::SINGLE_LINE_WIDTH_EXPANSION;
use crate::errors::Result;
use crate::model::{Align, Background, ElementRecord, Position, SlideDescription, TextContent, TextElement};
use crate::units::pt_to_in;

pub fn emit<S: Slide>(slide: &mut S, description: &SlideDescription) -> Result<()> {
    emit_background(slide, &description.background)?;

    for element in &description.elements {
        emit_element(slide, element)?;
    }

    for placeholder in &description.placeholders {
        let position = Position { x: placeholder.x, y: placeholder.y, w: placeholder.w, h: placeholder.h };
        slide.add_placeholder(&placeholder.id, position)?;
    }

    Ok(())
}

fn emit_background<S: Slide>(slide: &mut S, background: &Background) -> Result<()> {
    match background {
        Background::Color { value } => slide.set_background_color(value),
        Background::Image { path } => slide.set_background_image(path),
        // Always rasterized to Color or Image before emission (invariant 2);
        // reaching here is a caller bug, not a translation-time condition.
        Background::Css { .. } | Background::Gradient { .. } => {
            unreachable!("background must be rasterized before emission")
        }
    }
}

fn emit_element<S: Slide>(slide: &mut S, element: &ElementRecord) -> Result<()> {
    match element {
        ElementRecord::Image(img) => slide.add_image(img.position, Path::new(&img.src)),
        ElementRecord::Shape(shape) => {
            slide.add_shape(shape.position, shape_type_for(shape.shape.rect_radius_inches), &shape.shape)
        }
        ElementRecord::Line(line) => slide.add_line(line.x1, line.y1, line.x2, line.y2, line.width_pt, &line.color),
        ElementRecord::Table(table) => slide.add_table(table),
        ElementRecord::List(list) => slide.add_list(list),
        ElementRecord::Text(text) => emit_text(slide, text),
        ElementRecord::Svg(_) | ElementRecord::BgImage(_) | ElementRecord::Gradient(_) => {
            unreachable!("rasterization always replaces intermediate records before emission")
        }
    }
}

fn shape_type_for(rect_radius_inches: f64) -> ShapeType {
    if rect_radius_inches > 0.0 {
        ShapeType::RoundRect
    } else {
        ShapeType::Rect
    }
}

/// Single-line text boxes get their width expanded by a fixed calibration
/// factor to compensate for the downstream renderer systematically
/// underestimating how wide a line of text needs to be.
fn emit_text<S: Slide>(slide: &mut S, text: &TextElement) -> Result<()> {
    if !is_single_line(text) {
        return slide.add_text(text);
    }
    let delta = text.position.w * SINGLE_LINE_WIDTH_EXPANSION;
    let (dx, dw) = match text.style.align {
        Align::Left | Align::Justify => (0.0, delta),
        Align::Right => (-delta, delta),
        Align::Center => (-delta / 2.0, delta),
    };
    let expanded = TextElement {
        position: Position { x: text.position.x + dx, w: text.position.w + dw, ..text.position },
        ..text.clone()
    };
    slide.add_text(&expanded)
}

/// spec §4.4: `h ≤ 1.5 · max(lineSpacing, fontSize·1.2)`. `lineSpacing` and
/// `fontSize` are in points, `position.h` in inches.
fn is_single_line(text: &TextElement) -> bool {
    let line_spacing = text.style.line_spacing.unwrap_or(0.0);
    let metric_pt = line_spacing.max(text.style.font_size * 1.2);
    text.position.h <= 1.5 * pt_to_in(metric_pt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListElement, ShapeStyle, TableElement, TextStyle, TextTag};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSlide {
        log: RefCell<Vec<String>>,
    }

    impl Slide for RecordingSlide {
        fn set_background_color(&mut self, hex: &str) -> Result<()> {
            self.log.borrow_mut().push(format!("background_color:{hex}"));
            Ok(())
        }
        fn set_background_image(&mut self, path: &Path) -> Result<()> {
            self.log.borrow_mut().push(format!("background_image:{}", path.display()));
            Ok(())
        }
        fn add_image(&mut self, _position: Position, path: &Path) -> Result<()> {
            self.log.borrow_mut().push(format!("image:{}", path.display()));
            Ok(())
        }
        fn add_shape(&mut self, _position: Position, shape_type: ShapeType, _style: &ShapeStyle) -> Result<()> {
            self.log.borrow_mut().push(format!("shape:{shape_type:?}"));
            Ok(())
        }
        fn add_line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _width_pt: f64, color: &str) -> Result<()> {
            self.log.borrow_mut().push(format!("line:{color}"));
            Ok(())
        }
        fn add_text(&mut self, text: &TextElement) -> Result<()> {
            self.log.borrow_mut().push(format!("text:{:.3},{:.3}", text.position.x, text.position.w));
            Ok(())
        }
        fn add_table(&mut self, _table: &TableElement) -> Result<()> {
            self.log.borrow_mut().push("table".into());
            Ok(())
        }
        fn add_list(&mut self, _list: &ListElement) -> Result<()> {
            self.log.borrow_mut().push("list".into());
            Ok(())
        }
        fn add_placeholder(&mut self, id: &str, _position: Position) -> Result<()> {
            self.log.borrow_mut().push(format!("placeholder:{id}"));
            Ok(())
        }
    }

    /// `font_size: 12pt`, no explicit `lineSpacing`, gives a single-line
    /// threshold of `1.5 * 12 * 1.2 = 21.6pt = 0.3in`.
    fn sample_text(w: f64, h: f64) -> TextElement {
        TextElement {
            tag: TextTag::P,
            text: TextContent::Plain("hello".into()),
            position: Position { x: 0.0, y: 0.0, w, h },
            style: TextStyle { font_size: 12.0, ..TextStyle::default() },
        }
    }

    #[test]
    fn single_line_text_gets_width_expanded_left_aligned() {
        let mut slide = RecordingSlide::default();
        emit_text(&mut slide, &sample_text(10.0, 0.2)).unwrap();
        assert_eq!(slide.log.borrow()[0], "text:0.000,10.200");
    }

    #[test]
    fn single_line_right_aligned_extends_left() {
        let mut text = sample_text(10.0, 0.2);
        text.style.align = Align::Right;
        let mut slide = RecordingSlide::default();
        emit_text(&mut slide, &text).unwrap();
        assert_eq!(slide.log.borrow()[0], "text:-0.200,10.200");
    }

    #[test]
    fn single_line_centered_extends_both_ways() {
        let mut text = sample_text(10.0, 0.2);
        text.style.align = Align::Center;
        let mut slide = RecordingSlide::default();
        emit_text(&mut slide, &text).unwrap();
        assert_eq!(slide.log.borrow()[0], "text:-0.100,10.200");
    }

    #[test]
    fn tall_box_with_no_break_marker_is_still_multi_line() {
        let text = sample_text(10.0, 1.0);
        let mut slide = RecordingSlide::default();
        emit_text(&mut slide, &text).unwrap();
        assert_eq!(slide.log.borrow()[0], "text:0.000,10.000");
    }

    #[test]
    fn emit_visits_elements_then_placeholders_in_order() {
        use crate::model::{ImageElement, Placeholder};

        let mut description = SlideDescription::new(Background::Color { value: "FFFFFF".into() });
        description.elements.push(ElementRecord::Image(ImageElement {
            src: "a.png".into(),
            position: Position { x: 0.0, y: 0.0, w: 1.0, h: 1.0 },
            style: None,
        }));
        description.placeholders.push(Placeholder { id: "chart1".into(), x: 0.0, y: 0.0, w: 1.0, h: 1.0 });

        let mut slide = RecordingSlide::default();
        emit(&mut slide, &description).unwrap();

        assert_eq!(
            *slide.log.borrow(),
            vec!["background_color:FFFFFF".to_string(), "image:a.png".to_string(), "placeholder:chart1".to_string()]
        );
    }
}
