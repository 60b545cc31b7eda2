//! Orchestration / entry point (spec §5-§6): drives one HTML file through
//! the whole pipeline — navigate, probe, extract, rasterize, validate, emit
//! — against a caller-supplied browser and slide builder.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::browser::{Browser, Page, Viewport};
use crate::builder::{Slide, SlideBuilder};
use crate::errors::{HostError, Result, TranslateError, ValidationError};
use crate::extract;
use crate::model::{Background, BackgroundStyle, Placeholder, SlideDescription};
use crate::rasterize;
use crate::units::emu_to_in;
use crate::validate;

/// Tunable knobs for one `translate` call (spec §6: `options.slide`,
/// `options.tmpDir`). No global or env-based configuration; the engine is
/// pure per call.
pub struct TranslateOptions<S> {
    /// An existing slide to populate instead of asking the builder for a
    /// fresh one.
    pub slide: Option<S>,
    /// Directory rasterized images are written into. Defaults to a fresh
    /// directory under the OS temp directory.
    pub tmp_dir: Option<PathBuf>,
}

impl<S> Default for TranslateOptions<S> {
    fn default() -> Self {
        TranslateOptions { slide: None, tmp_dir: None }
    }
}

/// The target slide plus the named placeholder rectangles the caller uses
/// to place charts or other non-HTML content (spec §6).
pub struct TranslateOutput<S> {
    pub slide: S,
    pub placeholders: Vec<Placeholder>,
}

pub fn translate<B: SlideBuilder>(
    html_file: &Path,
    browser: &mut impl Browser,
    builder: &mut B,
    options: TranslateOptions<B::Slide>,
) -> Result<TranslateOutput<B::Slide>> {
    if !html_file.exists() {
        return Err(TranslateError::Host(HostError::Navigate(format!(
            "{}: file does not exist",
            html_file.display()
        ))));
    }

    debug!("translating {}", html_file.display());
    let mut page = browser.open_page()?;
    let result = run_pipeline(html_file, &mut page, builder, options);
    browser.close_page(page)?;
    result
}

fn run_pipeline<B: SlideBuilder>(
    html_file: &Path,
    page: &mut impl Page,
    builder: &mut B,
    options: TranslateOptions<B::Slide>,
) -> Result<TranslateOutput<B::Slide>> {
    page.navigate_file(html_file)?;

    // Probe the page's natural layout, then pin the viewport to the body's
    // own size before the extraction pass that actually feeds the pipeline
    // (spec §5 control flow), so scrollbars never perturb computed styles.
    let probe = page.extract()?;
    page.set_viewport(Viewport {
        width_px: probe.body_metrics.width_px.round() as u32,
        height_px: probe.body_metrics.height_px.round() as u32,
    })?;
    let doc = page.extract()?;

    let body = doc.element(doc.body).expect("body must be an element node");
    let background = body_background(body);

    let extraction = extract::extract(&doc);
    debug!(
        "extracted {} elements, {} placeholders, {} pre-validation errors",
        extraction.elements.len(),
        extraction.placeholders.len(),
        extraction.errors.len()
    );

    let mut elements = extraction.elements;
    let tmp_dir = match &options.tmp_dir {
        Some(dir) => dir.clone(),
        None => default_tmp_dir()?,
    };
    std::fs::create_dir_all(&tmp_dir)?;
    rasterize::rasterize_all(page, &mut elements, &extraction.node_ids, &tmp_dir)?;

    let mut errors = extraction.errors;
    check_missing_local_images(&elements, &mut errors);

    let (layout_w_emu, layout_h_emu) = builder.layout_size_emu();
    let layout_w_in = emu_to_in(layout_w_emu);
    let layout_h_in = emu_to_in(layout_h_emu);

    let mut description = SlideDescription::new(background);
    description.elements = elements;
    description.placeholders = extraction.placeholders;

    if let Err(err) = validate::validate(&description, &doc.body_metrics, layout_w_in, layout_h_in, errors) {
        return Err(prefix_with_filename(html_file, err));
    }

    let mut slide = match options.slide {
        Some(slide) => slide,
        None => builder.new_slide()?,
    };
    crate::emit::emit(&mut slide, &description)?;
    let slide = builder.finish_slide(slide)?;

    Ok(TranslateOutput { slide, placeholders: description.placeholders })
}

fn body_background(body: &crate::dom::ElementNode) -> Background {
    let bg_image = body.computed.background_image.trim();
    if !bg_image.is_empty() && bg_image != "none" {
        let style = BackgroundStyle {
            background_image: Some(bg_image.to_string()),
            background_repeat: non_empty(&body.computed.background_repeat),
            background_size: non_empty(&body.computed.background_size),
            background_position: non_empty(&body.computed.background_position),
            background_color: body.computed.has_background_color().then(|| body.computed.background_color.clone()),
        };
        if bg_image.to_ascii_lowercase().contains("gradient") {
            return Background::Gradient { value: bg_image.to_string(), style: Some(style) };
        }
        return Background::Css { style };
    }
    let color = crate::color::background_color_or_default(&body.computed.background_color);
    Background::Color { value: color.hex_string() }
}

fn non_empty(raw: &str) -> Option<String> {
    let v = raw.trim();
    (!v.is_empty() && v != "none").then(|| v.to_string())
}

/// Images whose `src` names a local path (not a URL or a data URI) are
/// checked for existence once rasterization has settled every final `src`
/// (spec §7 category 3: resource failures, accumulated with the rest).
fn check_missing_local_images(elements: &[crate::model::ElementRecord], errors: &mut Vec<ValidationError>) {
    for element in elements {
        let crate::model::ElementRecord::Image(img) = element else { continue };
        if is_remote_or_data_uri(&img.src) {
            continue;
        }
        if !Path::new(&img.src).exists() {
            warn!("referenced image file is missing: {}", img.src);
            errors.push(ValidationError::MissingFile { path: img.src.clone() });
        }
    }
}

fn is_remote_or_data_uri(src: &str) -> bool {
    let lower = src.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
}

fn default_tmp_dir() -> Result<PathBuf> {
    let millis =
        std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
    let suffix: u32 = rand::random();
    Ok(std::env::temp_dir().join(format!("html2slide-{millis:x}-{suffix:08x}")))
}

fn prefix_with_filename(html_file: &Path, err: TranslateError) -> TranslateError {
    match err {
        TranslateError::Validation(errs) => TranslateError::Validation(errs),
        other => {
            let msg = other.to_string();
            if msg.starts_with(&html_file.display().to_string()) {
                other
            } else {
                TranslateError::Host(HostError::Navigate(format!("{}: {msg}", html_file.display())))
            }
        }
    }
}
