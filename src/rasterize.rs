//! The rasterizer (spec §4.8): screenshots whatever CSS construct the
//! target renderer cannot represent natively (inline SVG, CSS gradients,
//! background images, images needing `object-fit`/`object-position`/
//! `border-radius` baked in) and replaces the record with a plain `Image`
//! pointing at the rendered PNG.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::browser::{Page, ScreenshotOptions};
use crate::dom::NodeId;
use crate::errors::Result;
use crate::model::{ElementRecord, ImageElement};

/// Rasterizes every intermediate record in place. `node_ids[i]` is the
/// extracted node id `elements[i]` came from; extraction keeps both lists
/// in lockstep so the rasterizer can screenshot the right element without
/// re-walking the document.
pub fn rasterize_all<P: Page>(
    page: &mut P,
    elements: &mut [ElementRecord],
    node_ids: &[NodeId],
    out_dir: &Path,
) -> Result<()> {
    for (element, &node_id) in elements.iter_mut().zip(node_ids) {
        if !needs_rasterization(element) {
            continue;
        }
        let position = element.position().expect("rasterizable kinds always carry a position");
        let path = unique_png_path(out_dir);
        rasterize_one(page, node_id, &path)?;
        *element = ElementRecord::Image(ImageElement {
            src: path.display().to_string(),
            position,
            style: None,
        });
    }
    Ok(())
}

fn needs_rasterization(element: &ElementRecord) -> bool {
    match element {
        ElementRecord::Svg(_) | ElementRecord::BgImage(_) | ElementRecord::Gradient(_) => true,
        ElementRecord::Image(img) => {
            let src_is_svg = img.src.to_ascii_lowercase().ends_with(".svg");
            src_is_svg || img.style.as_ref().is_some_and(|s| s.needs_rasterization(src_is_svg))
        }
        _ => false,
    }
}

fn rasterize_one<P: Page>(page: &mut P, node_id: NodeId, out_path: &Path) -> Result<()> {
    // The element is screenshotted against a transparent backdrop, never
    // the composed page, so the image can be overlaid on whatever sits
    // beneath it in the final slide.
    let handle = page.inject_fixed_element("background: transparent;")?;
    let result = page.screenshot_element(node_id, out_path, ScreenshotOptions { omit_background: true });
    page.remove_injected_element(handle)?;
    result
}

fn unique_png_path(out_dir: &Path) -> PathBuf {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: u32 = rand::thread_rng().gen();
    out_dir.join(format!("raster-{millis:x}-{suffix:08x}.png"))
}
