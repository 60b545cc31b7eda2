//! The headless-browser collaborator, modeled as a trait pair rather than a
//! concrete driver. Nothing in this crate's dependency stack talks to a real
//! browser; callers plug in their own `Page`/`Browser` (a CDP client, a
//! WebDriver session, whatever they already run) and `translate` drives it
//! through this narrow interface. `harness` supplies a `scraper`-backed
//! stand-in good enough for this crate's own tests.

use std::path::Path;

use crate::dom::ExtractedDocument;
use crate::errors::{HostError, Result};

/// A rendered viewport size, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
}

/// Options for [`Page::screenshot_element`]. Mirrors spec §4.8: the
/// rasterizer always screenshots a single element in isolation, against a
/// transparent backdrop, never the composed page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenshotOptions {
    pub omit_background: bool,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        ScreenshotOptions { omit_background: true }
    }
}

/// One open page. Implementations own whatever process/connection backs
/// them; `translate` never outlives a single `Page` borrow, so there is no
/// async lifecycle to model here beyond ordinary `Result` propagation
/// (spec §5: the pipeline is sequential, one page in flight at a time).
pub trait Page {
    /// Sets the CSS viewport before navigation or extraction.
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Navigates to a `file://` URL for the given local HTML path.
    fn navigate_file(&mut self, path: &Path) -> Result<()>;

    /// Runs the extraction script and returns the typed tree (§4.2-§4.7 all
    /// operate on its output; see [`crate::dom`]).
    fn extract(&mut self) -> Result<ExtractedDocument>;

    /// Injects a `position: fixed` full-viewport element used by the
    /// rasterizer to get an opaque or transparent backdrop behind a
    /// screenshotted element (spec §4.8). Returns an opaque handle the
    /// caller passes back to `remove_injected_element`.
    fn inject_fixed_element(&mut self, css: &str) -> Result<InjectedHandle>;

    fn remove_injected_element(&mut self, handle: InjectedHandle) -> Result<()>;

    /// Screenshots exactly one element (identified by the node id the
    /// extraction pass assigned it) and writes a PNG to `out_path`.
    fn screenshot_element(
        &mut self,
        node_id: crate::dom::NodeId,
        out_path: &Path,
        options: ScreenshotOptions,
    ) -> Result<()>;
}

/// Opaque reference to an element injected by [`Page::inject_fixed_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectedHandle(pub u64);

/// Owns page lifecycles. A real implementation wraps a browser process or a
/// remote debugging connection; this crate never constructs one itself.
pub trait Browser {
    type Page: Page;

    fn open_page(&mut self) -> Result<Self::Page>;

    fn close_page(&mut self, page: Self::Page) -> Result<()>;
}

/// Convenience for implementations that want a uniform "the browser process
/// died" error without modeling every possible transport failure.
pub fn launch_failed(detail: impl Into<String>) -> HostError {
    HostError::Launch(detail.into())
}
