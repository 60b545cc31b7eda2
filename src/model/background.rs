use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw CSS background properties, kept around only until the rasterizer
/// replaces the background with a screenshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_repeat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// The slide background. `Css`/`Gradient` are intermediate forms the
/// rasterizer always replaces with `Image` before emission (invariant 2,
/// spec §3); `Color` is the steady-state default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Background {
    Color { value: String },
    Css { style: BackgroundStyle },
    Gradient {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<BackgroundStyle>,
    },
    Image { path: PathBuf },
}

impl Background {
    /// `true` once the background no longer needs rasterization.
    pub fn is_final(&self) -> bool {
        matches!(self, Background::Color { .. } | Background::Image { .. })
    }
}
