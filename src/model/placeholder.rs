use serde::{Deserialize, Serialize};

/// A named rectangular region reserved for non-HTML content (charts, etc.)
/// the caller inserts after translation. Emitted for any non-table element
/// whose class list contains `placeholder` and which has a non-empty `id`
/// (spec §4.3 step 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}
