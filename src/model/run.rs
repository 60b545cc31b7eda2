use serde::{Deserialize, Serialize};

/// A bullet marker attached to the first run of a list item.
/// Derived from spec §3 ("the first run of each item carries
/// `bullet: {indent}` when `list-style-type ≠ none`").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    /// Text indent in points, applied to the first line of the item.
    pub indent: f64,
}

/// Per-run inline styling. Every field is optional because a run inherits
/// whatever it doesn't explicitly set from the containing text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
}

/// A contiguous substring of a text element with uniform inline styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub text: String,
    pub options: RunOptions,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Run { text: text.into(), options: RunOptions::default() }
    }

    pub fn set_break_line(&mut self) {
        self.options.break_line = Some(true);
    }
}

/// Either a single plain string (no inline formatting present) or a run
/// sequence, per spec §4.4: "If the element ... contains inline formatting
/// wrappers, emit text as `Run[]` ...; otherwise emit as a single string".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    Plain(String),
    Runs(Vec<Run>),
}

impl TextContent {
    /// Trims the run/string sequence per invariant 4 (spec §3): the first
    /// run has no leading whitespace, the last has no trailing whitespace,
    /// empty runs are dropped.
    pub fn trim_runs(runs: Vec<Run>) -> Vec<Run> {
        let mut runs = runs;
        if let Some(first) = runs.first_mut() {
            first.text = first.text.trim_start().to_string();
        }
        if let Some(last) = runs.last_mut() {
            last.text = last.text.trim_end().to_string();
        }
        runs.retain(|r| !r.text.is_empty() || r.options.break_line.is_some());
        runs
    }
}
