//! Presentation forms of a formatted cell

use serde::{Deserialize, Serialize};

/// Highest rating value a cell can show
pub const RATING_MAX: f64 = 5.0;

/// One tag of a multi-select cell
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagItem {
    pub label: String,
    /// Index into the fixed tag palette
    pub color_index: usize,
}

/// Final presentation of one cell's value. Exactly one variant applies;
/// `Empty` covers null values and every recovered failure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderedOutput {
    PlainText { text: String },
    TagList { tags: Vec<TagItem> },
    SingleTag { label: String },
    Boolean { checked: bool },
    Hyperlink { href: String, label: String },
    ImageList { urls: Vec<String> },
    /// 0..=5
    Rating { value: f64 },
    /// 0..=1
    ProgressBar { fraction: f64 },
    CurrencyText { text: String },
    Empty,
}

impl RenderedOutput {
    pub fn text(text: impl Into<String>) -> Self {
        RenderedOutput::PlainText { text: text.into() }
    }

    pub fn rating(value: f64) -> Self {
        RenderedOutput::Rating {
            value: value.clamp(0.0, RATING_MAX),
        }
    }

    pub fn progress(fraction: f64) -> Self {
        RenderedOutput::ProgressBar {
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderedOutput::Empty)
    }
}

impl Default for RenderedOutput {
    fn default() -> Self {
        RenderedOutput::Empty
    }
}
