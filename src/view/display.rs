//! Display description of a mounted cell
//!
//! The cell does not paint widgets itself. It describes the UI primitives to
//! draw (text, tag, checkbox, link, image, rating, progress) and JavaScript
//! renders them.

use crate::format::palette::{color_name, SINGLE_TAG_COLOR};
use crate::marquee::MarqueePhase;
use crate::models::{RenderedOutput, RATING_MAX};
use serde::Serialize;

/// Multi-select cells show this many tags before collapsing the rest into `+N`
pub const MAX_VISIBLE_TAGS: usize = 1;

/// One UI primitive inside a cell
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "primitive", rename_all = "camelCase")]
pub enum Segment {
    Text { text: String },
    Tag { label: String, color: String },
    MoreTags { count: usize },
    Checkbox { checked: bool },
    Link { href: String, label: String, target: String },
    Image { src: String },
    Rating { value: f64, max: f64, disabled: bool },
    Progress {
        percent: f64,
        #[serde(rename = "showInfo")]
        show_info: bool,
    },
}

/// Everything JavaScript needs to draw one cell
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellDisplay {
    pub classes: Vec<String>,
    pub segments: Vec<Segment>,
    /// Draw a second copy of the segments for the seamless loop
    pub duplicate: bool,
    /// Left padding of the duplicate copy, in pixels
    pub duplicate_gap: f64,
    /// CSS transform for the scrolling container
    pub transform: String,
    pub phase: MarqueePhase,
}

/// UI primitives for a rendered value
pub fn segments_for(output: &RenderedOutput) -> Vec<Segment> {
    match output {
        RenderedOutput::PlainText { text } | RenderedOutput::CurrencyText { text } => {
            vec![Segment::Text { text: text.clone() }]
        }
        RenderedOutput::SingleTag { label } => vec![Segment::Tag {
            label: label.clone(),
            color: SINGLE_TAG_COLOR.to_string(),
        }],
        RenderedOutput::TagList { tags } => {
            let mut segments: Vec<Segment> = tags
                .iter()
                .take(MAX_VISIBLE_TAGS)
                .map(|tag| Segment::Tag {
                    label: tag.label.clone(),
                    color: color_name(tag.color_index).to_string(),
                })
                .collect();
            if tags.len() > MAX_VISIBLE_TAGS {
                segments.push(Segment::MoreTags {
                    count: tags.len() - MAX_VISIBLE_TAGS,
                });
            }
            segments
        }
        RenderedOutput::Boolean { checked } => vec![Segment::Checkbox { checked: *checked }],
        RenderedOutput::Hyperlink { href, label } => vec![Segment::Link {
            href: href.clone(),
            label: label.clone(),
            target: "_blank".to_string(),
        }],
        RenderedOutput::ImageList { urls } => urls
            .iter()
            .map(|url| Segment::Image { src: url.clone() })
            .collect(),
        RenderedOutput::Rating { value } => vec![Segment::Rating {
            value: *value,
            max: RATING_MAX,
            disabled: true,
        }],
        RenderedOutput::ProgressBar { fraction } => vec![Segment::Progress {
            percent: fraction * 100.0,
            show_info: true,
        }],
        RenderedOutput::Empty => Vec::new(),
    }
}

/// CSS class for the kind of content in a cell
pub fn kind_class(output: &RenderedOutput) -> &'static str {
    match output {
        RenderedOutput::PlainText { .. } => "cell-text",
        RenderedOutput::TagList { .. } => "cell-tags",
        RenderedOutput::SingleTag { .. } => "cell-tag",
        RenderedOutput::Boolean { .. } => "cell-checkbox",
        RenderedOutput::Hyperlink { .. } => "cell-link",
        RenderedOutput::ImageList { .. } => "cell-images",
        RenderedOutput::Rating { .. } => "cell-rating",
        RenderedOutput::ProgressBar { .. } => "cell-progress",
        RenderedOutput::CurrencyText { .. } => "cell-currency",
        RenderedOutput::Empty => "cell-empty",
    }
}

pub fn transform_for(offset: f64) -> String {
    format!("translateX({}px)", offset)
}
