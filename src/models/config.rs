//! Cell configuration
//!
//! Deserialized from the dashboard's custom config. The container height is
//! passed in explicitly by the host whenever the dashboard root resizes.

use serde::{Deserialize, Serialize};

/// Default marquee speed in pixels per second
pub const DEFAULT_TEXT_SPEED: f64 = 30.0;

fn default_text_speed() -> f64 {
    DEFAULT_TEXT_SPEED
}

/// Per-cell display configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CellConfig {
    /// Scroll overflowing text instead of clipping it
    #[serde(default)]
    pub overflow_ellipsis: bool,

    /// Marquee speed in pixels per second
    #[serde(default = "default_text_speed")]
    pub text_speed: f64,

    /// Height of the dashboard root in pixels; a change triggers re-measurement
    #[serde(default)]
    pub container_height: Option<f64>,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            overflow_ellipsis: false,
            text_speed: DEFAULT_TEXT_SPEED,
            container_height: None,
        }
    }
}

impl CellConfig {
    pub fn scrolling(text_speed: f64) -> Self {
        Self {
            overflow_ellipsis: true,
            text_speed,
            container_height: None,
        }
    }
}

/// Options for the formatter that do not come from field metadata
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    /// Offset from UTC used when rendering timestamps, in minutes (east positive)
    #[serde(default)]
    pub utc_offset_minutes: i32,
}
