//! Dashboard Cell Renderer WASM Module
//!
//! Renders a table cell's raw value according to its field type and scrolls
//! the result as a marquee when it overflows the cell.

pub mod error;
pub mod models;
pub mod provider;
pub mod format;
pub mod marquee;
pub mod view;
pub mod api;

// Re-export commonly used types
pub use error::{FormatError, ProviderError};
pub use format::{format_cell, is_empty_for_display, CellFormatter};
pub use marquee::{MarqueeConfig, MarqueeController, MarqueePhase, MarqueeState};
pub use models::*;
pub use provider::{FieldHandle, MetadataProvider};
pub use view::{CellDisplay, CellView};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // A logger was already installed by the host page
        return;
    }

    log::info!("Dashboard cell WASM module initialized");
}
