//! Dashboard cell WASM API
//!
//! This module provides the JavaScript-facing API of the cell renderer.
//!
//! # Module Structure
//!
//! - `helpers`: logging, serialization and error conversion
//! - `provider`: metadata provider backed by the host SDK's table object
//! - `scheduler`: `setInterval`-backed timers for the marquee
//! - `format`: `formatCell`
//! - `cell`: `WasmCell`, the mountable cell

pub mod helpers;
pub mod provider;
pub mod scheduler;
pub mod format;
pub mod cell;

pub use format::format_cell;
pub use cell::WasmCell;
pub use provider::JsMetadataProvider;
pub use scheduler::BrowserScheduler;
