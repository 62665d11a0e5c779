//! Models module for the dashboard cell renderer
//!
//! This module contains the data models shared by the formatter,
//! the marquee controller and the JavaScript API.

pub mod field;
pub mod value;
pub mod rendered;
pub mod config;

// Re-export commonly used types
pub use field::{FieldDescriptor, FieldProperty, RecordRef, TypeCode};
pub use value::{RawCellValue, LIST_DELIMITER};
pub use rendered::{RenderedOutput, TagItem, RATING_MAX};
pub use config::{CellConfig, FormatOptions};
