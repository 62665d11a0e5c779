//! Error types for cell formatting
//!
//! None of these errors is fatal to the host grid: the formatter recovers from
//! every variant locally and renders the cell as `RenderedOutput::Empty`.

use thiserror::Error;

/// Failure reported by a field metadata provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Transport failure while talking to the host service
    #[error("network error: {0}")]
    Network(String),

    /// The caller is not allowed to read this field or record
    #[error("permission denied: {0}")]
    Permission(String),

    /// Field, record or attachment token does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A JavaScript promise rejected or returned an unexpected shape
    #[error("javascript error: {0}")]
    Js(String),
}

/// Reasons a single cell could not be formatted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// A metadata provider call failed
    #[error("metadata fetch failed: {0}")]
    MetadataFetch(#[from] ProviderError),

    /// The raw value does not have the shape its type code expects
    #[error("malformed value for type {type_code}: {reason}")]
    MalformedValue { type_code: u32, reason: String },

    /// Type code outside the supported set
    #[error("unsupported field type code {0}")]
    UnsupportedType(u32),

    /// A lookup chain did not reach a concrete type within the depth cap
    #[error("lookup resolution exceeded depth {0}")]
    AliasDepthExceeded(usize),
}

impl FormatError {
    pub fn malformed(type_code: u32, reason: impl Into<String>) -> Self {
        FormatError::MalformedValue {
            type_code,
            reason: reason.into(),
        }
    }
}
