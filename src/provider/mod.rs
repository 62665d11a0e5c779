//! Field metadata provider boundary
//!
//! The formatter never talks to the host service directly. It asks a
//! `MetadataProvider` for per-field formatting configuration and for
//! attachment URLs. Calls may fail; the formatter turns every failure into an
//! empty cell. Execution is single-threaded, so the traits are `?Send`.

pub mod memory;

pub use memory::{FieldMeta, MemoryProvider};

use crate::error::ProviderError;
use crate::models::TypeCode;
use async_trait::async_trait;

/// Handle to one field's metadata
#[async_trait(?Send)]
pub trait FieldHandle {
    /// Numeric format spec, e.g. `"0.00"` or `"#,##0"`
    async fn get_formatter(&self) -> Result<String, ProviderError>;

    /// Date pattern using the lowercase day-token convention, e.g. `"yyyy/MM/dd"`
    async fn get_date_format(&self) -> Result<String, ProviderError>;

    /// ISO currency code, e.g. `"USD"`
    async fn get_currency_code(&self) -> Result<String, ProviderError>;

    /// Number of fraction digits for currency values
    async fn get_decimal_digits(&self) -> Result<u32, ProviderError>;

    /// Declared type of the field
    async fn get_type(&self) -> Result<TypeCode, ProviderError>;

    /// Field a lookup field reads from, when this field is itself a lookup
    async fn get_ref_field_id(&self) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}

/// Source of field metadata and attachment URLs
#[async_trait(?Send)]
pub trait MetadataProvider {
    async fn get_field(&self, field_id: &str) -> Result<Box<dyn FieldHandle>, ProviderError>;

    /// Resolve attachment tokens of one cell to downloadable URLs, in order
    async fn get_cell_attachment_urls(
        &self,
        tokens: &[String],
        field_id: &str,
        record_id: &str,
    ) -> Result<Vec<String>, ProviderError>;
}
