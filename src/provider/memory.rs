//! In-process metadata provider
//!
//! Holds field metadata and attachment URLs in memory. Used by hosts that
//! already have the metadata at hand, and by tests, which can inject failures
//! and count calls.

use super::{FieldHandle, MetadataProvider};
use crate::error::ProviderError;
use crate::models::TypeCode;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// Metadata of one field
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMeta {
    pub type_code: TypeCode,
    pub formatter: Option<String>,
    pub date_format: Option<String>,
    pub currency_code: Option<String>,
    pub decimal_digits: Option<u32>,
    pub ref_field_id: Option<String>,
}

impl FieldMeta {
    pub fn new(type_code: TypeCode) -> Self {
        Self {
            type_code,
            formatter: None,
            date_format: None,
            currency_code: None,
            decimal_digits: None,
            ref_field_id: None,
        }
    }

    pub fn with_formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }

    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = Some(pattern.into());
        self
    }

    pub fn with_currency(mut self, code: impl Into<String>, digits: u32) -> Self {
        self.currency_code = Some(code.into());
        self.decimal_digits = Some(digits);
        self
    }

    pub fn with_ref_field(mut self, ref_field_id: impl Into<String>) -> Self {
        self.ref_field_id = Some(ref_field_id.into());
        self
    }
}

/// Metadata provider backed by hash maps
#[derive(Default)]
pub struct MemoryProvider {
    fields: HashMap<String, FieldMeta>,
    attachment_urls: HashMap<String, String>,
    failing_fields: RefCell<HashSet<String>>,
    fail_attachments: Cell<bool>,
    field_calls: Cell<usize>,
    attachment_calls: Cell<usize>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field_id: impl Into<String>, meta: FieldMeta) -> Self {
        self.fields.insert(field_id.into(), meta);
        self
    }

    pub fn with_attachment(mut self, token: impl Into<String>, url: impl Into<String>) -> Self {
        self.attachment_urls.insert(token.into(), url.into());
        self
    }

    /// Make every `get_field(field_id)` call fail with a network error
    pub fn fail_field(&self, field_id: impl Into<String>) {
        self.failing_fields.borrow_mut().insert(field_id.into());
    }

    /// Make attachment URL resolution fail with a permission error
    pub fn fail_attachments(&self, fail: bool) {
        self.fail_attachments.set(fail);
    }

    /// Number of `get_field` calls served so far
    pub fn field_calls(&self) -> usize {
        self.field_calls.get()
    }

    /// Number of `get_cell_attachment_urls` calls served so far
    pub fn attachment_calls(&self) -> usize {
        self.attachment_calls.get()
    }
}

#[async_trait(?Send)]
impl MetadataProvider for MemoryProvider {
    async fn get_field(&self, field_id: &str) -> Result<Box<dyn FieldHandle>, ProviderError> {
        self.field_calls.set(self.field_calls.get() + 1);

        if self.failing_fields.borrow().contains(field_id) {
            return Err(ProviderError::Network(format!("field {field_id} unreachable")));
        }

        let meta = self
            .fields
            .get(field_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("field {field_id}")))?;

        Ok(Box::new(MemoryFieldHandle {
            field_id: field_id.to_string(),
            meta,
        }))
    }

    async fn get_cell_attachment_urls(
        &self,
        tokens: &[String],
        field_id: &str,
        record_id: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.attachment_calls.set(self.attachment_calls.get() + 1);

        if self.fail_attachments.get() {
            return Err(ProviderError::Permission(format!(
                "attachments of {field_id}/{record_id}"
            )));
        }

        tokens
            .iter()
            .map(|token| {
                self.attachment_urls
                    .get(token)
                    .cloned()
                    .ok_or_else(|| ProviderError::NotFound(format!("attachment token {token}")))
            })
            .collect()
    }
}

struct MemoryFieldHandle {
    field_id: String,
    meta: FieldMeta,
}

impl MemoryFieldHandle {
    fn missing(&self, what: &str) -> ProviderError {
        ProviderError::NotFound(format!("{what} of field {}", self.field_id))
    }
}

#[async_trait(?Send)]
impl FieldHandle for MemoryFieldHandle {
    async fn get_formatter(&self) -> Result<String, ProviderError> {
        self.meta.formatter.clone().ok_or_else(|| self.missing("formatter"))
    }

    async fn get_date_format(&self) -> Result<String, ProviderError> {
        self.meta.date_format.clone().ok_or_else(|| self.missing("date format"))
    }

    async fn get_currency_code(&self) -> Result<String, ProviderError> {
        self.meta.currency_code.clone().ok_or_else(|| self.missing("currency code"))
    }

    async fn get_decimal_digits(&self) -> Result<u32, ProviderError> {
        self.meta.decimal_digits.ok_or_else(|| self.missing("decimal digits"))
    }

    async fn get_type(&self) -> Result<TypeCode, ProviderError> {
        Ok(self.meta.type_code)
    }

    async fn get_ref_field_id(&self) -> Result<Option<String>, ProviderError> {
        Ok(self.meta.ref_field_id.clone())
    }
}
