//! Field-type formatter
//!
//! Turns one cell's raw value into a `RenderedOutput`, choosing the branch by
//! the field's `TypeCode`. Branches that need server-side configuration ask
//! the `MetadataProvider` and may suspend. Every failure is caught inside the
//! branch that caused it and the cell degrades to `RenderedOutput::Empty`;
//! nothing here is retried.

pub mod currency;
pub mod date;
pub mod number;
pub mod palette;

use crate::error::FormatError;
use crate::models::{
    FieldDescriptor, FormatOptions, RawCellValue, RecordRef, RenderedOutput, TagItem, TypeCode,
    LIST_DELIMITER,
};
use crate::provider::MetadataProvider;

/// Maximum number of lookup hops before giving up on a reference chain
pub const MAX_ALIAS_DEPTH: usize = 8;

/// Whether `raw` renders as an empty cell for `type_code` without further work.
///
/// Null is empty for every type except checkbox. Number, select, location,
/// auto-number, progress, currency and rating additionally treat any falsy
/// value as empty, which includes a numeric `0`.
pub fn is_empty_for_display(type_code: TypeCode, raw: &RawCellValue) -> bool {
    match type_code {
        TypeCode::Checkbox => false,
        TypeCode::Number
        | TypeCode::SingleSelect
        | TypeCode::MultiSelect
        | TypeCode::Location
        | TypeCode::AutoNumber
        | TypeCode::Progress
        | TypeCode::Currency
        | TypeCode::Rating => !raw.is_truthy(),
        _ => raw.is_null(),
    }
}

/// Format one cell with default options.
///
/// Never fails: any error is logged and the cell renders as `Empty`.
pub async fn format_cell(
    field: &FieldDescriptor,
    raw: &RawCellValue,
    record: &RecordRef,
    provider: &dyn MetadataProvider,
) -> RenderedOutput {
    CellFormatter::new(provider).format(field, raw, record).await
}

/// Formatter bound to one metadata provider
pub struct CellFormatter<'p> {
    provider: &'p dyn MetadataProvider,
    options: FormatOptions,
    palette_size: usize,
}

impl<'p> CellFormatter<'p> {
    pub fn new(provider: &'p dyn MetadataProvider) -> Self {
        Self {
            provider,
            options: FormatOptions::default(),
            palette_size: palette::TAG_COLORS.len(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of tag colors to cycle through for multi-select cells
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    pub async fn format(
        &self,
        field: &FieldDescriptor,
        raw: &RawCellValue,
        record: &RecordRef,
    ) -> RenderedOutput {
        match self.try_format(field, raw, record).await {
            Ok(output) => output,
            Err(FormatError::UnsupportedType(code)) => {
                log::debug!("field {}: no renderer for type code {}", field.id, code);
                RenderedOutput::Empty
            }
            Err(e) => {
                log::warn!("field {} record {}: {}", field.id, record.record_id, e);
                RenderedOutput::Empty
            }
        }
    }

    /// Like `format`, but reports why a cell came out empty
    pub async fn try_format(
        &self,
        field: &FieldDescriptor,
        raw: &RawCellValue,
        record: &RecordRef,
    ) -> Result<RenderedOutput, FormatError> {
        let type_code = if field.type_code.is_alias() {
            self.resolve_alias(field).await?
        } else {
            field.type_code
        };

        if is_empty_for_display(type_code, raw) {
            return Ok(RenderedOutput::Empty);
        }

        self.format_as(type_code, field, raw, record).await
    }

    /// Follow a lookup field to the declared type of the field it references.
    ///
    /// Each hop asks the provider for the referenced field's type; a hop that
    /// lands on another lookup continues from that field's own reference.
    pub async fn resolve_alias(&self, field: &FieldDescriptor) -> Result<TypeCode, FormatError> {
        let mut ref_id = field
            .ref_field_id()
            .map(str::to_string)
            .ok_or_else(|| FormatError::malformed(field.type_code.code(), "lookup without refFieldId"))?;

        for _ in 0..MAX_ALIAS_DEPTH {
            let handle = self.provider.get_field(&ref_id).await?;
            let resolved = handle.get_type().await?;
            if !resolved.is_alias() {
                log::debug!("field {}: lookup resolved to type {}", field.id, resolved);
                return Ok(resolved);
            }
            ref_id = handle
                .get_ref_field_id()
                .await?
                .ok_or(FormatError::AliasDepthExceeded(MAX_ALIAS_DEPTH))?;
        }

        Err(FormatError::AliasDepthExceeded(MAX_ALIAS_DEPTH))
    }

    async fn format_as(
        &self,
        type_code: TypeCode,
        field: &FieldDescriptor,
        raw: &RawCellValue,
        record: &RecordRef,
    ) -> Result<RenderedOutput, FormatError> {
        match type_code {
            TypeCode::Text
            | TypeCode::Barcode
            | TypeCode::Email
            | TypeCode::Phone
            | TypeCode::Formula => Ok(RenderedOutput::text(raw.as_text(type_code)?)),

            TypeCode::SingleSelect => Ok(RenderedOutput::SingleTag {
                label: raw.as_text(type_code)?,
            }),

            TypeCode::MultiSelect => {
                let text = raw.as_text(type_code)?;
                Ok(RenderedOutput::TagList {
                    tags: self.tag_list(&text),
                })
            }

            TypeCode::Number => {
                let handle = self.provider.get_field(&field.id).await?;
                let spec = handle.get_formatter().await?;
                let value = raw.as_number(type_code)?;
                Ok(RenderedOutput::text(number::format_number(&spec, value)))
            }

            TypeCode::DateTime | TypeCode::CreatedTime | TypeCode::ModifiedTime => {
                let handle = self.provider.get_field(&field.id).await?;
                let pattern = date::normalize_day_tokens(&handle.get_date_format().await?);
                let instant = date::parse_timestamp(raw.inner())
                    .ok_or_else(|| FormatError::malformed(type_code.code(), "not a timestamp"))?;
                let text = date::render_pattern(&pattern, instant, self.options.utc_offset_minutes)
                    .ok_or_else(|| FormatError::malformed(type_code.code(), "utc offset out of range"))?;
                Ok(RenderedOutput::text(text))
            }

            TypeCode::Checkbox => Ok(RenderedOutput::Boolean {
                checked: raw.is_truthy(),
            }),

            TypeCode::User
            | TypeCode::CreatedUser
            | TypeCode::ModifiedUser
            | TypeCode::GroupChat => Ok(RenderedOutput::text(
                raw.names(type_code)?.join(LIST_DELIMITER),
            )),

            TypeCode::Url => {
                let label = raw.as_text(type_code)?;
                Ok(RenderedOutput::Hyperlink {
                    href: format!("//{}", label),
                    label,
                })
            }

            TypeCode::Attachment => {
                let tokens = raw.tokens(type_code)?;
                let urls = self
                    .provider
                    .get_cell_attachment_urls(&tokens, &field.id, &record.record_id)
                    .await?;
                Ok(RenderedOutput::ImageList { urls })
            }

            TypeCode::SingleLink | TypeCode::DuplexLink => {
                Ok(RenderedOutput::text(raw.relation_text(type_code)?))
            }

            TypeCode::Location => Ok(RenderedOutput::text(raw.full_address(type_code)?)),

            TypeCode::AutoNumber => Ok(RenderedOutput::text(raw.auto_number(type_code)?)),

            TypeCode::Progress => {
                // The field must exist; its metadata is not needed.
                self.provider.get_field(&field.id).await?;
                Ok(RenderedOutput::progress(raw.as_number(type_code)?))
            }

            TypeCode::Currency => {
                let handle = self.provider.get_field(&field.id).await?;
                let code = handle.get_currency_code().await?;
                let digits = handle.get_decimal_digits().await?;
                if digits > currency::MAX_FRACTION_DIGITS {
                    return Err(FormatError::malformed(
                        type_code.code(),
                        format!("{} decimal digits", digits),
                    ));
                }
                let value = raw.as_number(type_code)?;
                Ok(RenderedOutput::CurrencyText {
                    text: currency::format_currency(&code, value, digits),
                })
            }

            TypeCode::Rating => Ok(RenderedOutput::rating(raw.as_number(type_code)?)),

            // Aliases are resolved before dispatch; reaching here means the
            // chain never produced a concrete type.
            TypeCode::Lookup => Err(FormatError::AliasDepthExceeded(MAX_ALIAS_DEPTH)),

            TypeCode::Unknown(code) => Err(FormatError::UnsupportedType(code)),
        }
    }

    fn tag_list(&self, text: &str) -> Vec<TagItem> {
        text.split(LIST_DELIMITER)
            .enumerate()
            .map(|(i, label)| TagItem {
                label: label.to_string(),
                color_index: palette::color_index(i, self.palette_size),
            })
            .collect()
    }
}
