//! Metadata provider backed by JavaScript objects
//!
//! Adapts the host SDK's table object: `getField(id)` returns a field object
//! with `getFormatter`, `getDateFormat`, `getCurrencyCode`,
//! `getDecimalDigits` and `getType`; `getCellAttachmentUrls(tokens, fieldId,
//! recordId)` resolves attachment tokens. Every method may return a plain
//! value or a promise.

use super::helpers::js_error_message;
use crate::error::ProviderError;
use crate::format::currency::MAX_FRACTION_DIGITS;
use crate::models::TypeCode;
use crate::provider::{FieldHandle, MetadataProvider};
use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Call `target[name](...args)` and await the result if it is a promise
async fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, ProviderError> {
    let method = js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| ProviderError::Js(js_error_message(&e)))?;
    let function: js_sys::Function = method
        .dyn_into()
        .map_err(|_| ProviderError::Js(format!("{} is not a function", name)))?;

    let js_args: js_sys::Array = args.iter().collect();
    let result = function
        .apply(target, &js_args)
        .map_err(|e| ProviderError::Js(js_error_message(&e)))?;

    JsFuture::from(js_sys::Promise::resolve(&result))
        .await
        .map_err(|e| ProviderError::Js(js_error_message(&e)))
}

fn has_method(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map(|v| v.is_function())
        .unwrap_or(false)
}

fn expect_string(value: JsValue, what: &str) -> Result<String, ProviderError> {
    value
        .as_string()
        .ok_or_else(|| ProviderError::Js(format!("{} is not a string", what)))
}

fn expect_number(value: JsValue, what: &str) -> Result<f64, ProviderError> {
    value
        .as_f64()
        .ok_or_else(|| ProviderError::Js(format!("{} is not a number", what)))
}

/// Host table object used as a `MetadataProvider`
pub struct JsMetadataProvider {
    table: JsValue,
}

impl JsMetadataProvider {
    pub fn new(table: JsValue) -> Self {
        Self { table }
    }
}

#[async_trait(?Send)]
impl MetadataProvider for JsMetadataProvider {
    async fn get_field(&self, field_id: &str) -> Result<Box<dyn FieldHandle>, ProviderError> {
        let field = call_method(&self.table, "getField", &[JsValue::from_str(field_id)]).await?;
        if field.is_undefined() || field.is_null() {
            return Err(ProviderError::NotFound(format!("field {}", field_id)));
        }
        Ok(Box::new(JsFieldHandle { field }))
    }

    async fn get_cell_attachment_urls(
        &self,
        tokens: &[String],
        field_id: &str,
        record_id: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let js_tokens: js_sys::Array = tokens.iter().map(|t| JsValue::from_str(t)).collect();
        let urls = call_method(
            &self.table,
            "getCellAttachmentUrls",
            &[js_tokens.into(), JsValue::from_str(field_id), JsValue::from_str(record_id)],
        )
        .await?;
        serde_wasm_bindgen::from_value(urls).map_err(|e| ProviderError::Js(e.to_string()))
    }
}

struct JsFieldHandle {
    field: JsValue,
}

#[async_trait(?Send)]
impl FieldHandle for JsFieldHandle {
    async fn get_formatter(&self) -> Result<String, ProviderError> {
        let spec = call_method(&self.field, "getFormatter", &[]).await?;
        // Fields without a custom format report nothing
        if spec.is_undefined() || spec.is_null() {
            return Ok(String::new());
        }
        expect_string(spec, "number formatter")
    }

    async fn get_date_format(&self) -> Result<String, ProviderError> {
        expect_string(call_method(&self.field, "getDateFormat", &[]).await?, "date format")
    }

    async fn get_currency_code(&self) -> Result<String, ProviderError> {
        expect_string(call_method(&self.field, "getCurrencyCode", &[]).await?, "currency code")
    }

    async fn get_decimal_digits(&self) -> Result<u32, ProviderError> {
        let digits = expect_number(call_method(&self.field, "getDecimalDigits", &[]).await?, "decimal digits")?;
        let digits = digits.trunc();
        if !(0.0..=f64::from(MAX_FRACTION_DIGITS)).contains(&digits) {
            return Err(ProviderError::Js(format!("decimal digits out of range: {}", digits)));
        }
        Ok(digits as u32)
    }

    async fn get_type(&self) -> Result<TypeCode, ProviderError> {
        let code = expect_number(call_method(&self.field, "getType", &[]).await?, "field type")?;
        Ok(TypeCode::from(code as u32))
    }

    async fn get_ref_field_id(&self) -> Result<Option<String>, ProviderError> {
        if !has_method(&self.field, "getProperty") {
            return Ok(None);
        }
        let property = call_method(&self.field, "getProperty", &[]).await?;
        if property.is_undefined() || property.is_null() {
            return Ok(None);
        }
        let ref_id = js_sys::Reflect::get(&property, &JsValue::from_str("refFieldId"))
            .map_err(|e| ProviderError::Js(js_error_message(&e)))?;
        Ok(ref_id.as_string())
    }
}
