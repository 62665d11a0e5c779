//! WASM API for cell formatting

use super::helpers::{deserialize, deserialize_or_default, serialize};
use super::provider::JsMetadataProvider;
use crate::format::CellFormatter;
use crate::models::{FieldDescriptor, FormatOptions, RawCellValue, RecordRef, RenderedOutput};
use crate::{wasm_log, wasm_warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Format one cell value
///
/// # Parameters
/// - `field`: `{ id, type, property? }` as the host describes the column
/// - `raw`: the cell's raw value (any shape; `undefined`/`null` allowed)
/// - `record_id`: id of the record the cell belongs to
/// - `provider`: host table object used for field metadata and attachment URLs
/// - `options`: optional `{ utcOffsetMinutes }`
///
/// # Returns
/// Promise resolving to a `RenderedOutput` object (`{ kind: "plainText", text }`, ...).
/// The promise only rejects when `field` or `options` cannot be read.
#[wasm_bindgen(js_name = formatCell)]
pub fn format_cell(
    field: JsValue,
    raw: JsValue,
    record_id: String,
    provider: JsValue,
    options: JsValue,
) -> Result<js_sys::Promise, JsValue> {
    let field: FieldDescriptor = deserialize(field, "Field descriptor deserialization error")?;
    let options: FormatOptions = deserialize_or_default(options, "Format options deserialization error")?;

    let raw: Option<RawCellValue> = match deserialize_or_default(raw, "Cell value deserialization error") {
        Ok(raw) => Some(raw),
        Err(_) => {
            wasm_warn!("formatCell: unreadable value for field {}, rendering empty", field.id);
            None
        }
    };

    wasm_log!("formatCell: field={} type={} record={}", field.id, field.type_code, record_id);

    Ok(future_to_promise(async move {
        let output = match raw {
            Some(raw) => {
                let provider = JsMetadataProvider::new(provider);
                CellFormatter::new(&provider)
                    .with_options(options)
                    .format(&field, &raw, &RecordRef::new(record_id))
                    .await
            }
            None => RenderedOutput::Empty,
        };
        serialize(&output, "Rendered output serialization error")
    }))
}
