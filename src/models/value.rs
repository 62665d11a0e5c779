//! Raw cell values
//!
//! The host hands over whatever JSON shape the field type stores. Accessors
//! here check that shape and report `FormatError::MalformedValue` instead of
//! panicking, so one odd record only blanks its own cell.

use crate::error::FormatError;
use crate::models::TypeCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Delimiter used by the host for multi-valued text (full-width comma)
pub const LIST_DELIMITER: &str = "，";

/// Untyped value of one cell
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct RawCellValue(pub Value);

impl RawCellValue {
    pub fn null() -> Self {
        RawCellValue(Value::Null)
    }

    pub fn inner(&self) -> &Value {
        &self.0
    }

    /// `null` or a missing value
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Host truthiness: false for null, `false`, zero, NaN and the empty string
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|v| v != 0.0 && !v.is_nan()).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Display text for passthrough types.
    ///
    /// Accepts primitives and arrays of text segments (`[{ "text": .. }]`).
    pub fn as_text(&self, type_code: TypeCode) -> Result<String, FormatError> {
        match &self.0 {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(number_to_string(n)),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Object(map) => map
                        .get("text")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .ok_or_else(|| FormatError::malformed(type_code.code(), "segment without text")),
                    _ => Err(FormatError::malformed(type_code.code(), "unexpected segment")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|parts| parts.concat()),
            Value::Object(map) => map
                .get("text")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| FormatError::malformed(type_code.code(), "object without text")),
            Value::Null => Err(FormatError::malformed(type_code.code(), "null value")),
        }
    }

    /// Numeric value; numeric strings are accepted
    pub fn as_number(&self, type_code: TypeCode) -> Result<f64, FormatError> {
        match &self.0 {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| FormatError::malformed(type_code.code(), "number out of range")),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| FormatError::malformed(type_code.code(), format!("not a number: {s}"))),
            other => Err(FormatError::malformed(
                type_code.code(),
                format!("expected number, got {}", kind_of(other)),
            )),
        }
    }

    /// `name` of every element of a people/group array
    pub fn names(&self, type_code: TypeCode) -> Result<Vec<String>, FormatError> {
        self.array_members(type_code, "name")
    }

    /// `token` of every element of an attachment array
    pub fn tokens(&self, type_code: TypeCode) -> Result<Vec<String>, FormatError> {
        let items = self
            .0
            .as_array()
            .ok_or_else(|| FormatError::malformed(type_code.code(), "expected attachment array"))?;
        items
            .iter()
            .map(|item| {
                item.get("token")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| FormatError::malformed(type_code.code(), "attachment without token"))
            })
            .collect()
    }

    /// Relation display text: `.text` of an object, or the value itself
    pub fn relation_text(&self, type_code: TypeCode) -> Result<String, FormatError> {
        match &self.0 {
            Value::Object(map) => match map.get("text") {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(Value::Null) | None => Ok(String::new()),
                Some(other) => RawCellValue(other.clone()).as_text(type_code),
            },
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(number_to_string(n)),
            other => Err(FormatError::malformed(
                type_code.code(),
                format!("expected relation object or text, got {}", kind_of(other)),
            )),
        }
    }

    /// `fullAddress` of a location object
    pub fn full_address(&self, type_code: TypeCode) -> Result<String, FormatError> {
        self.object_member(type_code, "fullAddress")
    }

    /// `value` of an auto-number wrapper
    pub fn auto_number(&self, type_code: TypeCode) -> Result<String, FormatError> {
        self.object_member(type_code, "value")
    }

    fn array_members(&self, type_code: TypeCode, key: &str) -> Result<Vec<String>, FormatError> {
        let items = self
            .0
            .as_array()
            .ok_or_else(|| FormatError::malformed(type_code.code(), format!("expected array of {{{key}}}")))?;
        Ok(items
            .iter()
            .map(|item| item.get(key).and_then(Value::as_str).unwrap_or_default().to_string())
            .collect())
    }

    fn object_member(&self, type_code: TypeCode, key: &str) -> Result<String, FormatError> {
        let map = self
            .0
            .as_object()
            .ok_or_else(|| FormatError::malformed(type_code.code(), format!("expected {{{key}}} object")))?;
        match map.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(number_to_string(n)),
            _ => Err(FormatError::malformed(type_code.code(), format!("missing {key}"))),
        }
    }
}

impl From<Value> for RawCellValue {
    fn from(value: Value) -> Self {
        RawCellValue(value)
    }
}

/// Integer-valued numbers print without a fraction, like the host does
pub fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_f64).unwrap_or_default()
    }
}

pub fn format_f64(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
