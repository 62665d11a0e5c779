//! Field descriptors and type codes
//!
//! A `FieldDescriptor` is owned by the host table and handed to the formatter
//! by reference. The `TypeCode` decides which formatting branch runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a table field, keyed by the host's numeric code.
///
/// Codes outside the supported set are kept as `Unknown(code)` so that a
/// newer host never crashes the grid; they render as an empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum TypeCode {
    /// Multi-line text (1)
    Text,
    /// Number (2)
    Number,
    /// Single select (3)
    SingleSelect,
    /// Multi select (4)
    MultiSelect,
    /// Date (5)
    DateTime,
    /// Checkbox (7)
    Checkbox,
    /// People (11)
    User,
    /// Phone number (13)
    Phone,
    /// Hyperlink (15)
    Url,
    /// Attachment (17)
    Attachment,
    /// One-way relation (18)
    SingleLink,
    /// Lookup / reference (19)
    Lookup,
    /// Formula (20)
    Formula,
    /// Two-way relation (21)
    DuplexLink,
    /// Location (22)
    Location,
    /// Group chat (23)
    GroupChat,
    /// Created time (1001)
    CreatedTime,
    /// Modified time (1002)
    ModifiedTime,
    /// Created by (1003)
    CreatedUser,
    /// Modified by (1004)
    ModifiedUser,
    /// Auto number (1005)
    AutoNumber,
    /// QR / barcode string (99001)
    Barcode,
    /// Progress (99002)
    Progress,
    /// Currency (99003)
    Currency,
    /// Rating (99004)
    Rating,
    /// Email (99005)
    Email,
    /// Any code the host sends that is not listed above
    Unknown(u32),
}

impl TypeCode {
    /// Numeric code as the host knows it
    pub fn code(&self) -> u32 {
        match self {
            TypeCode::Text => 1,
            TypeCode::Number => 2,
            TypeCode::SingleSelect => 3,
            TypeCode::MultiSelect => 4,
            TypeCode::DateTime => 5,
            TypeCode::Checkbox => 7,
            TypeCode::User => 11,
            TypeCode::Phone => 13,
            TypeCode::Url => 15,
            TypeCode::Attachment => 17,
            TypeCode::SingleLink => 18,
            TypeCode::Lookup => 19,
            TypeCode::Formula => 20,
            TypeCode::DuplexLink => 21,
            TypeCode::Location => 22,
            TypeCode::GroupChat => 23,
            TypeCode::CreatedTime => 1001,
            TypeCode::ModifiedTime => 1002,
            TypeCode::CreatedUser => 1003,
            TypeCode::ModifiedUser => 1004,
            TypeCode::AutoNumber => 1005,
            TypeCode::Barcode => 99001,
            TypeCode::Progress => 99002,
            TypeCode::Currency => 99003,
            TypeCode::Rating => 99004,
            TypeCode::Email => 99005,
            TypeCode::Unknown(code) => *code,
        }
    }

    /// Every supported type, in code order
    pub fn supported() -> &'static [TypeCode] {
        &[
            TypeCode::Text,
            TypeCode::Number,
            TypeCode::SingleSelect,
            TypeCode::MultiSelect,
            TypeCode::DateTime,
            TypeCode::Checkbox,
            TypeCode::User,
            TypeCode::Phone,
            TypeCode::Url,
            TypeCode::Attachment,
            TypeCode::SingleLink,
            TypeCode::Lookup,
            TypeCode::Formula,
            TypeCode::DuplexLink,
            TypeCode::Location,
            TypeCode::GroupChat,
            TypeCode::CreatedTime,
            TypeCode::ModifiedTime,
            TypeCode::CreatedUser,
            TypeCode::ModifiedUser,
            TypeCode::AutoNumber,
            TypeCode::Barcode,
            TypeCode::Progress,
            TypeCode::Currency,
            TypeCode::Rating,
            TypeCode::Email,
        ]
    }

    /// Types whose effective type comes from another field
    pub fn is_alias(&self) -> bool {
        matches!(self, TypeCode::Lookup)
    }
}

impl From<u32> for TypeCode {
    fn from(code: u32) -> Self {
        match code {
            1 => TypeCode::Text,
            2 => TypeCode::Number,
            3 => TypeCode::SingleSelect,
            4 => TypeCode::MultiSelect,
            5 => TypeCode::DateTime,
            7 => TypeCode::Checkbox,
            11 => TypeCode::User,
            13 => TypeCode::Phone,
            15 => TypeCode::Url,
            17 => TypeCode::Attachment,
            18 => TypeCode::SingleLink,
            19 => TypeCode::Lookup,
            20 => TypeCode::Formula,
            21 => TypeCode::DuplexLink,
            22 => TypeCode::Location,
            23 => TypeCode::GroupChat,
            1001 => TypeCode::CreatedTime,
            1002 => TypeCode::ModifiedTime,
            1003 => TypeCode::CreatedUser,
            1004 => TypeCode::ModifiedUser,
            1005 => TypeCode::AutoNumber,
            99001 => TypeCode::Barcode,
            99002 => TypeCode::Progress,
            99003 => TypeCode::Currency,
            99004 => TypeCode::Rating,
            99005 => TypeCode::Email,
            other => TypeCode::Unknown(other),
        }
    }
}

impl From<TypeCode> for u32 {
    fn from(type_code: TypeCode) -> Self {
        type_code.code()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Extra per-field configuration supplied by the host
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldProperty {
    /// Field a lookup/reference field reads from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_field_id: Option<String>,
}

/// A table column as the host describes it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub type_code: TypeCode,
    #[serde(default)]
    pub property: Option<FieldProperty>,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, type_code: TypeCode) -> Self {
        Self {
            id: id.into(),
            type_code,
            property: None,
        }
    }

    /// Builder for lookup fields
    pub fn with_ref_field(mut self, ref_field_id: impl Into<String>) -> Self {
        self.property = Some(FieldProperty {
            ref_field_id: Some(ref_field_id.into()),
        });
        self
    }

    pub fn ref_field_id(&self) -> Option<&str> {
        self.property
            .as_ref()
            .and_then(|p| p.ref_field_id.as_deref())
    }
}

/// The record a cell belongs to
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordRef {
    pub record_id: String,
}

impl RecordRef {
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_u32() {
        for type_code in TypeCode::supported() {
            assert_eq!(TypeCode::from(type_code.code()), *type_code);
        }
        assert_eq!(TypeCode::from(42), TypeCode::Unknown(42));
    }

    #[test]
    fn test_descriptor_deserializes_host_shape() {
        let json = r#"{"id":"fld1","type":19,"property":{"refFieldId":"fld2"}}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.type_code, TypeCode::Lookup);
        assert_eq!(field.ref_field_id(), Some("fld2"));
    }
}
