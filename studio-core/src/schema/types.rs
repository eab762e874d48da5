//! Type vocabulary: the fixed set of field types a model may use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower-case type tokens accepted by the validator, in display order.
pub const VALID_TYPES: &[&str] = &["string", "number", "boolean", "date", "objectid", "array"];

/// A supported field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    ObjectId,
    Array,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::ObjectId,
        FieldType::Array,
    ];

    /// Case-insensitive lookup of a type token (`"String"`, `"objectId"`, ...).
    ///
    /// `object` is deliberately absent: the UI offers it but nothing maps it.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "boolean" => Some(FieldType::Boolean),
            "date" => Some(FieldType::Date),
            "objectid" => Some(FieldType::ObjectId),
            "array" => Some(FieldType::Array),
            _ => None,
        }
    }

    /// Canonical lower-case token.
    pub fn token(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::ObjectId => "objectid",
            FieldType::Array => "array",
        }
    }

    /// Runtime type used in the generated `new Schema({...})` block.
    pub fn runtime_tag(self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Boolean => "Boolean",
            FieldType::Date => "Date",
            FieldType::ObjectId => "Schema.Types.ObjectId",
            FieldType::Array => "Array",
        }
    }

    /// TypeScript annotation used in the generated document interface.
    pub fn annotation(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "Date",
            FieldType::ObjectId => "mongoose.Types.ObjectId",
            FieldType::Array => "any[]",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
