//! Model schemas: field definitions, the type vocabulary and the validator.
//!
//! Schemas arrive from the UI as loosely-typed JSON. [`validate_schema`]
//! inspects that JSON and reports every problem it finds; [`ModelSchema::from_json`]
//! runs the same checks and, when they pass, yields the typed schema the
//! generator consumes. Field order is the JSON object's insertion order.

pub mod types;
pub mod validate;

pub use types::{FieldType, VALID_TYPES};
pub use validate::{validate_schema, ValidationReport};

use crate::error::{Result, StudioError};
use serde_json::{Number, Value};

/// Type-specific part of a field. `enum` and `ref` only exist on the kinds
/// that accept them.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String { trim: bool, choices: Option<Vec<String>> },
    Number,
    Boolean,
    Date,
    ObjectId { reference: Option<String> },
    Array,
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::String { .. } => FieldType::String,
            FieldKind::Number => FieldType::Number,
            FieldKind::Boolean => FieldType::Boolean,
            FieldKind::Date => FieldType::Date,
            FieldKind::ObjectId { .. } => FieldType::ObjectId,
            FieldKind::Array => FieldType::Array,
        }
    }
}

/// One schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub kind: FieldKind,
    pub required: bool,
    pub unique: bool,
    pub min: Option<Number>,
    pub max: Option<Number>,
    pub default: Option<Value>,
}

impl FieldDefinition {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind, required: false, unique: false, min: None, max: None, default: None }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn trim(&self) -> bool {
        matches!(self.kind, FieldKind::String { trim: true, .. })
    }

    pub fn choices(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::String { choices, .. } => choices.as_deref(),
            _ => None,
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::ObjectId { reference } => reference.as_deref(),
            _ => None,
        }
    }
}

/// Ordered mapping from field name to definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSchema {
    fields: Vec<(String, FieldDefinition)>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON schema description.
    ///
    /// Fails with [`StudioError::Validation`] carrying every problem found.
    pub fn from_json(value: &Value) -> Result<Self> {
        let (schema, errors) = validate::parse_schema(value);
        match schema {
            Some(schema) if errors.is_empty() => Ok(schema),
            _ => Err(StudioError::Validation(errors)),
        }
    }

    /// Append a field, replacing an existing one of the same name in place.
    pub fn with_field(mut self, name: impl Into<String>, field: FieldDefinition) -> Self {
        self.insert(name.into(), field);
        self
    }

    pub(crate) fn insert(&mut self, name: String, field: FieldDefinition) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((name, field)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// `^[A-Za-z][A-Za-z0-9]*$`
pub fn is_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// `^[A-Z][A-Za-z0-9]*$`, the convention for `ref` targets.
pub fn is_reference_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// `^[A-Za-z_][A-Za-z0-9_]*$`: usable both as a file stem and as a TypeScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Model-level name check run before a model is created.
pub fn validate_model_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(StudioError::BadRequest("Model name must be a non-empty string".into()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(StudioError::BadRequest(format!(
            "Invalid model name: \"{}\". Model names cannot contain whitespace.",
            name
        )));
    }
    if !is_identifier(name) {
        return Err(StudioError::BadRequest(format!(
            "Invalid model name: \"{}\". Model names must start with a letter or underscore and contain only letters, numbers and underscores.",
            name
        )));
    }
    Ok(())
}
