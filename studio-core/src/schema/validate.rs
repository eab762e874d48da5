//! Schema validator.
//!
//! Checks every field of a loosely-typed schema description and collects all
//! violations instead of stopping at the first one. The checks never fail on
//! malformed input: anything unexpected becomes an entry in the report.

use super::{is_field_name, is_reference_name, FieldDefinition, FieldKind, FieldType, ModelSchema};
use super::VALID_TYPES;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Properties a field description may carry.
pub const FIELD_PROPERTIES: &[&str] =
    &["type", "required", "unique", "trim", "min", "max", "default", "enum", "ref"];

/// Outcome of [`validate_schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }
}

/// Validate a schema description. Pure and deterministic.
pub fn validate_schema(schema: &Value) -> ValidationReport {
    let (_, errors) = parse_schema(schema);
    ValidationReport::from_errors(errors)
}

/// Validate and convert in one pass. The schema is only meaningful when the
/// error list is empty.
pub(crate) fn parse_schema(schema: &Value) -> (Option<ModelSchema>, Vec<String>) {
    let mut errors = Vec::new();
    let Some(fields) = schema.as_object() else {
        errors.push("Schema must be an object".to_string());
        return (None, errors);
    };

    let mut model = ModelSchema::new();
    for (name, raw) in fields {
        if let Some(field) = parse_field(name, raw, &mut errors) {
            model.insert(name.clone(), field);
        }
    }
    (Some(model), errors)
}

fn parse_field(name: &str, raw: &Value, errors: &mut Vec<String>) -> Option<FieldDefinition> {
    let before = errors.len();

    if !is_field_name(name) {
        errors.push(format!(
            "Invalid field name: {}. Field names must start with a letter and contain only letters and numbers.",
            name
        ));
    }

    let Some(props) = raw.as_object() else {
        errors.push(format!(
            "Invalid definition for field {}: expected an object with a 'type' property.",
            name
        ));
        return None;
    };

    for key in props.keys() {
        if !FIELD_PROPERTIES.contains(&key.as_str()) {
            errors.push(format!("Unknown property '{}' on field {}.", key, name));
        }
    }

    let field_type = match props.get("type") {
        Some(Value::String(token)) => FieldType::parse(token),
        _ => None,
    };
    if field_type.is_none() {
        errors.push(format!(
            "Invalid type for field {}: {}. Valid types are: {}",
            name,
            describe(props.get("type")),
            VALID_TYPES.join(", ")
        ));
    }

    let required = flag(name, props, "required", errors);
    let unique = flag(name, props, "unique", errors);
    let trim = flag(name, props, "trim", errors);
    let min = bound(name, props, "min", errors);
    let max = bound(name, props, "max", errors);
    let default = present(props, "default").cloned();
    let choices = choices(name, field_type, present(props, "enum"), errors);
    let reference = reference(name, field_type, present(props, "ref"), errors);

    let kind = match field_type? {
        // trim only means something on strings; elsewhere it is dropped
        FieldType::String => FieldKind::String { trim, choices },
        FieldType::Number => FieldKind::Number,
        FieldType::Boolean => FieldKind::Boolean,
        FieldType::Date => FieldKind::Date,
        FieldType::ObjectId => FieldKind::ObjectId { reference },
        FieldType::Array => FieldKind::Array,
    };

    if errors.len() > before {
        return None;
    }
    Some(FieldDefinition { kind, required, unique, min, max, default })
}

/// A property counts as absent when missing or `null`.
fn present<'a>(props: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    props.get(key).filter(|v| !v.is_null())
}

fn flag(name: &str, props: &Map<String, Value>, key: &str, errors: &mut Vec<String>) -> bool {
    match present(props, key) {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            errors.push(format!(
                "Invalid constraint '{}' for field {}: expected a boolean, got {}.",
                key, name, other
            ));
            false
        }
    }
}

fn bound(
    name: &str,
    props: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<Number> {
    match present(props, key)? {
        Value::Number(n) => Some(n.clone()),
        other => {
            errors.push(format!(
                "Invalid constraint '{}' for field {}: expected a number, got {}.",
                key, name, other
            ));
            None
        }
    }
}

fn choices(
    name: &str,
    field_type: Option<FieldType>,
    value: Option<&Value>,
    errors: &mut Vec<String>,
) -> Option<Vec<String>> {
    let value = value?;
    match field_type {
        Some(FieldType::String) => {}
        Some(other) => {
            errors.push(format!(
                "Invalid enum for field {}: enum is only allowed on string fields, not {}.",
                name, other
            ));
            return None;
        }
        // Already reported as an invalid type
        None => return None,
    }

    let Some(items) = value.as_array().filter(|items| !items.is_empty()) else {
        errors.push(format!("Invalid enum for field {}: enum must be a non-empty array.", name));
        return None;
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => out.push(s.to_string()),
            None => {
                errors.push(format!("Invalid enum for field {}: enum values must be strings.", name));
                return None;
            }
        }
    }
    Some(out)
}

fn reference(
    name: &str,
    field_type: Option<FieldType>,
    value: Option<&Value>,
    errors: &mut Vec<String>,
) -> Option<String> {
    // an empty ref counts as no ref at all
    let value = value.filter(|v| v.as_str() != Some(""))?;
    match field_type {
        Some(FieldType::ObjectId) => {}
        Some(other) => {
            errors.push(format!(
                "Invalid ref for field {}: ref is only allowed on objectid fields, not {}.",
                name, other
            ));
            return None;
        }
        None => return None,
    }

    match value.as_str() {
        Some(target) if is_reference_name(target) => Some(target.to_string()),
        _ => {
            errors.push(format!(
                "Invalid ref for field {}: {}. Ref must be a valid model name.",
                name,
                describe(Some(value))
            ));
            None
        }
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
