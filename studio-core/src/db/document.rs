//! Field rules applied to documents written into a collection.

use crate::schema::{FieldDefinition, FieldKind, ModelSchema};
use serde_json::{Map, Number, Value};

/// Properties stamped by the collection itself.
pub const RESERVED_KEYS: &[&str] = &["_id", "createdAt", "updatedAt"];

/// Check `input` against `schema` and return the stored form of the document
/// (defaults applied, strings trimmed, reserved keys stripped).
///
/// Every violation is collected. Uniqueness is checked by the collection,
/// which can see the other documents.
pub fn prepare(schema: &ModelSchema, input: &Value) -> Result<Map<String, Value>, Vec<String>> {
    let Some(props) = input.as_object() else {
        return Err(vec!["Document must be a JSON object".to_string()]);
    };

    let mut errors = Vec::new();
    for key in props.keys() {
        if !RESERVED_KEYS.contains(&key.as_str()) && !schema.contains(key) {
            errors.push(format!("Unknown field '{}'", key));
        }
    }

    let mut doc = Map::new();
    for (name, field) in schema.iter() {
        let value = match props.get(name).filter(|v| !v.is_null()) {
            Some(value) => value.clone(),
            None => match &field.default {
                Some(default) => default.clone(),
                None => {
                    if field.required {
                        errors.push(format!("Field '{}' is required", name));
                    }
                    continue;
                }
            },
        };

        match check_value(name, field, value) {
            Ok(value) => {
                doc.insert(name.to_string(), value);
            }
            Err(message) => errors.push(message),
        }
    }

    if errors.is_empty() {
        Ok(doc)
    } else {
        Err(errors)
    }
}

fn check_value(name: &str, field: &FieldDefinition, value: Value) -> Result<Value, String> {
    match (&field.kind, value) {
        (FieldKind::String { trim, choices }, Value::String(s)) => {
            let s = if *trim { s.trim().to_string() } else { s };
            if field.required && s.is_empty() {
                return Err(format!("Field '{}' is required", name));
            }
            if let Some(choices) = choices {
                if !choices.contains(&s) {
                    return Err(format!(
                        "Field '{}' must be one of: {} (got \"{}\")",
                        name,
                        choices.join(", "),
                        s
                    ));
                }
            }
            check_bounds(name, field, s.chars().count() as f64, "length")?;
            Ok(Value::String(s))
        }
        (FieldKind::Number, Value::Number(n)) => {
            check_bounds(name, field, as_f64(&n), "value")?;
            Ok(Value::Number(n))
        }
        (FieldKind::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
        (FieldKind::Date, Value::String(s)) if is_date(&s) => Ok(Value::String(s)),
        (FieldKind::ObjectId { .. }, Value::String(s)) if is_object_id(&s) => Ok(Value::String(s)),
        (FieldKind::Array, Value::Array(items)) => {
            check_bounds(name, field, items.len() as f64, "length")?;
            Ok(Value::Array(items))
        }
        (kind, other) => Err(format!(
            "Field '{}' expects a {} value, got {}",
            name,
            kind.field_type(),
            other
        )),
    }
}

fn check_bounds(name: &str, field: &FieldDefinition, actual: f64, what: &str) -> Result<(), String> {
    if let Some(min) = &field.min {
        if actual < as_f64(min) {
            return Err(format!("Field '{}' {} must be at least {}", name, what, min));
        }
    }
    if let Some(max) = &field.max {
        if actual > as_f64(max) {
            return Err(format!("Field '{}' {} must be at most {}", name, what, max));
        }
    }
    Ok(())
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
fn is_date(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// 24-digit hex (Mongo style) or a UUID.
fn is_object_id(s: &str) -> bool {
    (s.len() == 24 && s.chars().all(|c| c.is_ascii_hexdigit())) || uuid::Uuid::parse_str(s).is_ok()
}
