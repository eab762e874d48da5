//! Mongoose model generator.

use super::check_model_name;
use crate::error::Result;
use crate::schema::{FieldDefinition, FieldType, ModelSchema};
use serde_json::Value;

/// Field that triggers the `comparePassword` method stub.
pub const PASSWORD_FIELD: &str = "password";

/// Generate the Mongoose model source for `model_name`.
///
/// Emits, in order: the `I<Name>` document interface (plus `createdAt` /
/// `updatedAt`), the `<Name>Schema` field block with timestamps enabled, a
/// `comparePassword` stub when a `password` field exists, and the model export.
pub fn generate(model_name: &str, schema: &ModelSchema) -> Result<String> {
    check_model_name(model_name)?;

    let mut code = String::from("import mongoose, { Schema, Document } from 'mongoose';\n\n");

    code.push_str(&format!("export interface I{} extends Document {{\n", model_name));
    for (name, field) in schema.iter() {
        let optional = if field.required { "" } else { "?" };
        code.push_str(&format!("  {}{}: {};\n", name, optional, field.field_type().annotation()));
    }
    code.push_str(&format!("  createdAt: {};\n", FieldType::Date.annotation()));
    code.push_str(&format!("  updatedAt: {};\n", FieldType::Date.annotation()));
    code.push_str("}\n\n");

    code.push_str(&format!("const {}Schema = new Schema({{\n", model_name));
    for (name, field) in schema.iter() {
        code.push_str(&format!("  {}: {{\n", name));
        for (key, value) in schema_entries(field) {
            code.push_str(&format!("    {}: {},\n", key, value));
        }
        code.push_str("  },\n");
    }
    code.push_str("}, {\n  timestamps: true\n});\n\n");

    if schema.contains(PASSWORD_FIELD) {
        code.push_str(&format!(
            "{}Schema.methods.comparePassword = async function(candidatePassword: string): Promise<boolean> {{\n",
            model_name
        ));
        code.push_str("  // Replace with a comparison against the stored password hash.\n");
        code.push_str("  throw new Error('comparePassword is not implemented');\n");
        code.push_str("};\n\n");
    }

    code.push_str(&format!(
        "const {name}Model = mongoose.model<I{name}>('{name}', {name}Schema);\n",
        name = model_name
    ));
    code.push_str(&format!("export default {}Model;\n", model_name));

    Ok(code)
}

/// Key/value pairs of one field's schema block, in emission order.
fn schema_entries(field: &FieldDefinition) -> Vec<(&'static str, String)> {
    let mut entries = vec![("type", field.field_type().runtime_tag().to_string())];

    if field.required {
        entries.push(("required", "true".to_string()));
    }
    if field.unique {
        entries.push(("unique", "true".to_string()));
    }
    if field.trim() {
        entries.push(("trim", "true".to_string()));
    }
    if let Some(min) = &field.min {
        entries.push(("min", min.to_string()));
    }
    if let Some(max) = &field.max {
        entries.push(("max", max.to_string()));
    }
    if let Some(default) = &field.default {
        entries.push(("default", literal(default)));
    }
    if let Some(choices) = field.choices() {
        let items: Vec<Value> = choices.iter().cloned().map(Value::String).collect();
        entries.push(("enum", literal(&Value::Array(items))));
    }
    if let Some(target) = field.reference() {
        entries.push(("ref", literal(&Value::String(target.to_string()))));
    }

    entries
}

/// JSON rendering doubles as a TypeScript literal.
fn literal(value: &Value) -> String {
    value.to_string()
}
