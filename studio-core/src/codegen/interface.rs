//! Plain TypeScript interface generator.
//!
//! Unlike the Mongoose model this output has no runtime part: string enums
//! become literal unions and references are typed by the target model name.

use super::check_model_name;
use crate::error::Result;
use crate::schema::{FieldDefinition, FieldKind, ModelSchema};

pub fn generate_interface(model_name: &str, schema: &ModelSchema) -> Result<String> {
    check_model_name(model_name)?;

    let mut code = format!("interface {} {{\n", model_name);
    for (name, field) in schema.iter() {
        let optional = if field.required { "" } else { "?" };
        code.push_str(&format!("  {}{}: {};\n", name, optional, annotation(field)));
    }
    code.push_str("}\n");
    Ok(code)
}

fn annotation(field: &FieldDefinition) -> String {
    match &field.kind {
        FieldKind::String { choices: Some(choices), .. } => choices
            .iter()
            .map(|c| quote(c))
            .collect::<Vec<_>>()
            .join(" | "),
        FieldKind::ObjectId { reference: Some(target) } => target.clone(),
        FieldKind::ObjectId { reference: None } => "string".to_string(),
        _ => field.field_type().annotation().to_string(),
    }
}

/// Single-quoted TypeScript string literal.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
