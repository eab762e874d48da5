use anyhow::Result;
use std::path::Path;
use studio_core::schema::{validate_schema, ValidationReport};

use super::read_json;

pub fn report(schema: &Path) -> Result<ValidationReport> {
    Ok(validate_schema(&read_json(schema)?))
}

/// Print the report for `schema`. `false` when the schema is invalid.
pub fn run(schema: &Path) -> Result<bool> {
    let report = report(schema)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.is_valid)
}
