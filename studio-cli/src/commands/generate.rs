use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use studio_core::codegen;
use studio_core::schema::{validate_model_name, ModelSchema};
use studio_core::store::ModelStore;

use super::read_json;

/// Generate source for `name` from the schema file.
pub fn render(name: &str, schema: &Path, interface: bool) -> Result<String> {
    validate_model_name(name)?;
    let schema = ModelSchema::from_json(&read_json(schema)?)
        .with_context(|| format!("{} is not a valid schema", schema.display()))?;

    let source = if interface {
        codegen::generate_interface(name, &schema)?
    } else {
        codegen::generate(name, &schema)?
    };
    Ok(source)
}

/// Write the model file into `out`, replacing any previous one.
pub async fn write(name: &str, schema: &Path, out: &Path) -> Result<PathBuf> {
    let source = render(name, schema, false)?;
    let path = ModelStore::new(out).write_artifact(name, &source).await?;
    Ok(path)
}

pub async fn run(name: &str, schema: &Path, interface: bool, out: Option<&Path>) -> Result<()> {
    match out {
        Some(out) => {
            let path = write(name, schema, out).await?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", render(name, schema, interface)?),
    }
    Ok(())
}
