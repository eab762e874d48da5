//! Model code generation.
//!
//! Pure functions from a validated [`ModelSchema`](crate::schema::ModelSchema)
//! to TypeScript source text. Output is deterministic: fields appear in schema
//! order and constraint keys in a fixed order, so artifacts diff cleanly.
//!
//! - [`generate`] - the Mongoose model file stored for every model
//! - [`generate_interface`] - a standalone interface with literal-union enums

pub mod interface;
pub mod mongoose;

pub use interface::generate_interface;
pub use mongoose::generate;

use crate::error::{Result, StudioError};
use crate::schema::is_identifier;

/// Extension of generated model files.
pub const ARTIFACT_EXTENSION: &str = ".model.ts";

pub(crate) fn check_model_name(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(StudioError::Generation(format!(
            "model name \"{}\" is not a valid identifier",
            name
        )))
    }
}
