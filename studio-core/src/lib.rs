//! Mongo Studio - Core
//!
//! A schema-driven model studio: users describe document models as JSON field
//! schemas, and Mongo Studio validates them, generates Mongoose model sources,
//! stores those artifacts on disk and serves generic CRUD over the resulting
//! collections.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use studio_core::{config::StudioConfig, http::StudioServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StudioConfig::load()?;
//!     studio_core::logging::init(&config.logging);
//!     StudioServer::new(config).serve().await
//! }
//! ```
//!
//! # Architecture
//!
//! - [`schema`] - Type vocabulary, field definitions and the schema validator
//! - [`codegen`] - Mongoose model and TypeScript interface generation
//! - [`store`] - One generated `<Name>.model.ts` file per model
//! - [`db`] - Live model table and in-process document collections
//! - [`http`] - hyper server and the JSON API
//! - [`config`] - Layered configuration (defaults, `studio.toml`, env, CLI)
//!
//! Generating a model without the server:
//!
//! ```rust,ignore
//! use studio_core::schema::ModelSchema;
//!
//! let schema = ModelSchema::from_json(&serde_json::json!({
//!     "title": { "type": "string", "required": true }
//! }))?;
//! let source = studio_core::codegen::generate("Widget", &schema)?;
//! ```

pub mod codegen;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod logging;
pub mod schema;
pub mod store;

pub use error::{Result, StudioError};

/// Prelude for the common entry points
pub mod prelude {
    pub use crate::codegen::{generate, generate_interface};
    pub use crate::config::StudioConfig;
    pub use crate::db::{MemoryDatabase, ModelTable};
    pub use crate::error::{Result, StudioError};
    pub use crate::http::StudioServer;
    pub use crate::schema::{validate_schema, FieldType, ModelSchema, ValidationReport};
    pub use crate::store::ModelStore;
}
