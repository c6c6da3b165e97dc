//! JSON Schema validation engine
//!
//! Compiles JSON Schema Draft 4 documents into immutable validator trees
//! and validates instances against them, reporting every violation as a
//! structured message:
//!
//! ```
//! use jsonschema_service::JsonSchemaFactory;
//! use serde_json::json;
//!
//! let factory = JsonSchemaFactory::draft4();
//! let schema = factory
//!     .schema_from_node(json!({
//!         "type": "object",
//!         "properties": {"name": {"type": "string"}},
//!         "required": ["name"]
//!     }))
//!     .expect("schema compiles");
//!
//! let messages = schema.validate(&json!({}));
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages.iter().next().unwrap().path, "$");
//! ```
//!
//! Dialects are open for extension: a [`JsonMetaSchema`] maps keywords to
//! validator factories and names to format validators, and custom dialects
//! register through the factory builder. All `$ref` targets, including
//! remote documents and recursive references, are resolved during
//! compilation, so validation itself never fetches.

pub mod context;
pub mod factory;
pub mod fetcher;
pub mod formats;
pub mod metaschema;
pub mod pointer;
pub mod schema;
pub mod validators;

mod compiler;
mod equality;
mod numeric;

pub use context::ValidationContext;
pub use factory::{JsonSchemaFactory, JsonSchemaFactoryBuilder};
pub use fetcher::StandardUrlFetcher;
pub use formats::Format;
pub use metaschema::{JsonMetaSchema, JsonMetaSchemaBuilder, KeywordFactory, DRAFT4_URI};
pub use schema::{JsonSchema, SchemaGraph, SchemaIndex};
pub use validators::KeywordValidator;

pub use jsonschema_core::{
    MessageSet, Result, SchemaError, UrlFetcher, ValidationMessage, ValidatorTypeCode,
};
