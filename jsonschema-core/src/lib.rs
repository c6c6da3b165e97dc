//! Core types for JSON Schema validation
//!
//! This crate holds the pieces shared between the validation engine and its
//! callers: the error type for schema loading and configuration failures, the
//! `ValidationMessage` model produced by validation, and the `UrlFetcher`
//! trait the engine consumes to load remote schema documents.
//!
//! No validation logic lives here; see the `jsonschema-service` crate for the
//! engine itself.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, SchemaError};
pub use traits::UrlFetcher;
pub use types::{MessageSet, ValidationMessage, ValidatorTypeCode};
