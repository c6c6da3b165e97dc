//! Error types for schema loading and configuration
//!
//! These errors cover the infrastructure side of validation: building a
//! factory, loading and parsing schema documents, and resolving `$ref`
//! targets. Failures of an *instance* against a schema are not errors; they
//! are returned as [`ValidationMessage`](crate::types::ValidationMessage)
//! values from `validate`.

use thiserror::Error;

/// Main error type for schema operations
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Factory builder was given an unusable configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The `$schema` URI of a document is not registered with the factory
    #[error("unknown meta-schema: {uri}")]
    UnknownMetaSchema {
        /// The URI that was looked up
        uri: String,
    },

    /// A schema document could not be fetched or parsed
    #[error("failed to load schema: {message}")]
    SchemaLoad {
        /// What went wrong
        message: String,
        /// Underlying fetch or parse error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A `$ref` points at a document or pointer that does not exist
    #[error("unresolvable $ref: {reference}")]
    UnresolvableReference {
        /// The reference as written in the schema
        reference: String,
    },
}

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

impl SchemaError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create a new unknown meta-schema error
    #[must_use]
    pub fn unknown_meta_schema(uri: impl Into<String>) -> Self {
        Self::UnknownMetaSchema { uri: uri.into() }
    }

    /// Create a new schema load error
    #[must_use]
    pub fn load(message: impl Into<String>) -> Self {
        Self::SchemaLoad {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new schema load error wrapping an underlying cause
    #[must_use]
    pub fn load_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SchemaLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new unresolvable reference error
    #[must_use]
    pub fn unresolvable(reference: impl Into<String>) -> Self {
        Self::UnresolvableReference {
            reference: reference.into(),
        }
    }
}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        Self::load_with_source("I/O error while reading schema", err)
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::load_with_source("schema document is not valid JSON", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SchemaError::config("no meta-schemas registered");
        assert!(matches!(err, SchemaError::InvalidConfiguration(_)));

        let err = SchemaError::unknown_meta_schema("http://example.com/meta");
        match err {
            SchemaError::UnknownMetaSchema { uri } => {
                assert_eq!(uri, "http://example.com/meta");
            }
            _ => panic!("wrong error type"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = SchemaError::unresolvable("#/definitions/missing");
        let display = err.to_string();
        assert!(display.contains("#/definitions/missing"));
    }

    #[test]
    fn test_error_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: SchemaError = json_err.into();
        assert!(matches!(err, SchemaError::SchemaLoad { .. }));
    }
}
