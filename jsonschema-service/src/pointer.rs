//! JSON Pointer (RFC 6901) parsing and navigation
//!
//! `$ref` fragments address schema sub-nodes with JSON Pointers. This module
//! parses the slash-delimited syntax, applies the `~0`/`~1` escape rules, and
//! navigates a `serde_json::Value` tree. The canonical re-encoded form is
//! also used as the key under which compiled schema locations are
//! de-duplicated.

use jsonschema_core::{Result, SchemaError};
use serde_json::Value;
use std::fmt;

/// A parsed JSON Pointer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// Parse a pointer string
    ///
    /// The empty string is the whole-document pointer; any other pointer
    /// must start with `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pointer is non-empty and does not start
    /// with `/`.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        if !text.starts_with('/') {
            return Err(SchemaError::load(format!("invalid JSON pointer: {text}")));
        }
        let tokens = text.split('/').skip(1).map(unescape).collect();
        Ok(Self { tokens })
    }

    /// Pointer addressing the whole document
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this pointer addresses the whole document
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Append a reference token
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// A new pointer with `token` appended
    #[must_use]
    pub fn child(&self, token: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.push(token);
        child
    }

    /// Navigate to the addressed node, if it exists
    #[must_use]
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        for token in &self.tokens {
            current = match current {
                Value::Object(map) => map.get(token)?,
                Value::Array(items) => items.get(token.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape(token))?;
        }
        Ok(())
    }
}

/// Apply the RFC 6901 escape rules to a reference token
#[must_use]
pub fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
