//! String keywords: `minLength`, `maxLength`, `pattern`, `format`
//!
//! Lengths are counted in Unicode code points, not UTF-16 units or bytes.
//! Patterns follow the ECMA-262 dialect of the JSON Schema specification
//! and match anywhere in the string (unanchored); patterns using features
//! the `regex` crate does not support, such as lookaround or
//! backreferences, are rejected when the schema compiles.

use super::{InactiveValidator, KeywordValidator};
use crate::context::ValidationContext;
use crate::formats::Format;
use crate::schema::SchemaGraph;
use jsonschema_core::{MessageSet, Result, SchemaError, ValidationMessage, ValidatorTypeCode};
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

pub struct MinLengthValidator {
    min: u64,
}

/// Build the `minLength` validator
///
/// # Errors
///
/// Infallible; a non-integer bound deactivates the keyword.
pub fn min_length(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(MinLengthValidator {
        min: value.as_u64().unwrap_or(0),
    }))
}

impl KeywordValidator for MinLengthValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if let Some(text) = instance.as_str() {
            if (text.chars().count() as u64) < self.min {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::MinLength,
                    at,
                    vec![self.min.to_string()],
                ));
            }
        }
        messages
    }
}

pub struct MaxLengthValidator {
    max: Option<u64>,
}

/// Build the `maxLength` validator
///
/// # Errors
///
/// Infallible; a non-integer bound deactivates the keyword.
pub fn max_length(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(MaxLengthValidator {
        max: value.as_u64(),
    }))
}

impl KeywordValidator for MaxLengthValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if let (Some(text), Some(max)) = (instance.as_str(), self.max) {
            if text.chars().count() as u64 > max {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::MaxLength,
                    at,
                    vec![max.to_string()],
                ));
            }
        }
        messages
    }
}

pub struct PatternValidator {
    regex: Regex,
    source: String,
}

/// Build the `pattern` validator
///
/// # Errors
///
/// Returns an error if the pattern is not a valid regex.
pub fn pattern(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let Some(source) = value.as_str() else {
        return Ok(Box::new(InactiveValidator));
    };
    let regex = Regex::new(source)
        .map_err(|e| SchemaError::load_with_source(format!("invalid pattern regex: {source}"), e))?;
    Ok(Box::new(PatternValidator {
        regex,
        source: source.to_string(),
    }))
}

impl KeywordValidator for PatternValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if let Some(text) = instance.as_str() {
            if !self.regex.is_match(text) {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::Pattern,
                    at,
                    vec![self.source.clone()],
                ));
            }
        }
        messages
    }
}

pub struct FormatValidator {
    name: String,
    /// `None` when the dialect does not define the format; unknown formats
    /// are not an error
    format: Option<Arc<dyn Format>>,
}

/// Build the `format` validator
///
/// # Errors
///
/// Infallible; unknown format names produce a validator that accepts
/// everything.
pub fn format(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let Some(name) = value.as_str() else {
        return Ok(Box::new(InactiveValidator));
    };
    Ok(Box::new(FormatValidator {
        name: name.to_string(),
        format: context.meta_schema().format(name),
    }))
}

impl KeywordValidator for FormatValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(format) = &self.format else {
            return messages;
        };
        if let Some(text) = instance.as_str() {
            if !format.matches(text) {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::Format,
                    at,
                    vec![self.name.clone()],
                ));
            }
        }
        messages
    }
}
