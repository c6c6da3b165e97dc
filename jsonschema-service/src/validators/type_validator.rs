//! The `type` keyword
//!
//! The schema value is a type name or an array of type names from
//! `{"null", "boolean", "object", "array", "number", "integer", "string"}`.
//! `integer` accepts any number whose mathematical value is an integer;
//! `number` accepts every JSON number.

use super::{value_kind, KeywordValidator};
use crate::context::ValidationContext;
use crate::numeric::is_integer;
use crate::schema::SchemaGraph;
use jsonschema_core::{MessageSet, Result, ValidationMessage, ValidatorTypeCode};
use serde_json::Value;

pub struct TypeValidator {
    allowed: Vec<String>,
}

/// Build a [`TypeValidator`] from the keyword value
///
/// # Errors
///
/// Infallible; malformed values produce a validator that accepts
/// everything.
pub fn factory(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let allowed = match value {
        Value::String(name) => vec![name.clone()],
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    Ok(Box::new(TypeValidator { allowed }))
}

impl KeywordValidator for TypeValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if self.allowed.is_empty() {
            return messages;
        }
        if self.allowed.iter().any(|name| matches_type(name, instance)) {
            return messages;
        }
        messages.insert(ValidationMessage::of(
            ValidatorTypeCode::Type,
            at,
            vec![value_kind(instance).to_string(), self.allowed.join(", ")],
        ));
        messages
    }
}

fn matches_type(name: &str, instance: &Value) -> bool {
    match name {
        "null" => instance.is_null(),
        "boolean" => instance.is_boolean(),
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "number" => instance.is_number(),
        "integer" => instance.as_number().is_some_and(is_integer),
        _ => false,
    }
}
