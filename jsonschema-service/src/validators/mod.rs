//! Keyword validators
//!
//! One validator per schema keyword, each compiled from the keyword's value
//! and stored on its schema node as a trait object. A validator reports
//! violations as messages and never fails for instance-shape reasons: a
//! keyword that does not apply to the instance's kind (e.g. `minItems` on a
//! string) returns the empty set and leaves type errors to `type`.
//!
//! The factory functions in these modules are the building blocks of
//! dialects; [`crate::metaschema::JsonMetaSchema::draft4`] wires up the
//! Draft 4 set, and custom meta-schemas may register any of them under
//! their own keyword table.

use crate::schema::SchemaGraph;
use jsonschema_core::MessageSet;
use serde_json::Value;

pub mod array_validators;
pub mod boolean_constraints;
pub mod constraint_validators;
pub mod object_validators;
pub mod range_validator;
pub mod ref_validator;
pub mod string_constraints;
pub mod type_validator;

/// A compiled keyword validator
pub trait KeywordValidator: Send + Sync {
    /// Validate `instance` located at `at` within the outermost instance
    /// `root`
    ///
    /// Returns one message per violation; composites surface the messages
    /// of their sub-schemas.
    fn validate(&self, schemas: &SchemaGraph, instance: &Value, root: &Value, at: &str)
        -> MessageSet;
}

/// Validator for keywords whose schema value is unusable
///
/// Draft 4 treats malformed keyword values leniently; the keyword simply
/// never fails.
pub(crate) struct InactiveValidator;

impl KeywordValidator for InactiveValidator {
    fn validate(&self, _: &SchemaGraph, _: &Value, _: &Value, _: &str) -> MessageSet {
        MessageSet::new()
    }
}

/// Instance path of an object property
pub(crate) fn property_path(at: &str, name: &str) -> String {
    format!("{at}.{name}")
}

/// Instance path of an array element
pub(crate) fn index_path(at: &str, index: usize) -> String {
    format!("{at}[{index}]")
}

/// The JSON kind of a value as reported in `type` messages
///
/// Numbers with an integral mathematical value report as `integer`.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if crate::numeric::is_integer(n) {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compact rendering of a schema value for message arguments, truncated so
/// large enumerations do not flood diagnostics
pub(crate) fn limited(value: &Value) -> String {
    let text = value.to_string();
    if text.len() > 100 {
        let cut = (1..=100)
            .rev()
            .find(|i| text.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}...", &text[..cut])
    } else {
        text
    }
}
