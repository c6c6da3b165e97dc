//! Object keywords: `properties`, `patternProperties`,
//! `additionalProperties`, `minProperties`, `maxProperties`

use super::{property_path, InactiveValidator, KeywordValidator};
use crate::context::ValidationContext;
use crate::schema::{SchemaGraph, SchemaIndex};
use indexmap::{IndexMap, IndexSet};
use jsonschema_core::{MessageSet, Result, SchemaError, ValidationMessage, ValidatorTypeCode};
use regex::Regex;
use serde_json::Value;

pub struct PropertiesValidator {
    entries: IndexMap<String, SchemaIndex>,
}

/// Build the `properties` validator
///
/// # Errors
///
/// Returns an error if a property sub-schema fails to compile.
pub fn properties(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let Some(object) = value.as_object() else {
        return Ok(Box::new(InactiveValidator));
    };
    let mut entries = IndexMap::new();
    for (name, subschema) in object {
        let index = context.compile_subschema(subschema, &["properties", name])?;
        entries.insert(name.clone(), index);
    }
    Ok(Box::new(PropertiesValidator { entries }))
}

impl KeywordValidator for PropertiesValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(object) = instance.as_object() else {
            return messages;
        };
        for (name, subschema) in &self.entries {
            if let Some(value) = object.get(name) {
                messages.extend(schemas.validate_index(
                    *subschema,
                    value,
                    root,
                    &property_path(at, name),
                ));
            }
        }
        messages
    }
}

pub struct PatternPropertiesValidator {
    patterns: Vec<(Regex, SchemaIndex)>,
}

/// Build the `patternProperties` validator
///
/// # Errors
///
/// Returns an error if a pattern is not a valid regex or a sub-schema
/// fails to compile.
pub fn pattern_properties(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let Some(object) = value.as_object() else {
        return Ok(Box::new(InactiveValidator));
    };
    let mut patterns = Vec::new();
    for (pattern, subschema) in object {
        let regex = Regex::new(pattern).map_err(|e| {
            SchemaError::load_with_source(format!("invalid patternProperties regex: {pattern}"), e)
        })?;
        let index = context.compile_subschema(subschema, &["patternProperties", pattern])?;
        patterns.push((regex, index));
    }
    Ok(Box::new(PatternPropertiesValidator { patterns }))
}

impl KeywordValidator for PatternPropertiesValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(object) = instance.as_object() else {
            return messages;
        };
        for (name, value) in object {
            for (regex, subschema) in &self.patterns {
                if regex.is_match(name) {
                    messages.extend(schemas.validate_index(
                        *subschema,
                        value,
                        root,
                        &property_path(at, name),
                    ));
                }
            }
        }
        messages
    }
}

enum AdditionalProperties {
    Allowed,
    Denied,
    Schema(SchemaIndex),
}

pub struct AdditionalPropertiesValidator {
    mode: AdditionalProperties,
    /// Property names declared by the sibling `properties` keyword
    declared: IndexSet<String>,
    /// Patterns declared by the sibling `patternProperties` keyword
    patterns: Vec<Regex>,
}

/// Build the `additionalProperties` validator
///
/// A property is additional iff its name matches no `properties` key and
/// no `patternProperties` pattern of the same schema object.
///
/// # Errors
///
/// Returns an error if the sub-schema fails to compile.
pub fn additional_properties(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let declared = context
        .schema_node()
        .get("properties")
        .and_then(Value::as_object)
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();
    let patterns = context
        .schema_node()
        .get("patternProperties")
        .and_then(Value::as_object)
        .map(|object| {
            object
                .keys()
                .filter_map(|pattern| Regex::new(pattern).ok())
                .collect()
        })
        .unwrap_or_default();

    let mode = match value {
        Value::Bool(true) => AdditionalProperties::Allowed,
        Value::Bool(false) => AdditionalProperties::Denied,
        Value::Object(_) => AdditionalProperties::Schema(
            context.compile_subschema(value, &["additionalProperties"])?,
        ),
        _ => AdditionalProperties::Allowed,
    };
    Ok(Box::new(AdditionalPropertiesValidator {
        mode,
        declared,
        patterns,
    }))
}

impl AdditionalPropertiesValidator {
    fn is_additional(&self, name: &str) -> bool {
        !self.declared.contains(name) && !self.patterns.iter().any(|regex| regex.is_match(name))
    }
}

impl KeywordValidator for AdditionalPropertiesValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(object) = instance.as_object() else {
            return messages;
        };
        for (name, value) in object {
            if !self.is_additional(name) {
                continue;
            }
            match &self.mode {
                AdditionalProperties::Allowed => {}
                AdditionalProperties::Denied => {
                    messages.insert(ValidationMessage::of(
                        ValidatorTypeCode::AdditionalProperties,
                        at,
                        vec![name.clone()],
                    ));
                }
                AdditionalProperties::Schema(subschema) => {
                    messages.extend(schemas.validate_index(
                        *subschema,
                        value,
                        root,
                        &property_path(at, name),
                    ));
                }
            }
        }
        messages
    }
}

pub struct MinPropertiesValidator {
    min: u64,
}

/// Build the `minProperties` validator
///
/// # Errors
///
/// Infallible; a non-integer bound deactivates the keyword.
pub fn min_properties(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(MinPropertiesValidator {
        min: value.as_u64().unwrap_or(0),
    }))
}

impl KeywordValidator for MinPropertiesValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if let Some(object) = instance.as_object() {
            if (object.len() as u64) < self.min {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::MinProperties,
                    at,
                    vec![self.min.to_string()],
                ));
            }
        }
        messages
    }
}

pub struct MaxPropertiesValidator {
    max: Option<u64>,
}

/// Build the `maxProperties` validator
///
/// # Errors
///
/// Infallible; a non-integer bound deactivates the keyword.
pub fn max_properties(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(MaxPropertiesValidator {
        max: value.as_u64(),
    }))
}

impl KeywordValidator for MaxPropertiesValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if let (Some(object), Some(max)) = (instance.as_object(), self.max) {
            if object.len() as u64 > max {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::MaxProperties,
                    at,
                    vec![max.to_string()],
                ));
            }
        }
        messages
    }
}
