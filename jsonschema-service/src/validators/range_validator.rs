//! Numeric keywords: `minimum`, `maximum`, `multipleOf`
//!
//! Comparisons run on mathematical values. In Draft 4 the
//! `exclusiveMinimum` and `exclusiveMaximum` keywords are booleans read
//! from the same schema object as the bound they tighten.

use super::{InactiveValidator, KeywordValidator};
use crate::context::ValidationContext;
use crate::numeric::{is_multiple_of, number_cmp};
use crate::schema::SchemaGraph;
use jsonschema_core::{MessageSet, Result, ValidationMessage, ValidatorTypeCode};
use serde_json::{Number, Value};
use std::cmp::Ordering;

pub struct MinimumValidator {
    bound: Number,
    exclusive: bool,
}

/// Build the `minimum` validator, reading the sibling `exclusiveMinimum`
/// boolean
///
/// # Errors
///
/// Infallible; a non-numeric bound deactivates the keyword.
pub fn minimum(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let Some(bound) = value.as_number() else {
        return Ok(Box::new(InactiveValidator));
    };
    let exclusive = context
        .schema_node()
        .get("exclusiveMinimum")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok(Box::new(MinimumValidator {
        bound: bound.clone(),
        exclusive,
    }))
}

impl KeywordValidator for MinimumValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(number) = instance.as_number() else {
            return messages;
        };
        let failed = match number_cmp(number, &self.bound) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => self.exclusive,
            _ => false,
        };
        if failed {
            messages.insert(ValidationMessage::of(
                ValidatorTypeCode::Minimum,
                at,
                vec![self.bound.to_string()],
            ));
        }
        messages
    }
}

pub struct MaximumValidator {
    bound: Number,
    exclusive: bool,
}

/// Build the `maximum` validator, reading the sibling `exclusiveMaximum`
/// boolean
///
/// # Errors
///
/// Infallible; a non-numeric bound deactivates the keyword.
pub fn maximum(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let Some(bound) = value.as_number() else {
        return Ok(Box::new(InactiveValidator));
    };
    let exclusive = context
        .schema_node()
        .get("exclusiveMaximum")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok(Box::new(MaximumValidator {
        bound: bound.clone(),
        exclusive,
    }))
}

impl KeywordValidator for MaximumValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(number) = instance.as_number() else {
            return messages;
        };
        let failed = match number_cmp(number, &self.bound) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => self.exclusive,
            _ => false,
        };
        if failed {
            messages.insert(ValidationMessage::of(
                ValidatorTypeCode::Maximum,
                at,
                vec![self.bound.to_string()],
            ));
        }
        messages
    }
}

pub struct MultipleOfValidator {
    divisor: Number,
}

/// Build the `multipleOf` validator
///
/// # Errors
///
/// Infallible; a non-numeric divisor deactivates the keyword.
pub fn multiple_of(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let Some(divisor) = value.as_number() else {
        return Ok(Box::new(InactiveValidator));
    };
    Ok(Box::new(MultipleOfValidator {
        divisor: divisor.clone(),
    }))
}

impl KeywordValidator for MultipleOfValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(number) = instance.as_number() else {
            return messages;
        };
        if !is_multiple_of(number, &self.divisor) {
            messages.insert(ValidationMessage::of(
                ValidatorTypeCode::MultipleOf,
                at,
                vec![self.divisor.to_string()],
            ));
        }
        messages
    }
}
