//! Schema combinators: `allOf`, `anyOf`, `oneOf`, `not`
//!
//! These re-enter the engine on the same instance. `allOf` surfaces the
//! union of its sub-schemas' messages; `anyOf` reports nothing when any
//! sub-schema passes and the union of every sub-schema's messages when none
//! does; `oneOf` requires exactly one pass and reports the passing indices
//! when several match; `not` fails exactly when its sub-schema passes.

use super::{InactiveValidator, KeywordValidator};
use crate::context::ValidationContext;
use crate::schema::{SchemaGraph, SchemaIndex};
use jsonschema_core::{MessageSet, Result, ValidationMessage, ValidatorTypeCode};
use serde_json::Value;

fn compile_elements(
    context: &mut ValidationContext<'_, '_>,
    keyword: &str,
    value: &Value,
) -> Result<Option<Vec<SchemaIndex>>> {
    let Some(elements) = value.as_array() else {
        return Ok(None);
    };
    let mut subschemas = Vec::with_capacity(elements.len());
    for (i, element) in elements.iter().enumerate() {
        subschemas.push(context.compile_subschema(element, &[keyword, &i.to_string()])?);
    }
    Ok(Some(subschemas))
}

pub struct AllOfValidator {
    subschemas: Vec<SchemaIndex>,
}

/// Build the `allOf` validator
///
/// # Errors
///
/// Returns an error if an element fails to compile.
pub fn all_of(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    match compile_elements(context, "allOf", value)? {
        Some(subschemas) => Ok(Box::new(AllOfValidator { subschemas })),
        None => Ok(Box::new(InactiveValidator)),
    }
}

impl KeywordValidator for AllOfValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        for subschema in &self.subschemas {
            messages.extend(schemas.validate_index(*subschema, instance, root, at));
        }
        messages
    }
}

pub struct AnyOfValidator {
    subschemas: Vec<SchemaIndex>,
}

/// Build the `anyOf` validator
///
/// # Errors
///
/// Returns an error if an element fails to compile.
pub fn any_of(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    match compile_elements(context, "anyOf", value)? {
        Some(subschemas) => Ok(Box::new(AnyOfValidator { subschemas })),
        None => Ok(Box::new(InactiveValidator)),
    }
}

impl KeywordValidator for AnyOfValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut collected = MessageSet::new();
        for subschema in &self.subschemas {
            let messages = schemas.validate_index(*subschema, instance, root, at);
            if messages.is_empty() {
                return MessageSet::new();
            }
            collected.extend(messages);
        }
        collected
    }
}

pub struct OneOfValidator {
    subschemas: Vec<SchemaIndex>,
}

/// Build the `oneOf` validator
///
/// # Errors
///
/// Returns an error if an element fails to compile.
pub fn one_of(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    match compile_elements(context, "oneOf", value)? {
        Some(subschemas) => Ok(Box::new(OneOfValidator { subschemas })),
        None => Ok(Box::new(InactiveValidator)),
    }
}

impl KeywordValidator for OneOfValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut collected = MessageSet::new();
        let mut passing = Vec::new();
        for (i, subschema) in self.subschemas.iter().enumerate() {
            let messages = schemas.validate_index(*subschema, instance, root, at);
            if messages.is_empty() {
                passing.push(i);
            } else {
                collected.extend(messages);
            }
        }
        match passing.len() {
            0 => collected,
            1 => MessageSet::new(),
            _ => {
                let mut messages = MessageSet::new();
                let indices = passing
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::OneOf,
                    at,
                    vec![format!("[{indices}]")],
                ));
                messages
            }
        }
    }
}

pub struct NotValidator {
    subschema: SchemaIndex,
}

/// Build the `not` validator
///
/// # Errors
///
/// Returns an error if the sub-schema fails to compile.
pub fn not(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let subschema = context.compile_subschema(value, &["not"])?;
    Ok(Box::new(NotValidator { subschema }))
}

impl KeywordValidator for NotValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if schemas
            .validate_index(self.subschema, instance, root, at)
            .is_empty()
        {
            messages.insert(ValidationMessage::of(ValidatorTypeCode::Not, at, vec![]));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use crate::factory::JsonSchemaFactory;
    use jsonschema_core::ValidatorTypeCode;
    use serde_json::json;

    #[test]
    fn test_all_of_unions_sub_errors() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({
                "allOf": [
                    {"minimum": 10},
                    {"multipleOf": 3}
                ]
            }))
            .expect("schema compiles");

        assert!(schema.validate(&json!(12)).is_empty());
        assert_eq!(schema.validate(&json!(4)).len(), 2);
    }

    #[test]
    fn test_any_of_suppresses_errors_on_success() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({
                "anyOf": [
                    {"type": "string"},
                    {"minimum": 5}
                ]
            }))
            .expect("schema compiles");

        assert!(schema.validate(&json!("text")).is_empty());
        assert!(schema.validate(&json!(7)).is_empty());
        // neither branch passes: both branches' errors surface
        assert_eq!(schema.validate(&json!(1)).len(), 2);
    }

    #[test]
    fn test_one_of_rejects_multiple_passes() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({
                "oneOf": [
                    {"type": "integer"},
                    {"type": "number"}
                ]
            }))
            .expect("schema compiles");

        let messages = schema.validate(&json!(1));
        assert_eq!(messages.len(), 1);
        let message = messages.iter().next().expect("one message");
        assert_eq!(message.kind, ValidatorTypeCode::OneOf);
        assert_eq!(message.arguments, vec!["[0, 1]"]);

        // only the second branch passes
        assert!(schema.validate(&json!(1.5)).is_empty());
    }

    #[test]
    fn test_not_inverts() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({"not": {"type": "string"}}))
            .expect("schema compiles");

        assert!(schema.validate(&json!(1)).is_empty());
        let messages = schema.validate(&json!("text"));
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages.iter().next().expect("one message").kind,
            ValidatorTypeCode::Not
        );
    }

    #[test]
    fn test_always_failing_schema() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({"not": {}}))
            .expect("schema compiles");

        for instance in [json!(null), json!(0), json!("x"), json!([]), json!({})] {
            assert_eq!(schema.validate(&instance).len(), 1);
        }
    }
}
