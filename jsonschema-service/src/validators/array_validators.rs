//! Array keywords: `items`, `additionalItems`, `minItems`, `maxItems`,
//! `uniqueItems`

use super::{index_path, InactiveValidator, KeywordValidator};
use crate::context::ValidationContext;
use crate::equality::deep_equals;
use crate::schema::{SchemaGraph, SchemaIndex};
use jsonschema_core::{MessageSet, Result, ValidationMessage, ValidatorTypeCode};
use serde_json::Value;

enum Items {
    /// Single schema applied to every element
    Each(SchemaIndex),
    /// Positional schemas; excess elements fall through to
    /// `additionalItems`
    Tuple(Vec<SchemaIndex>),
}

pub struct ItemsValidator {
    items: Items,
}

/// Build the `items` validator
///
/// # Errors
///
/// Returns an error if a sub-schema fails to compile.
pub fn items(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    match value {
        Value::Object(_) => {
            let subschema = context.compile_subschema(value, &["items"])?;
            Ok(Box::new(ItemsValidator {
                items: Items::Each(subschema),
            }))
        }
        Value::Array(elements) => {
            let mut subschemas = Vec::with_capacity(elements.len());
            for (i, element) in elements.iter().enumerate() {
                subschemas.push(context.compile_subschema(element, &["items", &i.to_string()])?);
            }
            Ok(Box::new(ItemsValidator {
                items: Items::Tuple(subschemas),
            }))
        }
        _ => Ok(Box::new(InactiveValidator)),
    }
}

impl KeywordValidator for ItemsValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(elements) = instance.as_array() else {
            return messages;
        };
        match &self.items {
            Items::Each(subschema) => {
                for (i, element) in elements.iter().enumerate() {
                    messages.extend(schemas.validate_index(
                        *subschema,
                        element,
                        root,
                        &index_path(at, i),
                    ));
                }
            }
            Items::Tuple(subschemas) => {
                for (i, (element, subschema)) in elements.iter().zip(subschemas.iter()).enumerate()
                {
                    messages.extend(schemas.validate_index(
                        *subschema,
                        element,
                        root,
                        &index_path(at, i),
                    ));
                }
            }
        }
        messages
    }
}

enum AdditionalItems {
    Allowed,
    Denied,
    Schema(SchemaIndex),
}

pub struct AdditionalItemsValidator {
    mode: AdditionalItems,
    /// Length of the sibling `items` tuple; `None` when `items` is not an
    /// array, in which case the keyword has no effect
    tuple_len: Option<usize>,
}

/// Build the `additionalItems` validator
///
/// # Errors
///
/// Returns an error if the sub-schema fails to compile.
pub fn additional_items(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let tuple_len = context
        .schema_node()
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::len);
    let mode = match value {
        Value::Bool(true) => AdditionalItems::Allowed,
        Value::Bool(false) => AdditionalItems::Denied,
        Value::Object(_) => {
            AdditionalItems::Schema(context.compile_subschema(value, &["additionalItems"])?)
        }
        _ => AdditionalItems::Allowed,
    };
    Ok(Box::new(AdditionalItemsValidator { mode, tuple_len }))
}

impl KeywordValidator for AdditionalItemsValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let (Some(elements), Some(tuple_len)) = (instance.as_array(), self.tuple_len) else {
            return messages;
        };
        for (i, element) in elements.iter().enumerate().skip(tuple_len) {
            match &self.mode {
                AdditionalItems::Allowed => {}
                AdditionalItems::Denied => {
                    messages.insert(ValidationMessage::of(
                        ValidatorTypeCode::AdditionalItems,
                        index_path(at, i),
                        vec![],
                    ));
                }
                AdditionalItems::Schema(subschema) => {
                    messages.extend(schemas.validate_index(
                        *subschema,
                        element,
                        root,
                        &index_path(at, i),
                    ));
                }
            }
        }
        messages
    }
}

pub struct MinItemsValidator {
    min: u64,
}

/// Build the `minItems` validator
///
/// # Errors
///
/// Infallible; a non-integer bound deactivates the keyword.
pub fn min_items(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(MinItemsValidator {
        min: value.as_u64().unwrap_or(0),
    }))
}

impl KeywordValidator for MinItemsValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if let Some(elements) = instance.as_array() {
            if (elements.len() as u64) < self.min {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::MinItems,
                    at,
                    vec![self.min.to_string()],
                ));
            }
        }
        messages
    }
}

pub struct MaxItemsValidator {
    max: Option<u64>,
}

/// Build the `maxItems` validator
///
/// # Errors
///
/// Infallible; a non-integer bound deactivates the keyword.
pub fn max_items(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(MaxItemsValidator {
        max: value.as_u64(),
    }))
}

impl KeywordValidator for MaxItemsValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if let (Some(elements), Some(max)) = (instance.as_array(), self.max) {
            if elements.len() as u64 > max {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::MaxItems,
                    at,
                    vec![max.to_string()],
                ));
            }
        }
        messages
    }
}

pub struct UniqueItemsValidator {
    unique: bool,
}

/// Build the `uniqueItems` validator
///
/// # Errors
///
/// Infallible.
pub fn unique_items(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(UniqueItemsValidator {
        unique: value.as_bool().unwrap_or(false),
    }))
}

impl KeywordValidator for UniqueItemsValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if !self.unique {
            return messages;
        }
        let Some(elements) = instance.as_array() else {
            return messages;
        };
        'outer: for (i, a) in elements.iter().enumerate() {
            for b in elements.iter().skip(i + 1) {
                if deep_equals(a, b) {
                    messages.insert(ValidationMessage::of(
                        ValidatorTypeCode::UniqueItems,
                        at,
                        vec![],
                    ));
                    break 'outer;
                }
            }
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
    fn test_items_single_schema() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({"items": {"type": "integer"}}))
            .expect("schema compiles");

        assert!(schema.validate(&json!([1, 2, 3])).is_empty());
        let messages = schema.validate(&json!([1, "x", 3.5]));
        assert_eq!(messages.len(), 2);
        let paths: Vec<_> = messages.iter().map(|m| m.path.clone()).collect();
        assert_eq!(paths, vec!["$[1]", "$[2]"]);
    }

    #[test]
    fn test_items_tuple_with_additional_items_false() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({
                "items": [{"type": "string"}, {"type": "integer"}],
                "additionalItems": false
            }))
            .expect("schema compiles");

        assert!(schema.validate(&json!(["a", 1])).is_empty());
        assert!(schema.validate(&json!(["a"])).is_empty());

        let messages = schema.validate(&json!(["a", 1, true, null]));
        assert_eq!(messages.len(), 2);
        let paths: Vec<_> = messages.iter().map(|m| m.path.clone()).collect();
        assert_eq!(paths, vec!["$[2]", "$[3]"]);
    }

    #[test]
    fn test_additional_items_schema() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({
                "items": [{}],
                "additionalItems": {"type": "integer"}
            }))
            .expect("schema compiles");

        assert!(schema.validate(&json!(["anything", 2, 3])).is_empty());
        assert_eq!(schema.validate(&json!(["anything", "x"])).len(), 1);
    }

    #[test]
    fn test_item_count_bounds() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({"minItems": 2, "maxItems": 3}))
            .expect("schema compiles");

        let messages = schema.validate(&json!([1]));
        assert_eq!(messages.len(), 1);
        let message = messages.iter().next().expect("one message");
        assert_eq!(message.kind, ValidatorTypeCode::MinItems);
        assert_eq!(message.arguments, vec!["2"]);

        assert!(schema.validate(&json!([1, 2])).is_empty());
        assert_eq!(schema.validate(&json!([1, 2, 3, 4])).len(), 1);
        // bounds do not apply to non-arrays
        assert!(schema.validate(&json!("12")).is_empty());
    }

    #[test]
    fn test_unique_items_uses_deep_equality() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({"uniqueItems": true}))
            .expect("schema compiles");

        assert!(schema.validate(&json!([1, 2, 3])).is_empty());
        assert_eq!(schema.validate(&json!([1, 2, 1])).len(), 1);
        // 1 and 1.0 are the same mathematical value
        assert_eq!(schema.validate(&json!([1, 1.0])).len(), 1);
        assert_eq!(
            schema
                .validate(&json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}]))
                .len(),
            1
        );
    }
}
