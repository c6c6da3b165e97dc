//! Value constraints: `enum`, `const`, `required`, `dependencies`

use super::{limited, InactiveValidator, KeywordValidator};
use crate::context::ValidationContext;
use crate::equality::deep_equals;
use crate::schema::{SchemaGraph, SchemaIndex};
use jsonschema_core::{MessageSet, Result, ValidationMessage, ValidatorTypeCode};
use serde_json::Value;

pub struct EnumValidator {
    values: Vec<Value>,
    rendered: String,
}

/// Build the `enum` validator
///
/// # Errors
///
/// Infallible; a non-array value deactivates the keyword.
pub fn enumeration(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    match value.as_array() {
        Some(values) => Ok(Box::new(EnumValidator {
            values: values.clone(),
            rendered: limited(value),
        })),
        None => Ok(Box::new(InactiveValidator)),
    }
}

impl KeywordValidator for EnumValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if !self.values.iter().any(|value| deep_equals(value, instance)) {
            messages.insert(ValidationMessage::of(
                ValidatorTypeCode::Enum,
                at,
                vec![self.rendered.clone()],
            ));
        }
        messages
    }
}

pub struct ConstValidator {
    value: Value,
    rendered: String,
}

/// Build the `const` validator (Draft 6+; register through a custom
/// dialect)
///
/// # Errors
///
/// Infallible.
pub fn constant(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(ConstValidator {
        value: value.clone(),
        rendered: limited(value),
    }))
}

impl KeywordValidator for ConstValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if !deep_equals(&self.value, instance) {
            messages.insert(ValidationMessage::of(
                ValidatorTypeCode::Const,
                at,
                vec![self.rendered.clone()],
            ));
        }
        messages
    }
}

pub struct RequiredValidator {
    names: Vec<String>,
}

/// Build the `required` validator
///
/// # Errors
///
/// Infallible; non-string entries are skipped.
pub fn required(
    _context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let names = match value.as_array() {
        Some(names) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };
    Ok(Box::new(RequiredValidator { names }))
}

impl KeywordValidator for RequiredValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        let Some(object) = instance.as_object() else {
            return messages;
        };
        for name in &self.names {
            if !object.contains_key(name) {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::Required,
                    at,
                    vec![name.clone()],
                ));
            }
        }
        messages
    }
}

enum Dependency {
    /// Property names that must accompany the trigger property
    Required(Vec<String>),
    /// Schema the whole instance must satisfy when the trigger is present
    Schema(SchemaIndex),
}

pub struct DependenciesValidator {
    entries: Vec<(String, Dependency)>,
}

/// Build the `dependencies` validator
///
/// # Errors
///
/// Returns an error if a dependency sub-schema fails to compile.
pub fn dependencies(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let Some(object) = value.as_object() else {
        return Ok(Box::new(InactiveValidator));
    };
    let mut entries = Vec::new();
    for (name, dependency) in object {
        match dependency {
            Value::Array(names) => {
                let names = names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                entries.push((name.clone(), Dependency::Required(names)));
            }
            Value::Object(_) => {
                let subschema =
                    context.compile_subschema(dependency, &["dependencies", name])?;
                entries.push((name.clone(), Dependency::Schema(subschema)));
            }
            _ => {}
        }
    }
    Ok(Box::new(DependenciesValidator { entries }))
}

impl KeywordValidator for DependenciesValidator {
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
        for (trigger, dependency) in &self.entries {
            if !object.contains_key(trigger) {
                continue;
            }
            match dependency {
                Dependency::Required(names) => {
                    for name in names {
                        if !object.contains_key(name) {
                            messages.insert(ValidationMessage::of(
                                ValidatorTypeCode::Dependencies,
                                at,
                                vec![trigger.clone(), name.clone()],
                            ));
                        }
                    }
                }
                Dependency::Schema(subschema) => {
                    messages.extend(schemas.validate_index(*subschema, instance, root, at));
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
    fn test_enum_uses_deep_equality() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({"enum": [1, {"a": [2]}, "x"]}))
            .expect("schema compiles");

        assert!(schema.validate(&json!(1.0)).is_empty());
        assert!(schema.validate(&json!({"a": [2.0]})).is_empty());
        assert!(schema.validate(&json!("x")).is_empty());

        let messages = schema.validate(&json!("y"));
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages.iter().next().expect("one message").kind,
            ValidatorTypeCode::Enum
        );
    }

    #[test]
    fn test_required_reports_each_missing_name() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({"required": ["a", "b", "c"]}))
            .expect("schema compiles");

        let messages = schema.validate(&json!({"b": 1}));
        assert_eq!(messages.len(), 2);
        let arguments: Vec<_> = messages.iter().map(|m| m.arguments[0].clone()).collect();
        assert_eq!(arguments, vec!["a", "c"]);

        // required only constrains objects
        assert!(schema.validate(&json!("not an object")).is_empty());
    }

    #[test]
    fn test_dependencies_as_required_names() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({"dependencies": {"credit_card": ["billing_address"]}}))
            .expect("schema compiles");

        assert!(schema.validate(&json!({"name": "x"})).is_empty());
        assert!(schema
            .validate(&json!({"credit_card": "4", "billing_address": "y"}))
            .is_empty());

        let messages = schema.validate(&json!({"credit_card": "4"}));
        assert_eq!(messages.len(), 1);
        let message = messages.iter().next().expect("one message");
        assert_eq!(message.kind, ValidatorTypeCode::Dependencies);
        assert_eq!(message.arguments, vec!["credit_card", "billing_address"]);
    }

    #[test]
    fn test_dependencies_as_schema() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({
                "dependencies": {
                    "credit_card": {"required": ["billing_address"]}
                }
            }))
            .expect("schema compiles");

        let messages = schema.validate(&json!({"credit_card": "4"}));
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages.iter().next().expect("one message").kind,
            ValidatorTypeCode::Required
        );
    }
}
