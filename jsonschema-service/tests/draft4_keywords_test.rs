//! End-to-end keyword behavior and engine invariants

use jsonschema_service::{JsonSchemaFactory, ValidatorTypeCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn compile(schema: Value) -> jsonschema_service::JsonSchema {
    JsonSchemaFactory::draft4()
        .schema_from_node(schema)
        .expect("schema compiles")
}

#[test]
fn test_empty_schema_accepts_everything() {
    let schema = compile(json!({}));
    for instance in [
        json!(null),
        json!(true),
        json!(0),
        json!(1.5),
        json!("text"),
        json!([1, [2], {"a": 3}]),
        json!({"deeply": {"nested": [null]}}),
    ] {
        assert!(schema.validate(&instance).is_empty());
    }
}

#[test]
fn test_validation_is_deterministic() {
    let schema = compile(json!({
        "type": "object",
        "properties": {
            "a": {"type": "string", "minLength": 2},
            "b": {"minimum": 10}
        },
        "required": ["a", "b", "c"]
    }));
    let instance = json!({"a": "x", "b": 3});

    let first = schema.validate(&instance);
    let second = schema.validate(&instance);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_type_soundness_across_kinds() {
    let instances = [
        ("null", json!(null)),
        ("boolean", json!(true)),
        ("integer", json!(3)),
        ("number", json!(3.5)),
        ("string", json!("s")),
        ("array", json!([])),
        ("object", json!({})),
    ];
    let accepts = |declared: &str, kind: &str| {
        declared == kind
            || (declared == "number" && kind == "integer")
    };

    for declared in ["null", "boolean", "integer", "number", "string", "array", "object"] {
        let schema = compile(json!({"type": declared}));
        for (kind, instance) in &instances {
            let messages = schema.validate(instance);
            if accepts(declared, kind) {
                assert!(messages.is_empty(), "type {declared} must accept {kind}");
            } else {
                assert_eq!(messages.len(), 1, "type {declared} against {kind}");
                let message = messages.iter().next().expect("one message");
                assert_eq!(message.kind, ValidatorTypeCode::Type);
                assert_eq!(message.path, "$");
            }
        }
    }
}

#[test]
fn test_one_of_exclusivity() {
    // success sets are disjoint: exactly one branch passing means no errors
    let schema = compile(json!({
        "oneOf": [
            {"type": "string"},
            {"type": "integer"}
        ]
    }));
    assert!(schema.validate(&json!("x")).is_empty());
    assert!(schema.validate(&json!(3)).is_empty());
    assert!(!schema.validate(&json!(3.5)).is_empty());
    assert!(!schema.validate(&json!(null)).is_empty());

    // overlapping branches: both pass, exactly one message
    let overlapping = compile(json!({
        "oneOf": [
            {"type": "integer"},
            {"type": "number"}
        ]
    }));
    let messages = overlapping.validate(&json!(1));
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages.iter().next().expect("one message").kind,
        ValidatorTypeCode::OneOf
    );
}

#[test]
fn test_unicode_lengths() {
    let schema = compile(json!({"minLength": 1}));
    assert_eq!(schema.validate(&json!("")).len(), 1);
    assert!(schema.validate(&json!("🙂")).is_empty());
}

#[test]
fn test_required_property_reported_at_object_path() {
    let schema = compile(json!({
        "properties": {"a": {"type": "string"}},
        "required": ["a"]
    }));
    let messages = schema.validate(&json!({}));
    assert_eq!(messages.len(), 1);
    let message = messages.iter().next().expect("one message");
    assert_eq!(message.kind, ValidatorTypeCode::Required);
    assert!(message.arguments.contains(&"a".to_string()));
}

#[test]
fn test_nested_paths_in_messages() {
    let schema = compile(json!({
        "properties": {
            "items": {
                "items": {
                    "properties": {
                        "name": {"type": "string"}
                    }
                }
            }
        }
    }));
    let messages = schema.validate(&json!({"items": [{"name": "ok"}, {"name": 7}]}));
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages.iter().next().expect("one message").path,
        "$.items[1].name"
    );
}

#[test]
fn test_messages_follow_schema_declaration_order() {
    let schema = compile(json!({
        "minLength": 5,
        "pattern": "^[a-z]+$",
        "maxLength": 1
    }));
    let kinds: Vec<_> = schema
        .validate(&json!("A1"))
        .iter()
        .map(|m| m.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ValidatorTypeCode::MinLength,
            ValidatorTypeCode::Pattern,
            ValidatorTypeCode::MaxLength
        ]
    );
}

#[test]
fn test_keywords_ignore_unrelated_instance_kinds() {
    // no `type` keyword: shape constraints simply do not apply
    let schema = compile(json!({
        "minItems": 2,
        "minLength": 2,
        "minimum": 2,
        "minProperties": 2
    }));
    assert!(schema.validate(&json!(null)).is_empty());
    assert_eq!(schema.validate(&json!([1])).len(), 1);
    assert_eq!(schema.validate(&json!("a")).len(), 1);
    assert_eq!(schema.validate(&json!(1)).len(), 1);
    assert_eq!(schema.validate(&json!({"a": 1})).len(), 1);
}

#[test]
fn test_unknown_keywords_are_ignored() {
    let schema = compile(json!({
        "definitions": {"unused": {"type": "string"}},
        "x-vendor-extension": {"anything": true},
        "title": "a title",
        "type": "integer"
    }));
    assert!(schema.validate(&json!(1)).is_empty());
    assert_eq!(schema.validate(&json!("x")).len(), 1);
}

#[test]
fn test_whole_draft4_schema_together() {
    let schema = compile(json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "minimum": 1},
            "email": {"type": "string", "format": "email"},
            "tags": {
                "type": "array",
                "items": {"type": "string"},
                "uniqueItems": true,
                "maxItems": 4
            },
            "score": {"multipleOf": 0.5, "maximum": 10}
        },
        "required": ["id"],
        "additionalProperties": false
    }));

    let valid = json!({
        "id": 7,
        "email": "dev@example.com",
        "tags": ["a", "b"],
        "score": 7.5
    });
    assert!(schema.validate(&valid).is_empty());

    let invalid = json!({
        "id": 0,
        "email": "nope",
        "tags": ["a", "a"],
        "score": 7.3,
        "extra": true
    });
    let kinds: Vec<_> = schema.validate(&invalid).iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ValidatorTypeCode::Minimum,
            ValidatorTypeCode::Format,
            ValidatorTypeCode::UniqueItems,
            ValidatorTypeCode::MultipleOf,
            ValidatorTypeCode::AdditionalProperties,
        ]
    );
}
