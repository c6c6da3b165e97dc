//! Message rendering, equality semantics and the serialized wire format

use jsonschema_service::{JsonSchemaFactory, MessageSet};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_serialized_error_output() {
    let factory = JsonSchemaFactory::draft4();
    let schema = factory
        .schema_from_node(json!({
            "properties": {"count": {"type": "integer"}},
            "required": ["name"]
        }))
        .expect("schema compiles");

    let messages: Vec<_> = schema.validate(&json!({"count": "x"})).into_iter().collect();
    let serialized = serde_json::to_value(&messages).expect("messages serialize");

    assert_eq!(
        serialized,
        json!([
            {
                "type": "type",
                "code": "1028",
                "path": "$.count",
                "arguments": ["string", "integer"],
                "message": "$.count: string found, integer expected"
            },
            {
                "type": "required",
                "code": "1027",
                "path": "$",
                "arguments": ["name"],
                "message": "$: required property name is missing"
            }
        ])
    );
}

#[test]
fn test_result_sets_compare_as_sets() {
    let factory = JsonSchemaFactory::draft4();
    // same violations discovered in a different keyword order
    let forward = factory
        .schema_from_node(json!({"minimum": 5, "multipleOf": 2}))
        .expect("schema compiles");
    let backward = factory
        .schema_from_node(json!({"multipleOf": 2, "minimum": 5}))
        .expect("schema compiles");

    let a = forward.validate(&json!(3));
    let b = backward.validate(&json!(3));
    assert_eq!(a.len(), 2);
    // IndexSet equality is set equality keyed by (type, code, path, arguments)
    assert_eq!(a, b);
}

#[test]
fn test_duplicate_violations_collapse() {
    let factory = JsonSchemaFactory::draft4();
    // both branches fail with the identical type violation
    let schema = factory
        .schema_from_node(json!({
            "allOf": [
                {"type": "string"},
                {"type": "string"}
            ]
        }))
        .expect("schema compiles");

    let messages: MessageSet = schema.validate(&json!(1));
    assert_eq!(messages.len(), 1);
}
