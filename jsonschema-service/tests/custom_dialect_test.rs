//! Extending the meta-schema: extra keywords, custom validators, custom
//! formats, and a custom URL fetcher

use jsonschema_service::validators::constraint_validators;
use jsonschema_service::{
    Format, JsonMetaSchema, JsonSchemaFactory, KeywordValidator, MessageSet, SchemaGraph,
    UrlFetcher, ValidationContext, ValidationMessage, ValidatorTypeCode,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Arc;
use url::Url;

const DIALECT_URI: &str = "https://example.com/dialects/draft4-extended";

fn extended_factory() -> JsonSchemaFactory {
    let dialect = JsonMetaSchema::draft4()
        .to_builder()
        .uri(DIALECT_URI)
        .keyword("const", Arc::new(constraint_validators::constant))
        .keyword("even", Arc::new(even))
        .format(Arc::new(HexFormat))
        .build();

    JsonSchemaFactory::builder()
        .default_meta_schema_uri(DIALECT_URI)
        .add_meta_schema(dialect)
        .build()
        .expect("factory builds")
}

#[test]
fn test_const_keyword_through_custom_dialect() {
    let factory = extended_factory();
    let schema = factory
        .schema_from_node(json!({"const": {"version": 2}}))
        .expect("schema compiles");

    assert!(schema.validate(&json!({"version": 2.0})).is_empty());

    let messages = schema.validate(&json!({"version": 3}));
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages.iter().next().expect("one message").kind,
        ValidatorTypeCode::Const
    );
}

#[test]
fn test_const_is_not_a_draft4_keyword() {
    // under plain Draft 4 the key is unknown and silently ignored
    let factory = JsonSchemaFactory::draft4();
    let schema = factory
        .schema_from_node(json!({"const": 1}))
        .expect("schema compiles");
    assert!(schema.validate(&json!(999)).is_empty());
}

struct EvenValidator;

impl KeywordValidator for EvenValidator {
    fn validate(
        &self,
        _schemas: &SchemaGraph,
        instance: &Value,
        _root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        if let Some(n) = instance.as_i64() {
            if n % 2 != 0 {
                messages.insert(ValidationMessage::of(
                    ValidatorTypeCode::MultipleOf,
                    at,
                    vec!["2".to_string()],
                ));
            }
        }
        messages
    }
}

fn even(
    _context: &mut ValidationContext<'_, '_>,
    _value: &Value,
) -> jsonschema_service::Result<Box<dyn KeywordValidator>> {
    Ok(Box::new(EvenValidator))
}

#[test]
fn test_custom_keyword_validator() {
    let factory = extended_factory();
    let schema = factory
        .schema_from_node(json!({"even": true}))
        .expect("schema compiles");

    assert!(schema.validate(&json!(4)).is_empty());
    assert_eq!(schema.validate(&json!(5)).len(), 1);
}

struct HexFormat;

impl Format for HexFormat {
    fn name(&self) -> &str {
        "hex"
    }

    fn matches(&self, value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| c.is_ascii_hexdigit())
    }
}

#[test]
fn test_custom_format() {
    let factory = extended_factory();
    let schema = factory
        .schema_from_node(json!({"format": "hex"}))
        .expect("schema compiles");

    assert!(schema.validate(&json!("deadBEEF01")).is_empty());
    let messages = schema.validate(&json!("not hex"));
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages.iter().next().expect("one message").arguments,
        vec!["hex"]
    );
}

#[test]
fn test_builtin_formats_survive_dialect_extension() {
    let factory = extended_factory();
    let schema = factory
        .schema_from_node(json!({"format": "ipv4"}))
        .expect("schema compiles");
    assert_eq!(schema.validate(&json!("999.1.1.1")).len(), 1);
}

/// Serves schema documents from memory, keyed by full URL
struct MapFetcher {
    documents: HashMap<String, String>,
}

impl UrlFetcher for MapFetcher {
    fn fetch(&self, url: &Url) -> std::io::Result<Box<dyn Read + Send>> {
        match self.documents.get(url.as_str()) {
            Some(text) => Ok(Box::new(Cursor::new(text.clone().into_bytes()))),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no document registered for {url}"),
            )),
        }
    }
}

#[test]
fn test_custom_url_fetcher() {
    let mut documents = HashMap::new();
    documents.insert(
        "https://schemas.example.com/name.json".to_string(),
        json!({"type": "string", "minLength": 1}).to_string(),
    );

    let draft4 = JsonMetaSchema::draft4();
    let factory = JsonSchemaFactory::builder()
        .default_meta_schema_uri(draft4.uri().to_string())
        .add_meta_schema(draft4)
        .url_fetcher(Arc::new(MapFetcher { documents }))
        .build()
        .expect("factory builds");

    let schema = factory
        .schema_from_node(json!({
            "properties": {
                "name": {"$ref": "https://schemas.example.com/name.json"}
            }
        }))
        .expect("schema compiles through the custom fetcher");

    assert!(schema.validate(&json!({"name": "x"})).is_empty());
    assert_eq!(schema.validate(&json!({"name": ""})).len(), 1);
}
