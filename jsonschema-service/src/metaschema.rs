//! Meta-schema registry
//!
//! A [`JsonMetaSchema`] defines a dialect: which keywords are active, which
//! property declares a schema's identifier, and which named formats exist.
//! The factory selects a meta-schema by exact URI from a document's
//! `$schema` declaration; two meta-schemas are never merged.
//!
//! [`JsonMetaSchema::draft4`] is the built-in Draft 4 dialect. Custom
//! dialects start from [`JsonMetaSchema::builder`] or extend an existing one
//! via [`JsonMetaSchema::to_builder`] to register an extra keyword such as
//! `const`, a custom keyword validator, or additional formats.

use crate::context::ValidationContext;
use crate::formats::{builtin_formats, Format};
use crate::validators::{
    array_validators, boolean_constraints, constraint_validators, object_validators,
    range_validator, ref_validator, string_constraints, type_validator, KeywordValidator,
};
use indexmap::IndexMap;
use jsonschema_core::Result;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;

/// URI of the JSON Schema Draft 4 meta-schema
pub const DRAFT4_URI: &str = "http://json-schema.org/draft-04/schema#";

/// Builds one keyword's validator from its schema value
pub type KeywordFactory = Arc<
    dyn Fn(&mut ValidationContext<'_, '_>, &Value) -> Result<Box<dyn KeywordValidator>>
        + Send
        + Sync,
>;

/// A dialect: active keywords, identifier keyword, named formats
pub struct JsonMetaSchema {
    uri: String,
    id_keyword: String,
    keywords: IndexMap<String, KeywordFactory>,
    formats: IndexMap<String, Arc<dyn Format>>,
}

impl JsonMetaSchema {
    /// Start building a dialect from scratch
    #[must_use]
    pub fn builder(uri: impl Into<String>) -> JsonMetaSchemaBuilder {
        JsonMetaSchemaBuilder {
            uri: uri.into(),
            id_keyword: "id".to_string(),
            keywords: IndexMap::new(),
            formats: IndexMap::new(),
        }
    }

    /// The built-in Draft 4 dialect
    #[must_use]
    pub fn draft4() -> Arc<JsonMetaSchema> {
        DRAFT4.clone()
    }

    /// A builder preloaded with this dialect's keywords and formats
    ///
    /// The usual way to define an extended dialect; give the result its own
    /// URI before registering it.
    #[must_use]
    pub fn to_builder(&self) -> JsonMetaSchemaBuilder {
        JsonMetaSchemaBuilder {
            uri: self.uri.clone(),
            id_keyword: self.id_keyword.clone(),
            keywords: self.keywords.clone(),
            formats: self.formats.clone(),
        }
    }

    /// The URI documents select this dialect by
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The property that declares a schema's identifier (`id` in Draft 4,
    /// `$id` in Draft 6+)
    #[must_use]
    pub fn id_keyword(&self) -> &str {
        &self.id_keyword
    }

    /// Look up the factory for a keyword, if the dialect defines it
    #[must_use]
    pub fn keyword_factory(&self, keyword: &str) -> Option<&KeywordFactory> {
        self.keywords.get(keyword)
    }

    /// Look up a named format, if the dialect defines it
    #[must_use]
    pub fn format(&self, name: &str) -> Option<Arc<dyn Format>> {
        self.formats.get(name).cloned()
    }
}

/// Builder for [`JsonMetaSchema`]
pub struct JsonMetaSchemaBuilder {
    uri: String,
    id_keyword: String,
    keywords: IndexMap<String, KeywordFactory>,
    formats: IndexMap<String, Arc<dyn Format>>,
}

impl JsonMetaSchemaBuilder {
    /// Set the dialect URI
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Set the identifier keyword
    #[must_use]
    pub fn id_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.id_keyword = keyword.into();
        self
    }

    /// Register a keyword factory, replacing any previous registration
    #[must_use]
    pub fn keyword(mut self, name: impl Into<String>, factory: KeywordFactory) -> Self {
        self.keywords.insert(name.into(), factory);
        self
    }

    /// Register a named format
    #[must_use]
    pub fn format(mut self, format: Arc<dyn Format>) -> Self {
        self.formats.insert(format.name().to_string(), format);
        self
    }

    /// Finish the dialect
    #[must_use]
    pub fn build(self) -> JsonMetaSchema {
        JsonMetaSchema {
            uri: self.uri,
            id_keyword: self.id_keyword,
            keywords: self.keywords,
            formats: self.formats,
        }
    }
}

static DRAFT4: Lazy<Arc<JsonMetaSchema>> = Lazy::new(|| {
    let mut builder = JsonMetaSchema::builder(DRAFT4_URI);
    for format in builtin_formats() {
        builder = builder.format(format);
    }
    Arc::new(
        builder
            .keyword("type", Arc::new(type_validator::factory))
            .keyword("enum", Arc::new(constraint_validators::enumeration))
            .keyword("allOf", Arc::new(boolean_constraints::all_of))
            .keyword("anyOf", Arc::new(boolean_constraints::any_of))
            .keyword("oneOf", Arc::new(boolean_constraints::one_of))
            .keyword("not", Arc::new(boolean_constraints::not))
            .keyword("properties", Arc::new(object_validators::properties))
            .keyword(
                "patternProperties",
                Arc::new(object_validators::pattern_properties),
            )
            .keyword(
                "additionalProperties",
                Arc::new(object_validators::additional_properties),
            )
            .keyword("required", Arc::new(constraint_validators::required))
            .keyword("minProperties", Arc::new(object_validators::min_properties))
            .keyword("maxProperties", Arc::new(object_validators::max_properties))
            .keyword("dependencies", Arc::new(constraint_validators::dependencies))
            .keyword("items", Arc::new(array_validators::items))
            .keyword(
                "additionalItems",
                Arc::new(array_validators::additional_items),
            )
            .keyword("minItems", Arc::new(array_validators::min_items))
            .keyword("maxItems", Arc::new(array_validators::max_items))
            .keyword("uniqueItems", Arc::new(array_validators::unique_items))
            .keyword("minLength", Arc::new(string_constraints::min_length))
            .keyword("maxLength", Arc::new(string_constraints::max_length))
            .keyword("pattern", Arc::new(string_constraints::pattern))
            .keyword("format", Arc::new(string_constraints::format))
            .keyword("minimum", Arc::new(range_validator::minimum))
            .keyword("maximum", Arc::new(range_validator::maximum))
            .keyword("multipleOf", Arc::new(range_validator::multiple_of))
            .keyword("$ref", Arc::new(ref_validator::factory))
            .build(),
    )
});
