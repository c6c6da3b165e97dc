//! Schema factory
//!
//! The entry point of the crate: a [`JsonSchemaFactory`] loads a schema
//! document from text, a byte stream, a URL or an already-parsed node,
//! selects the meta-schema the document declares, and compiles it into a
//! [`JsonSchema`]. The factory is immutable after build and safe to share
//! across threads; compiled schemas do not keep it alive.

use crate::compiler::Compiler;
use crate::fetcher::StandardUrlFetcher;
use crate::metaschema::JsonMetaSchema;
use crate::schema::JsonSchema;
use indexmap::IndexMap;
use jsonschema_core::{Result, SchemaError, UrlFetcher};
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Factory for compiled schemas
pub struct JsonSchemaFactory {
    url_fetcher: Arc<dyn UrlFetcher>,
    default_meta_schema_uri: String,
    meta_schemas: IndexMap<String, Arc<JsonMetaSchema>>,
}

impl JsonSchemaFactory {
    /// Start building a factory from scratch, without any meta-schemas
    ///
    /// Usually [`JsonSchemaFactory::draft4`] is what you want; use the
    /// builder to register custom dialects or swap the URL fetcher.
    #[must_use]
    pub fn builder() -> JsonSchemaFactoryBuilder {
        JsonSchemaFactoryBuilder {
            url_fetcher: None,
            default_meta_schema_uri: String::new(),
            meta_schemas: IndexMap::new(),
        }
    }

    /// A factory preconfigured with the Draft 4 dialect and the standard
    /// URL fetcher
    #[must_use]
    pub fn draft4() -> Self {
        let draft4 = JsonMetaSchema::draft4();
        let mut meta_schemas = IndexMap::new();
        meta_schemas.insert(draft4.uri().to_string(), draft4.clone());
        Self {
            url_fetcher: Arc::new(StandardUrlFetcher::new()),
            default_meta_schema_uri: draft4.uri().to_string(),
            meta_schemas,
        }
    }

    /// Parse and compile a schema from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON, the meta-schema is
    /// unknown, or compilation fails.
    pub fn schema_from_str(&self, text: &str) -> Result<JsonSchema> {
        let node: Value = serde_json::from_str(text)?;
        self.schema_from_node(node)
    }

    /// Parse and compile a schema from a byte stream
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing fails, the meta-schema is
    /// unknown, or compilation fails.
    pub fn schema_from_reader(&self, reader: impl Read) -> Result<JsonSchema> {
        let node: Value = serde_json::from_reader(reader)?;
        self.schema_from_node(node)
    }

    /// Fetch, parse and compile the schema at `url`
    ///
    /// The URL becomes the document's base URL for resolving relative
    /// `$ref`s, unless the schema declares its own absolute identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching, parsing or compilation fails.
    pub fn schema_from_url(&self, url: &Url) -> Result<JsonSchema> {
        debug!(%url, "loading schema");
        let mut stream = self
            .url_fetcher
            .fetch(url)
            .map_err(|e| SchemaError::load_with_source(format!("failed to fetch {url}"), e))?;
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| SchemaError::load_with_source(format!("failed to read {url}"), e))?;
        let node: Value = serde_json::from_slice(&bytes)?;
        self.compile(Some(url.clone()), node)
    }

    /// Compile an already-parsed schema node
    ///
    /// # Errors
    ///
    /// Returns an error if the meta-schema is unknown or compilation
    /// fails.
    pub fn schema_from_node(&self, node: Value) -> Result<JsonSchema> {
        self.compile(None, node)
    }

    fn compile(&self, source_url: Option<Url>, node: Value) -> Result<JsonSchema> {
        let meta_schema = self.meta_schema_for(&node)?;
        let mut compiler = Compiler::new(self);
        let root = compiler.add_document(source_url, None, node, meta_schema)?;
        let graph = compiler.finish()?;
        Ok(JsonSchema::new(Arc::new(graph), root))
    }

    /// Select the meta-schema a document declares via `$schema`, or the
    /// factory default when the declaration is absent
    pub(crate) fn meta_schema_for(&self, node: &Value) -> Result<Arc<JsonMetaSchema>> {
        let uri = node
            .get("$schema")
            .and_then(Value::as_str)
            .unwrap_or(&self.default_meta_schema_uri);
        self.meta_schemas
            .get(uri)
            .cloned()
            .ok_or_else(|| SchemaError::unknown_meta_schema(uri))
    }

    pub(crate) fn fetcher(&self) -> &Arc<dyn UrlFetcher> {
        &self.url_fetcher
    }
}

/// Builder for [`JsonSchemaFactory`]
pub struct JsonSchemaFactoryBuilder {
    url_fetcher: Option<Arc<dyn UrlFetcher>>,
    default_meta_schema_uri: String,
    meta_schemas: IndexMap<String, Arc<JsonMetaSchema>>,
}

impl JsonSchemaFactoryBuilder {
    /// Use a custom URL fetching strategy
    #[must_use]
    pub fn url_fetcher(mut self, fetcher: Arc<dyn UrlFetcher>) -> Self {
        self.url_fetcher = Some(fetcher);
        self
    }

    /// The meta-schema URI assumed when a document has no `$schema`
    #[must_use]
    pub fn default_meta_schema_uri(mut self, uri: impl Into<String>) -> Self {
        self.default_meta_schema_uri = uri.into();
        self
    }

    /// Register a dialect under its URI
    #[must_use]
    pub fn add_meta_schema(mut self, meta_schema: impl Into<Arc<JsonMetaSchema>>) -> Self {
        let meta_schema = meta_schema.into();
        self.meta_schemas
            .insert(meta_schema.uri().to_string(), meta_schema);
        self
    }

    /// Finish the factory
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidConfiguration`] when the default
    /// meta-schema URI is empty, no meta-schemas are registered, or the
    /// default URI is not among them.
    pub fn build(self) -> Result<JsonSchemaFactory> {
        if self.default_meta_schema_uri.trim().is_empty() {
            return Err(SchemaError::config(
                "default meta-schema URI must not be empty",
            ));
        }
        if self.meta_schemas.is_empty() {
            return Err(SchemaError::config(
                "at least one meta-schema must be registered",
            ));
        }
        if !self.meta_schemas.contains_key(&self.default_meta_schema_uri) {
            return Err(SchemaError::config(format!(
                "no meta-schema registered for default URI {}",
                self.default_meta_schema_uri
            )));
        }
        Ok(JsonSchemaFactory {
            url_fetcher: self
                .url_fetcher
                .unwrap_or_else(|| Arc::new(StandardUrlFetcher::new())),
            default_meta_schema_uri: self.default_meta_schema_uri,
            meta_schemas: self.meta_schemas,
        })
    }
}
