//! Compiled schemas
//!
//! A compiled root schema owns a [`SchemaGraph`]: every schema location the
//! compilation touched, including sub-schemas of remote documents pulled in
//! by `$ref`, lives in one arena indexed by [`SchemaIndex`]. Validators hold
//! indices rather than pointers, so recursive schemas are plain index loops
//! and the whole graph is immutable and shareable once compilation ends.
//!
//! [`JsonSchema`] is the public handle: a cheap clone of the graph plus the
//! index of one schema node within it.

use crate::metaschema::JsonMetaSchema;
use crate::pointer::JsonPointer;
use crate::validators::KeywordValidator;
use jsonschema_core::MessageSet;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Stable handle to one schema node within a [`SchemaGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaIndex(pub(crate) usize);

/// One compiled schema location
pub(crate) struct SchemaNode {
    /// The raw JSON subtree this schema was compiled from
    pub(crate) schema_node: Value,
    /// JSON-pointer path from the document root, e.g. `#/properties/name`
    pub(crate) schema_path: String,
    pub(crate) parent: Option<SchemaIndex>,
    pub(crate) document: usize,
    /// Keyword validators in schema declaration order
    pub(crate) validators: Vec<(String, Box<dyn KeywordValidator>)>,
}

/// A schema document loaded during compilation
pub(crate) struct Document {
    /// Canonical URL: the document's id declaration or its source URL
    pub(crate) base_url: Option<Url>,
    pub(crate) root_node: Value,
    pub(crate) root_index: SchemaIndex,
    pub(crate) meta_schema: Arc<JsonMetaSchema>,
}

/// Arena of every schema node compiled for one root schema
pub struct SchemaGraph {
    pub(crate) nodes: Vec<SchemaNode>,
    pub(crate) documents: Vec<Document>,
}

impl SchemaGraph {
    pub(crate) fn node(&self, index: SchemaIndex) -> &SchemaNode {
        &self.nodes[index.0]
    }

    /// Run the validators of the schema at `index` against `instance`
    ///
    /// This is the recursion point keyword validators use to descend into
    /// sub-schemas.
    #[must_use]
    pub fn validate_index(
        &self,
        index: SchemaIndex,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        let mut messages = MessageSet::new();
        for (_, validator) in &self.node(index).validators {
            messages.extend(validator.validate(self, instance, root, at));
        }
        messages
    }
}

/// A compiled schema, ready to validate instances
///
/// Cheap to clone and safe to share across threads; validation never
/// mutates the schema.
#[derive(Clone)]
pub struct JsonSchema {
    graph: Arc<SchemaGraph>,
    index: SchemaIndex,
}

impl JsonSchema {
    pub(crate) fn new(graph: Arc<SchemaGraph>, index: SchemaIndex) -> Self {
        Self { graph, index }
    }

    /// Validate an instance against this schema
    ///
    /// Returns the empty set when the instance conforms; otherwise one
    /// message per violation, in schema declaration order.
    #[must_use]
    pub fn validate(&self, instance: &Value) -> MessageSet {
        self.validate_at(instance, instance, "$")
    }

    /// Validate with an explicit outermost instance and path
    ///
    /// `root` is the top-level instance and is never rebound during
    /// descent; `at` is the path of `instance` within it.
    #[must_use]
    pub fn validate_at(&self, instance: &Value, root: &Value, at: &str) -> MessageSet {
        debug!(path = at, schema = %self.schema_path(), "validating");
        self.graph.validate_index(self.index, instance, root, at)
    }

    /// The raw JSON subtree this schema was compiled from
    #[must_use]
    pub fn schema_node(&self) -> &Value {
        &self.graph.node(self.index).schema_node
    }

    /// JSON-pointer path of this schema from its document root
    #[must_use]
    pub fn schema_path(&self) -> &str {
        &self.graph.node(self.index).schema_path
    }

    /// The enclosing schema, if this is not a document root
    #[must_use]
    pub fn parent(&self) -> Option<JsonSchema> {
        self.graph
            .node(self.index)
            .parent
            .map(|parent| Self::new(self.graph.clone(), parent))
    }

    /// The root schema of the document this schema belongs to
    #[must_use]
    pub fn find_ancestor(&self) -> JsonSchema {
        let document = self.graph.node(self.index).document;
        Self::new(self.graph.clone(), self.graph.documents[document].root_index)
    }

    /// Navigate a same-document reference to its raw schema node
    ///
    /// `reference` is a fragment like `#/definitions/item`; returns `None`
    /// when nothing exists at that pointer.
    #[must_use]
    pub fn ref_schema_node(&self, reference: &str) -> Option<&Value> {
        let fragment = reference.strip_prefix('#').unwrap_or(reference);
        let pointer = JsonPointer::parse(fragment).ok()?;
        let document = self.graph.node(self.index).document;
        pointer.resolve(&self.graph.documents[document].root_node)
    }
}

#[cfg(test)]
mod tests {
    use crate::factory::JsonSchemaFactory;
    use serde_json::json;

    #[test]
    fn test_schema_tree_introspection() {
        let factory = JsonSchemaFactory::draft4();
        let schema = factory
            .schema_from_node(json!({
                "properties": {
                    "a": {"type": "string"}
                }
            }))
            .expect("schema compiles");

        assert_eq!(schema.schema_path(), "#");
        assert!(schema.parent().is_none());
        assert_eq!(schema.find_ancestor().schema_path(), "#");

        let node = schema
            .ref_schema_node("#/properties/a")
            .expect("pointer resolves");
        assert_eq!(node, &json!({"type": "string"}));
        assert!(schema.ref_schema_node("#/properties/missing").is_none());
    }

    #[test]
    fn test_schema_node_holds_raw_subtree() {
        let factory = JsonSchemaFactory::draft4();
        let source = json!({"type": "integer", "minimum": 1});
        let schema = factory
            .schema_from_node(source.clone())
            .expect("schema compiles");
        assert_eq!(schema.schema_node(), &source);
    }
}
