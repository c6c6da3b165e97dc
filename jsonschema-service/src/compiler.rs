//! Schema compilation
//!
//! The compiler turns a schema document into the immutable
//! [`SchemaGraph`](crate::schema::SchemaGraph) the validators run against.
//! Every distinct `(document, pointer)` location compiles at most once: the
//! location is registered *before* its keywords are compiled, so a `$ref`
//! that loops back into a schema currently being built receives the
//! already-allocated index instead of recursing. Remote documents pulled in
//! by `$ref` are compiled into the same graph, each under its own
//! meta-schema and base URL.

use crate::context::ValidationContext;
use crate::factory::JsonSchemaFactory;
use crate::metaschema::JsonMetaSchema;
use crate::pointer::JsonPointer;
use crate::schema::{Document, SchemaGraph, SchemaIndex, SchemaNode};
use jsonschema_core::{Result, SchemaError};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;
use url::Url;

pub(crate) struct Compiler<'f> {
    factory: &'f JsonSchemaFactory,
    nodes: Vec<Option<SchemaNode>>,
    documents: Vec<Document>,
    /// One compiled schema per distinct location; entries are registered
    /// before the location's keywords compile, which is what makes
    /// recursive references terminate.
    resolved: HashMap<(usize, String), SchemaIndex>,
    /// Loaded documents by canonical URL (and resource key for non-URL
    /// lookups), so a document is fetched and compiled once per graph.
    documents_by_key: HashMap<String, usize>,
}

impl<'f> Compiler<'f> {
    pub(crate) fn new(factory: &'f JsonSchemaFactory) -> Self {
        Self {
            factory,
            nodes: Vec::new(),
            documents: Vec::new(),
            resolved: HashMap::new(),
            documents_by_key: HashMap::new(),
        }
    }

    pub(crate) fn document_meta(&self, document: usize) -> Arc<JsonMetaSchema> {
        self.documents[document].meta_schema.clone()
    }

    pub(crate) fn document_root(&self, document: usize) -> SchemaIndex {
        self.documents[document].root_index
    }

    pub(crate) fn document_of(&self, index: SchemaIndex) -> usize {
        match self.nodes[index.0].as_ref() {
            Some(node) => node.document,
            None => 0,
        }
    }

    /// Register and compile a document, returning the index of its root
    /// schema
    pub(crate) fn add_document(
        &mut self,
        source_url: Option<Url>,
        resource_key: Option<String>,
        node: Value,
        meta_schema: Arc<JsonMetaSchema>,
    ) -> Result<SchemaIndex> {
        let document = self.documents.len();
        let index = self.alloc();
        let base_url = canonical_base(source_url.as_ref(), &node, &meta_schema);

        if let Some(url) = &base_url {
            self.documents_by_key
                .insert(without_fragment(url), document);
        }
        if let Some(url) = &source_url {
            self.documents_by_key
                .insert(without_fragment(url), document);
        }
        if let Some(key) = resource_key {
            self.documents_by_key.insert(key, document);
        }

        debug!(base = ?base_url, "compiling schema document");
        self.documents.push(Document {
            base_url,
            root_node: node.clone(),
            root_index: index,
            meta_schema,
        });
        self.resolved.insert((document, String::new()), index);
        self.compile_into(index, document, JsonPointer::root(), None, node)?;
        Ok(index)
    }

    /// Compile a schema node at a given location, reusing the existing
    /// compiled schema when the location was seen before
    pub(crate) fn compile_node(
        &mut self,
        document: usize,
        pointer: JsonPointer,
        parent: Option<SchemaIndex>,
        value: Value,
    ) -> Result<SchemaIndex> {
        let key = (document, pointer.to_string());
        if let Some(&index) = self.resolved.get(&key) {
            return Ok(index);
        }
        let index = self.alloc();
        self.resolved.insert(key, index);
        self.compile_into(index, document, pointer, parent, value)?;
        Ok(index)
    }

    /// Compile the node a JSON pointer addresses within a loaded document
    ///
    /// `reference` is the original `$ref` text, used for diagnostics.
    pub(crate) fn compile_pointer(
        &mut self,
        document: usize,
        pointer: &JsonPointer,
        reference: &str,
    ) -> Result<SchemaIndex> {
        let key = (document, pointer.to_string());
        if let Some(&index) = self.resolved.get(&key) {
            return Ok(index);
        }
        let target = pointer.resolve(&self.documents[document].root_node).cloned();
        match target {
            Some(value) => {
                let parent = self.documents[document].root_index;
                self.compile_node(document, pointer.clone(), Some(parent), value)
            }
            None => Err(SchemaError::unresolvable(reference)),
        }
    }

    /// Fetch, parse and compile the document at `url`, reusing an
    /// already-loaded document with the same canonical URL
    pub(crate) fn load_document(&mut self, url: &Url) -> Result<SchemaIndex> {
        if let Some(&document) = self.documents_by_key.get(&without_fragment(url)) {
            return Ok(self.document_root(document));
        }
        debug!(%url, "fetching remote schema");
        let mut stream = self
            .factory
            .fetcher()
            .fetch(url)
            .map_err(|e| SchemaError::load_with_source(format!("failed to fetch {url}"), e))?;
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| SchemaError::load_with_source(format!("failed to read {url}"), e))?;
        let node: Value = serde_json::from_slice(&bytes)?;
        let meta_schema = self.factory.meta_schema_for(&node)?;
        self.add_document(Some(url.clone()), None, node, meta_schema)
    }

    /// Load a schema from a local resource path
    ///
    /// Fallback for `$ref` values that are neither absolute URLs nor
    /// resolvable against a base URL; the reference is read from the
    /// filesystem as-is.
    pub(crate) fn load_resource(&mut self, path: &str) -> Result<SchemaIndex> {
        let key = format!("resource:{path}");
        if let Some(&document) = self.documents_by_key.get(&key) {
            return Ok(self.document_root(document));
        }
        debug!(path, "loading schema resource");
        let bytes = std::fs::read(path)
            .map_err(|e| SchemaError::load_with_source(format!("failed to read resource {path}"), e))?;
        let node: Value = serde_json::from_slice(&bytes)?;
        let meta_schema = self.factory.meta_schema_for(&node)?;
        self.add_document(None, Some(key), node, meta_schema)
    }

    /// Base URL in effect at a schema node
    ///
    /// Walks the ancestor chain and folds every id declaration from the
    /// outermost in, starting from the document's own base URL, per
    /// RFC 3986 reference resolution.
    pub(crate) fn base_url(&self, index: SchemaIndex) -> Option<Url> {
        let mut chain = Vec::new();
        let mut current = Some(index);
        while let Some(idx) = current {
            let node = self.nodes[idx.0].as_ref()?;
            chain.push(idx);
            current = node.parent;
        }

        let root = self.nodes[chain.last()?.0].as_ref()?;
        let mut base = self.documents[root.document].base_url.clone();
        for idx in chain.iter().rev() {
            let node = self.nodes[idx.0].as_ref()?;
            let id_keyword = self.documents[node.document].meta_schema.id_keyword().to_string();
            if let Some(id) = node.schema_node.get(&id_keyword).and_then(Value::as_str) {
                base = match base {
                    Some(b) => b.join(id).ok().or_else(|| Url::parse(id).ok()).or(Some(b)),
                    None => Url::parse(id).ok(),
                };
            }
        }
        base
    }

    pub(crate) fn finish(self) -> Result<SchemaGraph> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| node.ok_or_else(|| SchemaError::load("schema compilation left an unbuilt node")))
            .collect::<Result<Vec<_>>>()?;
        Ok(SchemaGraph {
            nodes,
            documents: self.documents,
        })
    }

    fn alloc(&mut self) -> SchemaIndex {
        let index = SchemaIndex(self.nodes.len());
        self.nodes.push(None);
        index
    }

    fn compile_into(
        &mut self,
        index: SchemaIndex,
        document: usize,
        pointer: JsonPointer,
        parent: Option<SchemaIndex>,
        value: Value,
    ) -> Result<()> {
        let schema_path = format!("#{pointer}");
        // Store the node shell first so ancestor walks (base URL lookup,
        // findAncestor) work while the node's own keywords compile.
        self.nodes[index.0] = Some(SchemaNode {
            schema_node: value.clone(),
            schema_path,
            parent,
            document,
            validators: Vec::new(),
        });

        let meta_schema = self.document_meta(document);
        let mut validators = Vec::new();
        if let Some(object) = value.as_object() {
            for (keyword, keyword_value) in object {
                // Keys the dialect does not know are not keywords; skip them.
                let Some(factory) = meta_schema.keyword_factory(keyword) else {
                    continue;
                };
                let factory = factory.clone();
                let mut context = ValidationContext {
                    compiler: self,
                    document,
                    index,
                    schema_node: &value,
                    pointer: &pointer,
                };
                let validator = factory(&mut context, keyword_value)?;
                validators.push((keyword.clone(), validator));
            }
        }

        if let Some(node) = self.nodes[index.0].as_mut() {
            node.validators = validators;
        }
        Ok(())
    }
}

fn without_fragment(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}

/// The canonical identity of a document: its id declaration when absolute,
/// joined against the source URL when relative, else the source URL itself
fn canonical_base(
    source_url: Option<&Url>,
    node: &Value,
    meta_schema: &JsonMetaSchema,
) -> Option<Url> {
    let id = node.get(meta_schema.id_keyword()).and_then(Value::as_str);
    match (id, source_url) {
        (Some(id), Some(url)) => match Url::parse(id) {
            Ok(id_url) => {
                if &id_url == url {
                    debug!(%id_url, "schema id matches its source URL");
                }
                Some(id_url)
            }
            Err(_) => url.join(id).ok().or_else(|| Some(url.clone())),
        },
        (Some(id), None) => Url::parse(id).ok(),
        (None, Some(url)) => Some(url.clone()),
        (None, None) => None,
    }
}
