//! Per-compilation context handed to keyword factories
//!
//! One compilation of a root schema threads a [`ValidationContext`] into
//! every keyword factory it invokes. The context exposes the active
//! meta-schema, the enclosing schema object (for keywords that read
//! siblings, like `minimum` reading `exclusiveMinimum`), and the operations
//! a factory needs to compile sub-schemas or resolve references through the
//! owning factory.

use crate::compiler::Compiler;
use crate::metaschema::JsonMetaSchema;
use crate::pointer::JsonPointer;
use crate::schema::SchemaIndex;
use crate::validators::ref_validator;
use jsonschema_core::Result;
use serde_json::Value;
use std::sync::Arc;

/// Compilation state visible to keyword factories
pub struct ValidationContext<'a, 'f> {
    pub(crate) compiler: &'a mut Compiler<'f>,
    /// Document the current schema belongs to
    pub(crate) document: usize,
    /// The schema node whose keywords are being compiled
    pub(crate) index: SchemaIndex,
    /// The enclosing schema object
    pub(crate) schema_node: &'a Value,
    /// Canonical JSON pointer of the enclosing schema within its document
    pub(crate) pointer: &'a JsonPointer,
}

impl ValidationContext<'_, '_> {
    /// The meta-schema governing the document being compiled
    #[must_use]
    pub fn meta_schema(&self) -> Arc<JsonMetaSchema> {
        self.compiler.document_meta(self.document)
    }

    /// The schema object the current keyword appears in
    ///
    /// Lets a keyword read its siblings, e.g. `additionalProperties`
    /// inspecting `properties` and `patternProperties`.
    #[must_use]
    pub fn schema_node(&self) -> &Value {
        self.schema_node
    }

    /// Path of the enclosing schema from its document root, e.g.
    /// `#/properties/name`
    #[must_use]
    pub fn schema_path(&self) -> String {
        format!("#{}", self.pointer)
    }

    /// Compile `node` as a sub-schema located at the given reference tokens
    /// below the enclosing schema
    ///
    /// # Errors
    ///
    /// Returns an error if the sub-schema fails to compile.
    pub fn compile_subschema(&mut self, node: &Value, tokens: &[&str]) -> Result<SchemaIndex> {
        let mut pointer = self.pointer.clone();
        for token in tokens {
            pointer.push(*token);
        }
        self.compiler
            .compile_node(self.document, pointer, Some(self.index), node.clone())
    }

    /// Resolve a `$ref` URI-Reference to a compiled schema
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnresolvableReference`] when the target does
    /// not exist, and load errors when a remote document cannot be fetched
    /// or parsed.
    ///
    /// [`SchemaError::UnresolvableReference`]: jsonschema_core::SchemaError::UnresolvableReference
    pub fn resolve_reference(&mut self, reference: &str) -> Result<SchemaIndex> {
        ref_validator::resolve(self, reference)
    }
}
