//! The `$ref` keyword and reference resolution
//!
//! A `$ref` value is a URI-Reference. Resolution happens while the schema
//! compiles: same-document fragments navigate the current document by JSON
//! Pointer; everything else resolves to an absolute URL per RFC 3986
//! against the nearest ancestor base URL and loads the target document
//! through the factory's URL fetcher. The validator itself only delegates
//! to the compiled target, so following a reference at validation time is a
//! single index hop, and recursive schemas terminate because every
//! recursion descends into a smaller sub-instance.
//!
//! In Draft 4 the presence of `$ref` does not suppress sibling keywords;
//! siblings compile and run as usual.

use super::KeywordValidator;
use crate::context::ValidationContext;
use crate::pointer::JsonPointer;
use crate::schema::{SchemaGraph, SchemaIndex};
use jsonschema_core::{MessageSet, Result, SchemaError};
use serde_json::Value;
use tracing::debug;
use url::Url;

pub struct RefValidator {
    reference: String,
    /// Bound exactly once during compilation, never rebound afterwards
    target: SchemaIndex,
}

/// Build the `$ref` validator, resolving the target immediately
///
/// # Errors
///
/// Returns [`SchemaError::UnresolvableReference`] when the target does not
/// exist and load errors when a remote document cannot be fetched or
/// parsed.
pub fn factory(
    context: &mut ValidationContext<'_, '_>,
    value: &Value,
) -> Result<Box<dyn KeywordValidator>> {
    let reference = value
        .as_str()
        .ok_or_else(|| SchemaError::load("the value of $ref must be a string"))?;
    let target = resolve(context, reference)?;
    Ok(Box::new(RefValidator {
        reference: reference.to_string(),
        target,
    }))
}

impl KeywordValidator for RefValidator {
    fn validate(
        &self,
        schemas: &SchemaGraph,
        instance: &Value,
        root: &Value,
        at: &str,
    ) -> MessageSet {
        debug!(reference = %self.reference, path = at, "following $ref");
        schemas.validate_index(self.target, instance, root, at)
    }
}

/// Resolve a URI-Reference to a compiled schema within the current
/// compilation
pub(crate) fn resolve(
    context: &mut ValidationContext<'_, '_>,
    reference: &str,
) -> Result<SchemaIndex> {
    debug!(reference, "resolving $ref");
    let (url_part, fragment) = split_fragment(reference);

    if url_part.is_empty() {
        let document = context.document;
        return target_in_document(context, document, fragment, reference);
    }

    let document_root = match Url::parse(url_part) {
        Ok(url) => context.compiler.load_document(&url)?,
        Err(_) => match context.compiler.base_url(context.index) {
            Some(base) => {
                let url = base
                    .join(url_part)
                    .map_err(|_| SchemaError::unresolvable(reference))?;
                context.compiler.load_document(&url)?
            }
            // No base URL to resolve against: fall back to a local
            // resource lookup under the reference as written.
            None => context.compiler.load_resource(url_part)?,
        },
    };

    let document = context.compiler.document_of(document_root);
    target_in_document(context, document, fragment, reference)
}

fn target_in_document(
    context: &mut ValidationContext<'_, '_>,
    document: usize,
    fragment: Option<&str>,
    reference: &str,
) -> Result<SchemaIndex> {
    match fragment {
        None | Some("") => Ok(context.compiler.document_root(document)),
        Some(text) => {
            let pointer =
                JsonPointer::parse(text).map_err(|_| SchemaError::unresolvable(reference))?;
            context.compiler.compile_pointer(document, &pointer, reference)
        }
    }
}

fn split_fragment(reference: &str) -> (&str, Option<&str>) {
    match reference.find('#') {
        Some(i) => (&reference[..i], Some(&reference[i + 1..])),
        None => (reference, None),
    }
}
