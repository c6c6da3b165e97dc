//! Validation message model
//!
//! A validation run returns an ordered, de-duplicated set of
//! [`ValidationMessage`] values, one per violation. Each message carries the
//! keyword that produced it ([`ValidatorTypeCode`]), a stable error code, the
//! path of the offending value inside the instance, the keyword-specific
//! arguments, and a rendered human-readable message.
//!
//! Message equality and hashing ignore the rendered text: two messages are
//! the same violation when they agree on keyword, code, path and arguments.

use indexmap::IndexSet;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The set of messages returned by a validation run
///
/// Insertion-ordered and de-duplicated by `(type, code, path, arguments)`,
/// so diagnostics are stable across runs and implementations.
pub type MessageSet = IndexSet<ValidationMessage>;

/// Closed enumeration of validation keywords
///
/// Each variant carries a default error code and message template. Codes are
/// stable strings assigned in keyword order; templates use `{0}` for the
/// instance path and `{1}` onward for keyword-specific arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorTypeCode {
    AdditionalItems,
    AdditionalProperties,
    AllOf,
    AnyOf,
    Const,
    Dependencies,
    Enum,
    /// Draft 6+ numeric form; Draft 4 booleans are handled by `Maximum`
    ExclusiveMaximum,
    /// Draft 6+ numeric form; Draft 4 booleans are handled by `Minimum`
    ExclusiveMinimum,
    Format,
    Items,
    MaxItems,
    MaxLength,
    MaxProperties,
    Maximum,
    MinItems,
    MinLength,
    MinProperties,
    Minimum,
    MultipleOf,
    Not,
    OneOf,
    Pattern,
    PatternProperties,
    Properties,
    Ref,
    Required,
    Type,
    UniqueItems,
}

impl ValidatorTypeCode {
    /// The keyword as it appears in a schema document
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::AdditionalItems => "additionalItems",
            Self::AdditionalProperties => "additionalProperties",
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::Const => "const",
            Self::Dependencies => "dependencies",
            Self::Enum => "enum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::Format => "format",
            Self::Items => "items",
            Self::MaxItems => "maxItems",
            Self::MaxLength => "maxLength",
            Self::MaxProperties => "maxProperties",
            Self::Maximum => "maximum",
            Self::MinItems => "minItems",
            Self::MinLength => "minLength",
            Self::MinProperties => "minProperties",
            Self::Minimum => "minimum",
            Self::MultipleOf => "multipleOf",
            Self::Not => "not",
            Self::OneOf => "oneOf",
            Self::Pattern => "pattern",
            Self::PatternProperties => "patternProperties",
            Self::Properties => "properties",
            Self::Ref => "$ref",
            Self::Required => "required",
            Self::Type => "type",
            Self::UniqueItems => "uniqueItems",
        }
    }

    /// The default error code for this keyword
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AdditionalItems => "1001",
            Self::AdditionalProperties => "1002",
            Self::AllOf => "1003",
            Self::AnyOf => "1004",
            Self::Const => "1005",
            Self::Dependencies => "1006",
            Self::Enum => "1007",
            Self::ExclusiveMaximum => "1008",
            Self::ExclusiveMinimum => "1009",
            Self::Format => "1010",
            Self::Items => "1011",
            Self::MaxItems => "1012",
            Self::MaxLength => "1013",
            Self::MaxProperties => "1014",
            Self::Maximum => "1015",
            Self::MinItems => "1016",
            Self::MinLength => "1017",
            Self::MinProperties => "1018",
            Self::Minimum => "1019",
            Self::MultipleOf => "1020",
            Self::Not => "1021",
            Self::OneOf => "1022",
            Self::Pattern => "1023",
            Self::PatternProperties => "1024",
            Self::Properties => "1025",
            Self::Ref => "1026",
            Self::Required => "1027",
            Self::Type => "1028",
            Self::UniqueItems => "1029",
        }
    }

    /// The default message template
    ///
    /// `{0}` is the instance path; `{1}` onward are the arguments passed by
    /// the validator that built the message.
    #[must_use]
    pub fn message_template(&self) -> &'static str {
        match self {
            Self::AdditionalItems => "{0}: additional items are not allowed",
            Self::AdditionalProperties => "{0}: property {1} is not allowed",
            Self::AllOf => "{0}: must be valid against all of the schemas",
            Self::AnyOf => "{0}: must be valid against at least one of the schemas",
            Self::Const => "{0}: must be equal to the constant {1}",
            Self::Dependencies => "{0}: property {1} requires property {2} to be present",
            Self::Enum => "{0}: does not have a value in the enumeration {1}",
            Self::ExclusiveMaximum => "{0}: must be lower than {1}",
            Self::ExclusiveMinimum => "{0}: must be greater than {1}",
            Self::Format => "{0}: does not match the {1} format",
            Self::Items => "{0}: item does not match the schema",
            Self::MaxItems => "{0}: there must be a maximum of {1} items in the array",
            Self::MaxLength => "{0}: may only be {1} characters long",
            Self::MaxProperties => "{0}: may only have a maximum of {1} properties",
            Self::Maximum => "{0}: must have a maximum value of {1}",
            Self::MinItems => "{0}: there must be a minimum of {1} items in the array",
            Self::MinLength => "{0}: must be at least {1} characters long",
            Self::MinProperties => "{0}: must have a minimum of {1} properties",
            Self::Minimum => "{0}: must have a minimum value of {1}",
            Self::MultipleOf => "{0}: must be a multiple of {1}",
            Self::Not => "{0}: must not be valid against the schema",
            Self::OneOf => {
                "{0}: must be valid against exactly one of the schemas, but {1} are valid"
            }
            Self::Pattern => "{0}: does not match the regex pattern {1}",
            Self::PatternProperties => "{0}: does not match the pattern property schemas",
            Self::Properties => "{0}: property does not match the schema",
            Self::Ref => "{0}: reference {1} cannot be resolved",
            Self::Required => "{0}: required property {1} is missing",
            Self::Type => "{0}: {1} found, {2} expected",
            Self::UniqueItems => "{0}: the items in the array must be unique",
        }
    }
}

impl fmt::Display for ValidatorTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl Serialize for ValidatorTypeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.keyword())
    }
}

/// A single validation failure
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// The keyword that produced this message
    #[serde(rename = "type")]
    pub kind: ValidatorTypeCode,
    /// Stable error code
    pub code: String,
    /// Path of the offending value inside the instance, e.g. `$.items[3].name`
    pub path: String,
    /// Keyword-specific arguments used to render the message
    pub arguments: Vec<String>,
    /// Rendered human-readable message; informational only, ignored by
    /// equality and hashing
    pub message: String,
}

impl ValidationMessage {
    /// Build a message from a keyword's default code and template
    #[must_use]
    pub fn of(kind: ValidatorTypeCode, at: impl Into<String>, arguments: Vec<String>) -> Self {
        let path = at.into();
        let message = render_template(kind.message_template(), &path, &arguments);
        Self {
            kind,
            code: kind.code().to_string(),
            path,
            arguments,
            message,
        }
    }
}

impl PartialEq for ValidationMessage {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.code == other.code
            && self.path == other.path
            && self.arguments == other.arguments
    }
}

impl Eq for ValidationMessage {}

impl Hash for ValidationMessage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.code.hash(state);
        self.path.hash(state);
        self.arguments.hash(state);
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Substitute `{0}` with the path and `{n}` with `arguments[n - 1]`
fn render_template(template: &str, path: &str, arguments: &[String]) -> String {
    let mut rendered = template.replace("{0}", path);
    for (i, argument) in arguments.iter().enumerate() {
        rendered = rendered.replace(&format!("{{{}}}", i + 1), argument);
    }
    rendered
}
