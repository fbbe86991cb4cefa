//! Type tags: the channels that decide which sources may meet which targets.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

/// Identity-compared tag
///
/// Two symbols are equal only when one was cloned from the other; the
/// description is informational.
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(description: impl AsRef<str>) -> Self {
        Self(Arc::from(description.as_ref()))
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// A single interaction channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Name(String),
    Symbol(Symbol),
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Name(name) => f.write_str(name),
            TypeTag::Symbol(symbol) => write!(f, "Symbol({})", symbol.description()),
        }
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<&str> for TypeTag {
    fn from(value: &str) -> Self {
        TypeTag::Name(value.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(value: String) -> Self {
        TypeTag::Name(value)
    }
}

impl From<Symbol> for TypeTag {
    fn from(value: Symbol) -> Self {
        TypeTag::Symbol(value)
    }
}

/// Validated type of a registered handler
///
/// Sources always carry `Single`. Targets may listen on several channels;
/// `Many` keeps the caller's order and does not deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HandlerType {
    Single(TypeTag),
    Many(Vec<TypeTag>),
}

impl HandlerType {
    /// All tags, in registration order
    pub fn tags(&self) -> &[TypeTag] {
        match self {
            HandlerType::Single(tag) => std::slice::from_ref(tag),
            HandlerType::Many(tags) => tags,
        }
    }

    pub fn as_single(&self) -> Option<&TypeTag> {
        match self {
            HandlerType::Single(tag) => Some(tag),
            HandlerType::Many(_) => None,
        }
    }
}

impl std::fmt::Display for HandlerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerType::Single(tag) => write!(f, "{tag}"),
            HandlerType::Many(tags) => {
                let rendered: Vec<String> = tags.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

/// Unvalidated type input
///
/// Built from whatever the caller has in hand; the contract validator turns
/// it into a [`HandlerType`] or rejects it.
#[derive(Debug, Clone)]
pub enum TypeValue {
    Tag(TypeTag),
    Seq(Vec<TypeValue>),
    Other(Value),
}

impl From<TypeTag> for TypeValue {
    fn from(value: TypeTag) -> Self {
        TypeValue::Tag(value)
    }
}

impl From<&str> for TypeValue {
    fn from(value: &str) -> Self {
        TypeValue::Tag(value.into())
    }
}

impl From<String> for TypeValue {
    fn from(value: String) -> Self {
        TypeValue::Tag(value.into())
    }
}

impl From<Symbol> for TypeValue {
    fn from(value: Symbol) -> Self {
        TypeValue::Tag(value.into())
    }
}

impl<T: Into<TypeValue>> From<Vec<T>> for TypeValue {
    fn from(values: Vec<T>) -> Self {
        TypeValue::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for TypeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => TypeValue::Tag(TypeTag::Name(name)),
            Value::Array(items) => TypeValue::Seq(items.into_iter().map(Into::into).collect()),
            other => TypeValue::Other(other),
        }
    }
}
