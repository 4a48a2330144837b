//! The decoded JSON Schema record (draft-04 subset).
//!
//! Every keyword the reifier understands is an optional field; anything
//! else survives verbatim in `extensions` and is ignored downstream.

use bric::Bric;
use indexmap::IndexMap;

/// One of the seven draft-04 simple type words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl SimpleType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "string" => Self::String,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => return None,
        })
    }
}

/// The `type` keyword: one word or a list of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    One(SimpleType),
    Many(Vec<SimpleType>),
}

/// The `items` keyword: one schema for every element, or a tuple of
/// positional schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    Single(Box<Schema>),
    Tuple(Vec<Schema>),
}

/// The `additionalProperties` keyword: a blanket yes/no or a schema for
/// extra members.
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// A decoded schema node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub id: Option<String>,
    pub ref_: Option<String>,
    pub type_: Option<TypeSpec>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Bric>,
    pub const_: Option<Bric>,
    pub enum_: Option<Vec<Bric>>,
    pub required: Option<Vec<String>>,
    pub properties: Option<IndexMap<String, Schema>>,
    pub additional_properties: Option<AdditionalProperties>,
    pub items: Option<Items>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub all_of: Option<Vec<Schema>>,
    pub any_of: Option<Vec<Schema>>,
    pub one_of: Option<Vec<Schema>>,
    pub not: Option<Box<Schema>>,
    pub definitions: Option<IndexMap<String, Schema>>,
    /// Keywords the reifier does not understand, preserved verbatim.
    pub extensions: IndexMap<String, Bric>,
}

impl Schema {
    /// True when the node is object-shaped: an explicit `object` type or
    /// the presence of `properties`.
    pub fn is_object_shaped(&self) -> bool {
        self.properties.is_some()
            || matches!(self.type_, Some(TypeSpec::One(SimpleType::Object)))
    }

    /// True when `key` is listed in `required`.
    pub fn requires(&self, key: &str) -> bool {
        self.required
            .as_deref()
            .map(|names| names.iter().any(|n| n == key))
            .unwrap_or(false)
    }
}
