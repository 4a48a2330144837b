//! The typed, decoded representation of a JSON Schema document.

mod decode;
mod model;

pub use model::{AdditionalProperties, Items, Schema, SimpleType, TypeSpec};
