//! The generic JSON value tree (`Bric`) and its pull parser.
//!
//! `Bric` is a tagged sum over the six JSON kinds with insertion-ordered
//! objects. The parser streams input into a pluggable [`parse::Bricolage`]
//! builder, so callers can construct `Bric`, `serde_json::Value`, or their
//! own representation without an intermediate pass.

mod convert;
mod encode;
mod ops;
pub mod parse;
mod value;

pub use encode::{encode, encode_pretty};
pub use parse::{
    parse, parse_into, parse_with, BricBricolage, Bricolage, JsonBricolage, ParseError,
    ParseErrorKind, ParseOptions,
};
pub use value::Bric;
