//! Stream-oriented JSON parsing.
//!
//! The parser walks the input once and drives a [`Bricolage`] builder, so
//! the value representation is pluggable. [`parse`] and [`parse_with`] are
//! the common `Bric`-producing entry points; [`parse_into`] exposes the
//! builder seam.

mod bricolage;
mod error;
mod options;
mod parser;

pub use bricolage::{BricBricolage, Bricolage, JsonBricolage};
pub use error::{ParseError, ParseErrorKind};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::Parser;

use crate::value::Bric;

/// Parse JSON text into a `Bric` under the strict option set.
pub fn parse(text: &str) -> Result<Bric, ParseError> {
    parse_with(text, ParseOptions::default())
}

/// Parse JSON text into a `Bric` under the given options.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<Bric, ParseError> {
    let mut builder = BricBricolage;
    parse_into(text, options, &mut builder)
}

/// Parse JSON text into whatever the given builder assembles.
pub fn parse_into<B: Bricolage>(
    text: &str,
    options: ParseOptions,
    builder: &mut B,
) -> Result<B::Value, ParseError> {
    Parser::new(text, options, builder).parse_document()
}
