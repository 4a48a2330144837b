//! A JSON-Schema-driven source code generator.
//!
//! Data flow: text → `bric::parse` → [`decode_schema`] → [`reify_module`]
//! → [`emit`]. Generated code implements the `bric-bind` contracts
//! against new `Bric` inputs at runtime.
//!
//! Everything is a pure transformation over in-memory values; file I/O
//! and diagnostics go through the capability traits in [`io`].

pub mod code;
pub mod emit;
pub mod io;
pub mod reify;
pub mod schema;

use bric::{Bric, ParseError, ParseOptions};
use bric_bind::{BindError, FromBric};
use thiserror::Error;

pub use code::{Access, CodeDecl, CodeModule, CodeType, Field, Prim, RestField, SumCase};
pub use emit::{emit, emit_to_string, EmitError, Target};
pub use io::{Logger, MemorySink, NullLogger, Sink, Source};
pub use reify::{reify, reify_module, ReifyError, ReifyErrorKind, ReifyOptions};
pub use schema::{AdditionalProperties, Items, Schema, SimpleType, TypeSpec};

/// Parse JSON text into a `Bric` value.
pub fn parse_json(text: &str, options: ParseOptions) -> Result<Bric, ParseError> {
    bric::parse_with(text, options)
}

/// Decode a schema document from a parsed value.
pub fn decode_schema(bric: &Bric) -> Result<Schema, BindError> {
    Schema::from_bric(bric)
}

/// Any failure along the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("source error: {0}")]
    Source(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Decode(#[from] BindError),
    #[error(transparent)]
    Reify(#[from] ReifyError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Run the whole pipeline over one schema document and write the result
/// through the sink. Returns the code module for inspection.
pub fn generate(
    schema_text: &str,
    id: &str,
    options: &ReifyOptions,
    target: Target,
    sink: &mut dyn Sink,
    logger: &mut dyn Logger,
) -> Result<CodeModule, GenerateError> {
    let value = bric::parse_with(schema_text, ParseOptions::strict())?;
    let schema = decode_schema(&value)?;
    let module = reify_module(&schema, id, options)?;
    logger.info(&format!(
        "reified `{}` into {} declaration(s)",
        id,
        module.types.len()
    ));
    emit(&module, target, sink)?;
    logger.info(&format!("emitted module `{}`", module.name));
    Ok(module)
}

/// Like [`generate`], reading the schema text through a `Source`.
#[allow(clippy::too_many_arguments)]
pub fn generate_from_source(
    source: &mut dyn Source,
    name: &str,
    id: &str,
    options: &ReifyOptions,
    target: Target,
    sink: &mut dyn Sink,
    logger: &mut dyn Logger,
) -> Result<CodeModule, GenerateError> {
    let text = source.read(name)?;
    generate(&text, id, options, target, sink, logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_runs_the_pipeline() {
        let mut sink = MemorySink::new();
        let mut logger = NullLogger;
        let module = generate(
            r#"{"type": "object", "properties": {"name": {"type": "string"}}, "required": ["name"]}"#,
            "Person",
            &ReifyOptions::default(),
            Target::Rust,
            &mut sink,
            &mut logger,
        )
        .unwrap();
        assert_eq!(module.name, "person");
        assert!(module.validate().is_ok());
        let text = &sink.files["person.rs"];
        assert!(text.contains("pub struct Person {"));
        assert!(text.contains("pub name: String,"));
    }

    #[test]
    fn generate_surfaces_parse_errors() {
        let mut sink = MemorySink::new();
        let mut logger = NullLogger;
        let err = generate(
            "{not json",
            "X",
            &ReifyOptions::default(),
            Target::Rust,
            &mut sink,
            &mut logger,
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::Parse(_)));
        assert!(sink.files.is_empty());
    }
}
