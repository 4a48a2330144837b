//! Rendering the code model to source text.
//!
//! Output is deterministic: declarations in insertion order, fields in
//! property order, cases in schema order. Identical modules render to
//! byte-identical text.

mod rust;

use thiserror::Error;

use crate::code::CodeModule;
use crate::io::Sink;

/// The target language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Rust,
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("sink error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Render a module to source text.
pub fn emit_to_string(module: &CodeModule, target: Target) -> String {
    match target {
        Target::Rust => rust::render_module(module),
    }
}

/// Render a module and write it through the sink, one file per module.
pub fn emit(module: &CodeModule, target: Target, sink: &mut dyn Sink) -> Result<(), EmitError> {
    let text = emit_to_string(module, target);
    let file = match target {
        Target::Rust => format!("{}.rs", module.name),
    };
    sink.write(&file, &text)?;
    Ok(())
}
