//! Fatal reification errors.

use bric_json_pointer::format_fragment;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReifyErrorKind {
    #[error("ambiguous allOf")]
    AmbiguousAllOf,
    #[error("mixed enum kinds")]
    MixedEnumKinds,
    #[error("unresolved reference")]
    UnresolvedRef,
    #[error("empty composition")]
    EmptyComposition,
    #[error("unsupported keyword")]
    UnsupportedKeyword,
}

/// A reification failure, fatal for the whole invocation. `path` points
/// through the input schema document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at {}: {message}", format_fragment(.path))]
pub struct ReifyError {
    pub path: Vec<String>,
    pub kind: ReifyErrorKind,
    pub message: String,
}

impl ReifyError {
    pub fn new(kind: ReifyErrorKind, path: &[String], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            kind,
            message: message.into(),
        }
    }
}
