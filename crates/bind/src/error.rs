//! Decode errors with JSON-pointer paths.
//!
//! Errors are created at the failing locus and gain a path component per
//! container as they unwind, so `pointer` reads root-to-leaf by the time a
//! caller sees it.

use bric::Bric;
use bric_json_pointer::format_fragment;
use thiserror::Error;

/// What went wrong while decoding.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindErrorKind {
    #[error("Missing required property \"{key}\"")]
    MissingRequired { key: String },
    #[error("Expected {expected}, found {got}")]
    UnexpectedType {
        expected: &'static str,
        got: &'static str,
    },
    #[error("Invalid value {value}")]
    InvalidEnumValue { value: Bric },
    #[error("Too few items (expected {expected}, got {got})")]
    TooFewItems { expected: usize, got: usize },
    #[error("Too many items (expected {expected}, got {got})")]
    TooManyItems { expected: usize, got: usize },
    #[error("Additional property \"{key}\" forbidden")]
    AdditionalPropertyForbidden { key: String },
    #[error("Value matches the negated schema")]
    NotSchemaMatched,
    #[error("No alternative matched")]
    NoAlternativeMatched { causes: Vec<BindError> },
    #[error("Multiple alternatives matched ({})", fmt_indices(.matched))]
    ExactlyOneViolated { matched: Vec<usize> },
}

fn fmt_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A decode failure: the problem, where it happened, and the type that was
/// being decoded there.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} at {} of type {type_name}", format_fragment(.pointer))]
pub struct BindError {
    pub kind: BindErrorKind,
    pub pointer: Vec<String>,
    pub type_name: String,
}

impl BindError {
    pub fn new(kind: BindErrorKind, type_name: impl Into<String>) -> Self {
        Self {
            kind,
            pointer: Vec::new(),
            type_name: type_name.into(),
        }
    }

    /// Prefix a path component while unwinding out of a container.
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.pointer.insert(0, segment.into());
        self
    }

    /// Prefix an array index while unwinding.
    pub fn at_index(self, index: usize) -> Self {
        self.at(index.to_string())
    }

    /// The pointer in fragment form: `#` at the root, `#/a/b` below it.
    pub fn pointer_text(&self) -> String {
        format_fragment(&self.pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_at_root() {
        let err = BindError::new(
            BindErrorKind::InvalidEnumValue {
                value: Bric::Str("BAD".into()),
            },
            "Prop",
        );
        assert_eq!(err.to_string(), "Invalid value \"BAD\" at # of type Prop");
    }

    #[test]
    fn display_with_pointer() {
        let err = BindError::new(
            BindErrorKind::MissingRequired {
                key: "nested2".into(),
            },
            "Nested1",
        )
        .at("nested1");
        assert_eq!(
            err.to_string(),
            "Missing required property \"nested2\" at #/nested1 of type Nested1"
        );
    }

    #[test]
    fn at_prefixes_root_to_leaf() {
        let err = BindError::new(BindErrorKind::NotSchemaMatched, "T")
            .at_index(3)
            .at("inner")
            .at("outer");
        assert_eq!(err.pointer, vec!["outer", "inner", "3"]);
        assert_eq!(err.pointer_text(), "#/outer/inner/3");
    }

    #[test]
    fn pointer_components_are_escaped() {
        let err = BindError::new(BindErrorKind::NotSchemaMatched, "T").at("a/b");
        assert_eq!(err.pointer_text(), "#/a~1b");
    }

    #[test]
    fn exactly_one_violated_lists_indices() {
        let err = BindError::new(
            BindErrorKind::ExactlyOneViolated { matched: vec![0, 2] },
            "Choice",
        );
        assert_eq!(
            err.to_string(),
            "Multiple alternatives matched (0, 2) at # of type Choice"
        );
    }
}
