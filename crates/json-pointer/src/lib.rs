//! RFC 6901 JSON Pointer utilities.
//!
//! Decode errors across the workspace carry their locus as a list of
//! unescaped path components; this crate converts between that form and
//! pointer text, including the `#`-prefixed fragment form used in
//! user-visible messages (`#` for the root, `#/a/b` below it).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("json pointer must be absolute or empty")]
    NotAbsolute,
}

/// Unescapes one pointer token (`~1` → `/`, `~0` → `~`).
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes one pointer token (`~` → `~0`, `/` → `~1`).
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse an absolute RFC 6901 pointer into unescaped path components.
///
/// - `""` → `[]`
/// - `"/"` → `[""]`
/// - `"/a~1b/~0k/0"` → `["a/b", "~k", "0"]`
pub fn parse_json_pointer(pointer: &str) -> Result<Vec<String>, JsonPointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    if !pointer.starts_with('/') {
        return Err(JsonPointerError::NotAbsolute);
    }
    Ok(pointer.split('/').skip(1).map(unescape_component).collect())
}

/// Format unescaped path components as an absolute RFC 6901 pointer.
pub fn format_json_pointer<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component.as_ref()));
    }
    out
}

/// Format path components in fragment form: `#` for the empty path,
/// `#/a/b` otherwise.
pub fn format_fragment<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::from("#");
    out.push_str(&format_json_pointer(path));
    out
}

/// Parse a fragment pointer (`#`, `#/a/b`) or a bare absolute pointer.
pub fn parse_fragment(pointer: &str) -> Result<Vec<String>, JsonPointerError> {
    parse_json_pointer(pointer.strip_prefix('#').unwrap_or(pointer))
}
