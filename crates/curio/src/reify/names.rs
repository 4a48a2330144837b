//! The name sanitize pipeline and per-scope uniqueness.
//!
//! Raw schema names pass through: non-identifier characters become word
//! breaks, the first character is guarded, keyword collisions gain a `_`
//! suffix, and collisions within a scope gain a numeric suffix.

use std::collections::BTreeSet;

/// Reserved words of the Rust target (strict and reserved sets).
pub const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

pub fn default_keywords() -> BTreeSet<String> {
    RUST_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

/// Split a raw name into words on non-alphanumerics and case boundaries.
fn words(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut word = String::new();
    let mut prev_lower = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if prev_lower && ch.is_uppercase() && !word.is_empty() {
                out.push(std::mem::take(&mut word));
            }
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
            word.push(ch);
        } else {
            prev_lower = false;
            if !word.is_empty() {
                out.push(std::mem::take(&mut word));
            }
        }
    }
    if !word.is_empty() {
        out.push(word);
    }
    out
}

/// UpperCamelCase conversion for type and case names.
pub fn upper_camel(raw: &str) -> String {
    let mut out = String::new();
    for word in words(raw) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for c in chars {
                out.extend(c.to_lowercase());
            }
        }
    }
    out
}

/// snake_case conversion for field names.
pub fn snake(raw: &str) -> String {
    let mut out = String::new();
    for (i, word) in words(raw).iter().enumerate() {
        if i > 0 {
            out.push('_');
        }
        for c in word.chars() {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Guard a converted name: never empty, never digit-first, never a
/// keyword.
fn guard(mut name: String, keywords: &BTreeSet<String>) -> String {
    if name.is_empty() {
        name.push('_');
    }
    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if keywords.contains(&name) {
        name.push('_');
    }
    name
}

/// Sanitize a raw schema name into a type identifier.
pub fn sanitize_type(raw: &str, keywords: &BTreeSet<String>) -> String {
    guard(upper_camel(raw), keywords)
}

/// Sanitize a raw property key into a field identifier.
pub fn sanitize_field(raw: &str, keywords: &BTreeSet<String>) -> String {
    guard(snake(raw), keywords)
}

/// Enforces name uniqueness within one declaration scope.
#[derive(Debug, Default)]
pub struct NameScope {
    used: BTreeSet<String>,
}

impl NameScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, or `base2`, `base3`, ... if taken.
    pub fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
