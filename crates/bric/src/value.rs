//! `Bric` — the generic JSON value tree.
//!
//! A tagged sum over the six JSON kinds. Object keys preserve insertion
//! order, which keeps everything downstream of the parser deterministic.

use indexmap::IndexMap;

/// A generic JSON value.
#[derive(Debug, Clone)]
pub enum Bric {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Arr(Vec<Bric>),
    Obj(IndexMap<String, Bric>),
}

impl Bric {
    /// Returns the JSON kind name of this value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Num(_) => "number",
            Self::Str(_) => "string",
            Self::Arr(_) => "array",
            Self::Obj(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_arr(&self) -> Option<&[Bric]> {
        match self {
            Self::Arr(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_obj(&self) -> Option<&IndexMap<String, Bric>> {
        match self {
            Self::Obj(map) => Some(map),
            _ => None,
        }
    }

    /// Member lookup on objects; `None` for any other kind.
    pub fn get(&self, key: &str) -> Option<&Bric> {
        match self {
            Self::Obj(map) => map.get(key),
            _ => None,
        }
    }

    /// Element lookup on arrays; `None` for any other kind.
    pub fn at(&self, index: usize) -> Option<&Bric> {
        match self {
            Self::Arr(items) => items.get(index),
            _ => None,
        }
    }

    /// Shorthand for an empty object.
    pub fn obj() -> Bric {
        Bric::Obj(IndexMap::new())
    }

    /// Shorthand for an empty array.
    pub fn arr() -> Bric {
        Bric::Arr(Vec::new())
    }
}

/// Structural equality. Objects compare order-insensitively, arrays in
/// order. Numbers compare bitwise on the f64 representation except that
/// `-0.0 == 0.0`, so identical NaN payloads compare equal.
impl PartialEq for Bric {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Num(a), Self::Num(b)) => {
                a.to_bits() == b.to_bits() || (*a == 0.0 && *b == 0.0)
            }
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Arr(a), Self::Arr(b)) => a == b,
            (Self::Obj(a), Self::Obj(b)) => a == b,
            _ => false,
        }
    }
}

impl Default for Bric {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Bric {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Bric {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<i64> for Bric {
    fn from(n: i64) -> Self {
        Self::Num(n as f64)
    }
}

impl From<i32> for Bric {
    fn from(n: i32) -> Self {
        Self::Num(n as f64)
    }
}

impl From<u64> for Bric {
    fn from(n: u64) -> Self {
        Self::Num(n as f64)
    }
}

impl From<&str> for Bric {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Bric {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Bric>> for Bric {
    fn from(items: Vec<Bric>) -> Self {
        Self::Arr(items)
    }
}

impl From<IndexMap<String, Bric>> for Bric {
    fn from(map: IndexMap<String, Bric>) -> Self {
        Self::Obj(map)
    }
}

impl std::fmt::Display for Bric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::encode::encode(self))
    }
}
