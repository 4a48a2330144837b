//! The language-neutral code model.
//!
//! Pure data: the reifier builds it, the emitter renders it. The only
//! behavior here is the naming invariant check.

use std::collections::BTreeSet;

use bric::Bric;

/// Access level of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Public,
    Crate,
    Private,
}

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prim {
    Bool,
    Int,
    Double,
    Str,
    Null,
    Bric,
}

/// A reference to a type.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeType {
    Primitive(Prim),
    /// A declared type by qualified name (enclosing declarations first).
    Named(Vec<String>),
    Array(Box<CodeType>),
    Optional(Box<CodeType>),
    Tuple(Vec<CodeType>),
    /// A single-field heap wrapper breaking value-size recursion.
    Indirect(Box<CodeType>),
    /// A string-keyed open mapping.
    Map(Box<CodeType>),
}

impl CodeType {
    pub fn optional(inner: CodeType) -> CodeType {
        CodeType::Optional(Box::new(inner))
    }

    pub fn array(inner: CodeType) -> CodeType {
        CodeType::Array(Box::new(inner))
    }

    pub fn indirect(inner: CodeType) -> CodeType {
        CodeType::Indirect(Box::new(inner))
    }

    pub fn map(inner: CodeType) -> CodeType {
        CodeType::Map(Box::new(inner))
    }

    pub fn named(path: &[&str]) -> CodeType {
        CodeType::Named(path.iter().map(|s| s.to_string()).collect())
    }
}

/// A struct member.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Target-language identifier.
    pub name: String,
    /// The original property key; round-tripping is keyed on this.
    pub json_name: String,
    pub type_: CodeType,
    pub required: bool,
    pub default: Option<Bric>,
    pub doc: Option<String>,
}

/// The open-property capture of a struct: everything outside the declared
/// members lands in a string-keyed map. Excluded from strictness checks.
#[derive(Debug, Clone, PartialEq)]
pub struct RestField {
    pub name: String,
    pub value: CodeType,
}

/// One alternative of a sum.
#[derive(Debug, Clone, PartialEq)]
pub struct SumCase {
    pub name: String,
    /// `None` marks a payload-free case that binds JSON null.
    pub payload: Option<CodeType>,
}

/// A declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeDecl {
    Struct {
        name: String,
        doc: Option<String>,
        access: Access,
        fields: Vec<Field>,
        rest: Option<RestField>,
        /// Reject members outside the declared set while decoding.
        deny_additional: bool,
        /// A single-field wrapper bound to the whole value rather than to
        /// an object member (carries `not` assertions over non-objects).
        transparent: bool,
        /// Name of a nested declaration that must NOT decode.
        negative: Option<String>,
        nested: Vec<CodeDecl>,
        conformances: BTreeSet<String>,
    },
    Sum {
        name: String,
        doc: Option<String>,
        access: Access,
        cases: Vec<SumCase>,
        /// `true` requires exactly one alternative to decode; `false`
        /// takes the first that does.
        exclusive: bool,
        nested: Vec<CodeDecl>,
        conformances: BTreeSet<String>,
    },
    Alias {
        name: String,
        doc: Option<String>,
        access: Access,
        target: CodeType,
    },
    Enum {
        name: String,
        doc: Option<String>,
        access: Access,
        raw: Prim,
        cases: Vec<(String, Bric)>,
    },
}

impl CodeDecl {
    pub fn name(&self) -> &str {
        match self {
            Self::Struct { name, .. }
            | Self::Sum { name, .. }
            | Self::Alias { name, .. }
            | Self::Enum { name, .. } => name,
        }
    }

    pub fn nested(&self) -> &[CodeDecl] {
        match self {
            Self::Struct { nested, .. } | Self::Sum { nested, .. } => nested,
            _ => &[],
        }
    }
}

/// An ordered collection of declarations destined for one output file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeModule {
    pub name: String,
    pub types: Vec<CodeDecl>,
    pub imports: BTreeSet<String>,
}

impl CodeModule {
    /// Check the naming invariant: top-level declaration names are unique,
    /// and so are nested names within each scope.
    pub fn validate(&self) -> Result<(), String> {
        validate_scope(&self.types)
    }
}

fn validate_scope(decls: &[CodeDecl]) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for decl in decls {
        if !seen.insert(decl.name()) {
            return Err(format!("duplicate declaration name `{}`", decl.name()));
        }
        validate_scope(decl.nested())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(name: &str) -> CodeDecl {
        CodeDecl::Alias {
            name: name.to_string(),
            doc: None,
            access: Access::Public,
            target: CodeType::Primitive(Prim::Str),
        }
    }

    #[test]
    fn validate_accepts_unique_names() {
        let module = CodeModule {
            name: "m".into(),
            types: vec![alias("A"), alias("B")],
            imports: BTreeSet::new(),
        };
        assert!(module.validate().is_ok());
    }

    #[test]
    fn validate_rejects_top_level_duplicates() {
        let module = CodeModule {
            name: "m".into(),
            types: vec![alias("A"), alias("A")],
            imports: BTreeSet::new(),
        };
        assert!(module.validate().is_err());
    }

    #[test]
    fn validate_rejects_nested_duplicates() {
        let module = CodeModule {
            name: "m".into(),
            types: vec![CodeDecl::Struct {
                name: "S".into(),
                doc: None,
                access: Access::Public,
                fields: vec![],
                rest: None,
                deny_additional: false,
                transparent: false,
                negative: None,
                nested: vec![alias("X"), alias("X")],
                conformances: BTreeSet::new(),
            }],
            imports: BTreeSet::new(),
        };
        assert!(module.validate().is_err());
    }

    #[test]
    fn named_builds_qualified_paths() {
        assert_eq!(
            CodeType::named(&["Outer", "Inner"]),
            CodeType::Named(vec!["Outer".into(), "Inner".into()])
        );
    }
}
