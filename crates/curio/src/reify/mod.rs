//! The reifier: translate schema subtrees into code declarations.
//!
//! Kind selection follows a fixed decision table, first match wins:
//! `$ref`, enumeration (`enum`/`const`), `oneOf`, `anyOf`, `allOf`, `not`,
//! object shape, array shape, primitive `type`, no type information.
//! Reification is fatal on the first error; a `CodeModule` is complete or
//! absent.

mod error;
mod names;
mod options;

pub use error::{ReifyError, ReifyErrorKind};
pub use names::{default_keywords, sanitize_field, sanitize_type, NameScope, RUST_KEYWORDS};
pub use options::{Accessor, Renamer, ReifyOptions};

use std::collections::{BTreeMap, BTreeSet};

use bric::Bric;
use indexmap::IndexMap;

use crate::code::{CodeDecl, CodeModule, CodeType, Field, Prim, RestField, SumCase};
use crate::schema::{AdditionalProperties, Items, Schema, SimpleType, TypeSpec};

use names::snake;

/// Reify a single schema into one declaration.
///
/// `parents` is the stack of enclosing declaration names; `id` is the
/// suggested name (a root id of `"#"` falls back to `Schema` unless the
/// renamer says otherwise). Auxiliary module-level declarations (for
/// array element types) are only produced by [`reify_module`].
pub fn reify(
    schema: &Schema,
    id: &str,
    parents: &[String],
    options: &ReifyOptions,
) -> Result<CodeDecl, ReifyError> {
    let reifier = Reifier::new(schema, id, parents, options);
    let mut scope = NameScope::new();
    let mut aux = Vec::new();
    let mut path = Vec::new();
    let name = reifier.effective_type_name(parents, id);
    let name = scope.claim(&name);
    reifier.reify_decl_named(schema, name, parents, &mut scope, &mut aux, &mut path)
}

/// Reify a whole document: the root schema first, then every
/// `definitions` entry, then break recursion with `Indirect` wrappers.
pub fn reify_module(
    schema: &Schema,
    id: &str,
    options: &ReifyOptions,
) -> Result<CodeModule, ReifyError> {
    let mut scope = NameScope::new();
    let mut reifier = Reifier::new(schema, id, &[], options);
    let root_name = scope.claim(&reifier.root_name.clone());
    reifier.root_name = root_name.clone();
    if let Some(defs) = &schema.definitions {
        for key in defs.keys() {
            let base = reifier.effective_type_name(&[], key);
            let name = scope.claim(&base);
            reifier.definitions.insert(key.clone(), name);
        }
    }

    let mut types = Vec::new();
    let mut path = Vec::new();
    let mut aux = Vec::new();
    let root = reifier.reify_decl_named(schema, root_name.clone(), &[], &mut scope, &mut aux, &mut path)?;
    types.push(root);
    types.append(&mut aux);

    if let Some(defs) = &schema.definitions {
        for (key, def_schema) in defs {
            let name = reifier.definitions[key].clone();
            let mut path = vec!["definitions".to_string(), key.clone()];
            let mut aux = Vec::new();
            let decl =
                reifier.reify_decl_named(def_schema, name, &[], &mut scope, &mut aux, &mut path)?;
            types.push(decl);
            types.append(&mut aux);
        }
    }

    apply_indirection(&mut types, options.indirect_count_threshold);

    let mut imports = BTreeSet::new();
    imports.insert("bric".to_string());
    imports.insert("bric_bind".to_string());
    if needs_indexmap(&types) {
        imports.insert("indexmap".to_string());
    }

    let module = CodeModule {
        name: snake(&root_name),
        types,
        imports,
    };
    Ok(module)
}

// ── Kind selection ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Ref,
    Enumeration,
    OneOf,
    AnyOf,
    AllOf,
    Not,
    Object,
    Array,
    Primitive(SimpleType),
    Nullable(SimpleType),
    TypeUnion,
    Any,
}

fn shape(schema: &Schema) -> Shape {
    if schema.ref_.is_some() {
        return Shape::Ref;
    }
    if schema.enum_.is_some() || schema.const_.is_some() {
        return Shape::Enumeration;
    }
    if schema.one_of.is_some() {
        return Shape::OneOf;
    }
    if schema.any_of.is_some() {
        return Shape::AnyOf;
    }
    if schema.all_of.is_some() {
        return Shape::AllOf;
    }
    if schema.not.is_some() {
        return Shape::Not;
    }
    if schema.is_object_shaped() {
        return Shape::Object;
    }
    if matches!(schema.type_, Some(TypeSpec::One(SimpleType::Array))) || schema.items.is_some() {
        return Shape::Array;
    }
    match &schema.type_ {
        Some(TypeSpec::One(t)) => Shape::Primitive(*t),
        Some(TypeSpec::Many(ts)) => match ts.as_slice() {
            [] => Shape::Any,
            [t] => Shape::Primitive(*t),
            pair => match nullable_pair(pair) {
                Some(t) => Shape::Nullable(t),
                None => Shape::TypeUnion,
            },
        },
        None => Shape::Any,
    }
}

fn nullable_pair(types: &[SimpleType]) -> Option<SimpleType> {
    match types {
        [SimpleType::Null, other] if *other != SimpleType::Null => Some(*other),
        [other, SimpleType::Null] if *other != SimpleType::Null => Some(*other),
        _ => None,
    }
}

fn is_alias_shape(shape: Shape) -> bool {
    matches!(
        shape,
        Shape::Ref | Shape::Array | Shape::Primitive(_) | Shape::Nullable(_) | Shape::Any
    )
}

/// The code type a bare simple type maps to.
fn prim_type(t: SimpleType) -> CodeType {
    match t {
        SimpleType::Null => CodeType::Primitive(Prim::Null),
        SimpleType::Boolean => CodeType::Primitive(Prim::Bool),
        SimpleType::Integer => CodeType::Primitive(Prim::Int),
        SimpleType::Number => CodeType::Primitive(Prim::Double),
        SimpleType::String => CodeType::Primitive(Prim::Str),
        SimpleType::Array => CodeType::array(CodeType::Primitive(Prim::Bric)),
        SimpleType::Object => CodeType::map(CodeType::Primitive(Prim::Bric)),
    }
}

/// Only defaults the emitter can spell as a literal survive: primitive
/// field types with a matching literal kind. Anything else decays to an
/// ordinary optional field.
fn default_supported(type_: &CodeType, value: &Bric) -> bool {
    matches!(
        (type_, value),
        (CodeType::Primitive(Prim::Bool), Bric::Bool(_))
            | (CodeType::Primitive(Prim::Double), Bric::Num(_))
            | (CodeType::Primitive(Prim::Str), Bric::Str(_))
    ) || matches!((type_, value), (CodeType::Primitive(Prim::Int), Bric::Num(n)) if n.trunc() == *n)
}

fn doc_of(schema: &Schema) -> Option<String> {
    match (schema.title.as_deref(), schema.description.as_deref()) {
        (None, None) => None,
        (Some(t), None) => Some(t.to_string()),
        (None, Some(d)) => Some(d.to_string()),
        (Some(t), Some(d)) => Some(format!("{t}\n\n{d}")),
    }
}

// ── The reifier ──────────────────────────────────────────────────────────

struct Reifier<'a> {
    options: &'a ReifyOptions,
    root_name: String,
    /// Original definition key → claimed type name.
    definitions: IndexMap<String, String>,
}

impl<'a> Reifier<'a> {
    fn new(schema: &Schema, id: &str, parents: &[String], options: &'a ReifyOptions) -> Self {
        let mut reifier = Reifier {
            options,
            root_name: String::new(),
            definitions: IndexMap::new(),
        };
        reifier.root_name = match parents.first() {
            Some(outermost) => outermost.clone(),
            None => reifier.effective_type_name(&[], id),
        };
        if let Some(defs) = &schema.definitions {
            for key in defs.keys() {
                let name = reifier.effective_type_name(&[], key);
                reifier.definitions.insert(key.clone(), name);
            }
        }
        reifier
    }

    fn keywords(&self) -> &BTreeSet<String> {
        &self.options.keywords_to_avoid
    }

    fn effective_type_name(&self, parents: &[String], raw: &str) -> String {
        if let Some(name) = self.options.rename(parents, raw) {
            return name;
        }
        if raw == "#" {
            return "Schema".to_string();
        }
        sanitize_type(raw, self.keywords())
    }

    fn conformances(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        set.insert("ToBric".to_string());
        set.insert("FromBric".to_string());
        if self.options.generate_equals {
            set.insert("PartialEq".to_string());
        }
        set
    }

    fn access_at(&self, parents: &[String], name: &str) -> crate::code::Access {
        let mut path = parents.to_vec();
        path.push(name.to_string());
        self.options.access_for(&path)
    }

    // ── References ───────────────────────────────────────────────────

    fn resolve_ref(&self, reference: &str, path: &[String]) -> Result<CodeType, ReifyError> {
        if reference == "#" {
            return Ok(CodeType::Named(vec![self.root_name.clone()]));
        }
        if let Some(rest) = reference.strip_prefix("#/definitions/") {
            if !rest.contains('/') {
                let key = bric_json_pointer::unescape_component(rest);
                if let Some(name) = self.definitions.get(&key) {
                    return Ok(CodeType::Named(vec![name.clone()]));
                }
                return Err(ReifyError::new(
                    ReifyErrorKind::UnresolvedRef,
                    path,
                    format!("no definition named `{key}`"),
                ));
            }
        }
        Err(ReifyError::new(
            ReifyErrorKind::UnresolvedRef,
            path,
            format!("unsupported reference `{reference}`"),
        ))
    }

    // ── Types at field/case/item positions ───────────────────────────

    /// Produce the type for a schema in a member position. Alias-shaped
    /// schemas inline to a bare type; anything else becomes a declaration
    /// pushed into `siblings` and referenced by qualified name.
    fn reify_type(
        &self,
        schema: &Schema,
        id: &str,
        parents: &[String],
        scope: &mut NameScope,
        siblings: &mut Vec<CodeDecl>,
        path: &mut Vec<String>,
    ) -> Result<CodeType, ReifyError> {
        match shape(schema) {
            Shape::Ref => {
                let reference = schema.ref_.clone().unwrap_or_default();
                self.resolve_ref(&reference, path)
            }
            Shape::Any => Ok(CodeType::Primitive(Prim::Bric)),
            Shape::Primitive(t) => Ok(prim_type(t)),
            Shape::Nullable(t) => Ok(CodeType::optional(prim_type(t))),
            Shape::Array => self.array_type(schema, id, parents, scope, siblings, path),
            _ => {
                let decl = self.reify_named(schema, id, parents, scope, path)?;
                let mut qualified = parents.to_vec();
                qualified.push(decl.name().to_string());
                siblings.push(decl);
                Ok(CodeType::Named(qualified))
            }
        }
    }

    /// `items` handling shared by alias and member positions.
    fn array_type(
        &self,
        schema: &Schema,
        base: &str,
        parents: &[String],
        scope: &mut NameScope,
        siblings: &mut Vec<CodeDecl>,
        path: &mut Vec<String>,
    ) -> Result<CodeType, ReifyError> {
        match &schema.items {
            None => Ok(CodeType::array(CodeType::Primitive(Prim::Bric))),
            Some(Items::Single(item)) => {
                path.push("items".to_string());
                let elem =
                    self.reify_type(item, &format!("{base} item"), parents, scope, siblings, path)?;
                path.pop();
                let fixed = match (schema.min_items, schema.max_items) {
                    (Some(min), Some(max)) if min == max => Some(min as usize),
                    _ => None,
                };
                // fixed lengths beyond tuple-friendly sizes stay arrays
                match fixed {
                    Some(n) if n >= 1 && n <= 8 => Ok(CodeType::Tuple(vec![elem; n])),
                    _ => Ok(CodeType::array(elem)),
                }
            }
            Some(Items::Tuple(items)) => {
                path.push("items".to_string());
                let mut elems = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    path.push(i.to_string());
                    let elem = self.reify_type(
                        item,
                        &format!("{base} item {}", i + 1),
                        parents,
                        scope,
                        siblings,
                        path,
                    )?;
                    path.pop();
                    elems.push(elem);
                }
                path.pop();
                Ok(CodeType::Tuple(elems))
            }
        }
    }

    // ── Declarations ─────────────────────────────────────────────────

    /// Build the declaration for a schema whose name is already claimed.
    fn reify_decl_named(
        &self,
        schema: &Schema,
        name: String,
        parents: &[String],
        scope: &mut NameScope,
        siblings: &mut Vec<CodeDecl>,
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        let sh = shape(schema);
        if is_alias_shape(sh) {
            let target = match sh {
                Shape::Ref => {
                    let reference = schema.ref_.clone().unwrap_or_default();
                    self.resolve_ref(&reference, path)?
                }
                Shape::Any => CodeType::Primitive(Prim::Bric),
                Shape::Primitive(t) => prim_type(t),
                Shape::Nullable(t) => CodeType::optional(prim_type(t)),
                Shape::Array => self.array_type(schema, &name, parents, scope, siblings, path)?,
                _ => unreachable!("alias shapes are exhaustive"),
            };
            return Ok(CodeDecl::Alias {
                access: self.access_at(parents, &name),
                doc: doc_of(schema),
                name,
                target,
            });
        }
        self.finish_named(schema, sh, name, parents, path)
    }

    /// Claim a name in `scope` and build a non-alias declaration.
    fn reify_named(
        &self,
        schema: &Schema,
        id: &str,
        parents: &[String],
        scope: &mut NameScope,
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        let base = self.effective_type_name(parents, id);
        let name = scope.claim(&base);
        self.finish_named(schema, shape(schema), name, parents, path)
    }

    fn finish_named(
        &self,
        schema: &Schema,
        sh: Shape,
        name: String,
        parents: &[String],
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        match sh {
            Shape::Enumeration => self.reify_enum(schema, name, parents, path),
            Shape::OneOf => {
                let branches = schema.one_of.as_deref().unwrap_or_default();
                self.reify_sum(schema, branches, true, "oneOf", name, parents, path)
            }
            Shape::AnyOf => {
                let branches = schema.any_of.as_deref().unwrap_or_default();
                self.reify_sum(schema, branches, false, "anyOf", name, parents, path)
            }
            Shape::AllOf => self.reify_all_of(schema, name, parents, path),
            Shape::Not => self.reify_not(schema, name, parents, path),
            Shape::Object => self.reify_struct(schema, name, parents, path),
            Shape::TypeUnion => self.reify_type_union(schema, name, parents, path),
            _ => unreachable!("alias shapes handled by reify_decl_named"),
        }
    }

    fn reify_enum(
        &self,
        schema: &Schema,
        name: String,
        parents: &[String],
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        let literals: Vec<Bric> = match (&schema.enum_, &schema.const_) {
            (Some(list), _) => list.clone(),
            (None, Some(value)) => vec![value.clone()],
            (None, None) => Vec::new(),
        };
        if literals.is_empty() {
            return Err(ReifyError::new(
                ReifyErrorKind::EmptyComposition,
                path,
                "enum has no literals",
            ));
        }
        let raw = match &literals[0] {
            Bric::Str(_) => Prim::Str,
            Bric::Num(_) => Prim::Double,
            Bric::Bool(_) => Prim::Bool,
            Bric::Null => Prim::Null,
            other => {
                return Err(ReifyError::new(
                    ReifyErrorKind::MixedEnumKinds,
                    path,
                    format!("enum literal of kind {} is not primitive", other.kind()),
                ))
            }
        };
        let mut scope = NameScope::new();
        let mut cases = Vec::with_capacity(literals.len());
        for (i, literal) in literals.iter().enumerate() {
            let agrees = matches!(
                (raw, literal),
                (Prim::Str, Bric::Str(_))
                    | (Prim::Double, Bric::Num(_))
                    | (Prim::Bool, Bric::Bool(_))
                    | (Prim::Null, Bric::Null)
            );
            if !agrees {
                return Err(ReifyError::new(
                    ReifyErrorKind::MixedEnumKinds,
                    path,
                    format!(
                        "enum mixes {} and {} literals",
                        literals[0].kind(),
                        literal.kind()
                    ),
                ));
            }
            let base = match literal {
                Bric::Str(s) => {
                    let converted = sanitize_type(s, self.keywords());
                    if converted == "_" {
                        format!("Case{i}")
                    } else {
                        converted
                    }
                }
                Bric::Bool(true) => "True".to_string(),
                Bric::Bool(false) => "False".to_string(),
                Bric::Null => "Null".to_string(),
                _ => format!("Case{i}"),
            };
            cases.push((scope.claim(&base), literal.clone()));
        }
        Ok(CodeDecl::Enum {
            access: self.access_at(parents, &name),
            doc: doc_of(schema),
            name,
            raw,
            cases,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn reify_sum(
        &self,
        schema: &Schema,
        branches: &[Schema],
        exclusive: bool,
        keyword: &str,
        name: String,
        parents: &[String],
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        if branches.is_empty() {
            return Err(ReifyError::new(
                ReifyErrorKind::EmptyComposition,
                path,
                format!("{keyword} has no alternatives"),
            ));
        }
        let mut child_parents = parents.to_vec();
        child_parents.push(name.clone());
        let mut case_scope = NameScope::new();
        let mut nested_scope = NameScope::new();
        let mut nested = Vec::new();
        let mut cases = Vec::with_capacity(branches.len());
        for (i, branch) in branches.iter().enumerate() {
            path.push(keyword.to_string());
            path.push(i.to_string());
            let raw_case = branch
                .title
                .clone()
                .unwrap_or_else(|| format!("Choice{}", i + 1));
            let case_name = case_scope.claim(&sanitize_type(&raw_case, self.keywords()));
            let payload = if matches!(shape(branch), Shape::Primitive(SimpleType::Null)) {
                None
            } else {
                Some(self.reify_type(
                    branch,
                    &raw_case,
                    &child_parents,
                    &mut nested_scope,
                    &mut nested,
                    path,
                )?)
            };
            path.pop();
            path.pop();
            cases.push(SumCase {
                name: case_name,
                payload,
            });
        }
        Ok(CodeDecl::Sum {
            access: self.access_at(parents, &name),
            doc: doc_of(schema),
            name,
            cases,
            exclusive,
            nested,
            conformances: self.conformances(),
        })
    }

    fn reify_type_union(
        &self,
        schema: &Schema,
        name: String,
        parents: &[String],
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        let types = match &schema.type_ {
            Some(TypeSpec::Many(ts)) => ts.clone(),
            _ => Vec::new(),
        };
        let mut scope = NameScope::new();
        let cases = types
            .iter()
            .map(|t| SumCase {
                name: scope.claim(&sanitize_type(t.as_str(), self.keywords())),
                payload: match t {
                    SimpleType::Null => None,
                    other => Some(prim_type(*other)),
                },
            })
            .collect();
        let _ = path;
        Ok(CodeDecl::Sum {
            access: self.access_at(parents, &name),
            doc: doc_of(schema),
            name,
            cases,
            exclusive: false,
            nested: Vec::new(),
            conformances: self.conformances(),
        })
    }

    fn reify_all_of(
        &self,
        schema: &Schema,
        name: String,
        parents: &[String],
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        let branches = schema.all_of.as_deref().unwrap_or_default();
        if branches.is_empty() {
            return Err(ReifyError::new(
                ReifyErrorKind::EmptyComposition,
                path,
                "allOf has no branches",
            ));
        }
        let mut child_parents = parents.to_vec();
        child_parents.push(name.clone());
        let mut field_scope = NameScope::new();
        let mut nested_scope = NameScope::new();
        let mut nested = Vec::new();
        let mut fields = Vec::new();
        let mut seen = IndexMap::new();
        for (i, branch) in branches.iter().enumerate() {
            path.push("allOf".to_string());
            path.push(i.to_string());
            if !branch.is_object_shaped() {
                return Err(ReifyError::new(
                    ReifyErrorKind::UnsupportedKeyword,
                    path,
                    format!("allOf branch {i} is not an object schema"),
                ));
            }
            self.collect_fields(
                branch,
                &child_parents,
                &mut field_scope,
                &mut nested_scope,
                &mut nested,
                &mut fields,
                &mut seen,
                path,
            )?;
            path.pop();
            path.pop();
        }
        let (rest, deny_additional) = self.open_properties(
            schema,
            &child_parents,
            &mut nested_scope,
            &mut nested,
            path,
        )?;
        Ok(CodeDecl::Struct {
            access: self.access_at(parents, &name),
            doc: doc_of(schema),
            name,
            fields,
            rest,
            deny_additional,
            transparent: false,
            negative: None,
            nested,
            conformances: self.conformances(),
        })
    }

    fn reify_not(
        &self,
        schema: &Schema,
        name: String,
        parents: &[String],
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        let Some(negative_schema) = schema.not.as_deref() else {
            return Err(ReifyError::new(
                ReifyErrorKind::UnsupportedKeyword,
                path,
                "not without a schema",
            ));
        };
        let mut positive = schema.clone();
        positive.not = None;
        let mut child_parents = parents.to_vec();
        child_parents.push(name.clone());
        let mut field_scope = NameScope::new();
        let mut nested_scope = NameScope::new();
        let mut nested = Vec::new();
        let mut fields = Vec::new();
        let mut transparent = false;
        let mut rest = None;
        let mut deny_additional = false;
        if positive.is_object_shaped() {
            let mut seen = IndexMap::new();
            self.collect_fields(
                &positive,
                &child_parents,
                &mut field_scope,
                &mut nested_scope,
                &mut nested,
                &mut fields,
                &mut seen,
                path,
            )?;
            let open = self.open_properties(
                &positive,
                &child_parents,
                &mut nested_scope,
                &mut nested,
                path,
            )?;
            rest = open.0;
            deny_additional = open.1;
        } else {
            // non-object positive: a transparent wrapper over the value
            transparent = true;
            let value_type = self.reify_type(
                &positive,
                "Value",
                &child_parents,
                &mut nested_scope,
                &mut nested,
                path,
            )?;
            fields.push(Field {
                name: field_scope.claim("value"),
                json_name: String::new(),
                type_: value_type,
                required: true,
                default: None,
                doc: None,
            });
        }
        path.push("not".to_string());
        let negative_name = nested_scope.claim("Not");
        let mut negative_aux = Vec::new();
        let negative_decl = self.reify_decl_named(
            negative_schema,
            negative_name.clone(),
            &child_parents,
            &mut nested_scope,
            &mut negative_aux,
            path,
        )?;
        path.pop();
        nested.push(negative_decl);
        nested.append(&mut negative_aux);
        Ok(CodeDecl::Struct {
            access: self.access_at(parents, &name),
            doc: doc_of(schema),
            name,
            fields,
            rest,
            deny_additional,
            transparent,
            negative: Some(negative_name),
            nested,
            conformances: self.conformances(),
        })
    }

    fn reify_struct(
        &self,
        schema: &Schema,
        name: String,
        parents: &[String],
        path: &mut Vec<String>,
    ) -> Result<CodeDecl, ReifyError> {
        let mut child_parents = parents.to_vec();
        child_parents.push(name.clone());
        let mut field_scope = NameScope::new();
        let mut nested_scope = NameScope::new();
        let mut nested = Vec::new();
        let mut fields = Vec::new();
        let mut seen = IndexMap::new();
        self.collect_fields(
            schema,
            &child_parents,
            &mut field_scope,
            &mut nested_scope,
            &mut nested,
            &mut fields,
            &mut seen,
            path,
        )?;
        let (rest, deny_additional) = self.open_properties(
            schema,
            &child_parents,
            &mut nested_scope,
            &mut nested,
            path,
        )?;
        Ok(CodeDecl::Struct {
            access: self.access_at(parents, &name),
            doc: doc_of(schema),
            name,
            fields,
            rest,
            deny_additional,
            transparent: false,
            negative: None,
            nested,
            conformances: self.conformances(),
        })
    }

    /// Turn `properties` into fields, in schema order. Duplicate property
    /// names (from `allOf` merging) pass when their contributing schemas
    /// or reified fields agree and are ambiguous otherwise.
    #[allow(clippy::too_many_arguments)]
    fn collect_fields(
        &self,
        schema: &Schema,
        parents_with_self: &[String],
        field_scope: &mut NameScope,
        nested_scope: &mut NameScope,
        nested: &mut Vec<CodeDecl>,
        fields: &mut Vec<Field>,
        seen: &mut IndexMap<String, (Schema, bool)>,
        path: &mut Vec<String>,
    ) -> Result<(), ReifyError> {
        let Some(properties) = &schema.properties else {
            return Ok(());
        };
        path.push("properties".to_string());
        for (key, prop) in properties {
            path.push(key.clone());
            let required = schema.requires(key);
            if let Some((prev_schema, prev_required)) = seen.get(key) {
                if prev_schema == prop && *prev_required == required {
                    path.pop();
                    continue;
                }
            }
            let base = self.reify_type(
                prop,
                key,
                parents_with_self,
                nested_scope,
                nested,
                path,
            )?;
            let default = prop
                .default
                .clone()
                .filter(|value| default_supported(&base, value));
            let type_ = if required || default.is_some() {
                base
            } else {
                CodeType::optional(base)
            };
            if let Some(existing) = fields.iter().find(|f| f.json_name == *key) {
                if existing.type_ == type_ && existing.required == required {
                    path.pop();
                    continue;
                }
                return Err(ReifyError::new(
                    ReifyErrorKind::AmbiguousAllOf,
                    path,
                    format!("property `{key}` is contributed twice with different types"),
                ));
            }
            seen.insert(key.clone(), (prop.clone(), required));
            fields.push(Field {
                name: field_scope.claim(&sanitize_field(key, self.keywords())),
                json_name: key.clone(),
                type_,
                required,
                default,
                doc: doc_of(prop),
            });
            path.pop();
        }
        path.pop();
        Ok(())
    }

    /// Resolve the `additionalProperties` posture of a struct.
    fn open_properties(
        &self,
        schema: &Schema,
        parents_with_self: &[String],
        nested_scope: &mut NameScope,
        nested: &mut Vec<CodeDecl>,
        path: &mut Vec<String>,
    ) -> Result<(Option<RestField>, bool), ReifyError> {
        match &schema.additional_properties {
            Some(AdditionalProperties::Allowed(false)) => Ok((None, true)),
            Some(AdditionalProperties::Allowed(true)) | None => Ok((
                Some(RestField {
                    name: "additional_properties".to_string(),
                    value: CodeType::Primitive(Prim::Bric),
                }),
                false,
            )),
            Some(AdditionalProperties::Schema(extra)) => {
                path.push("additionalProperties".to_string());
                let value = self.reify_type(
                    extra,
                    "additional properties",
                    parents_with_self,
                    nested_scope,
                    nested,
                    path,
                )?;
                path.pop();
                Ok((
                    Some(RestField {
                        name: "additional_properties".to_string(),
                        value,
                    }),
                    false,
                ))
            }
        }
    }
}

// ── Recursion breaking ───────────────────────────────────────────────────

fn qualify(parents: &[String], name: &str) -> String {
    let mut key = parents.join(".");
    if !key.is_empty() {
        key.push('.');
    }
    key.push_str(name);
    key
}

/// Collect value-sized `Named` edges out of a type. Arrays, maps and
/// existing indirections already live on the heap and stop the walk.
fn value_edges(type_: &CodeType, out: &mut Vec<String>) {
    match type_ {
        CodeType::Named(path) => out.push(path.join(".")),
        CodeType::Optional(inner) => value_edges(inner, out),
        CodeType::Tuple(items) => items.iter().for_each(|t| value_edges(t, out)),
        CodeType::Array(_) | CodeType::Map(_) | CodeType::Indirect(_) | CodeType::Primitive(_) => {}
    }
}

fn collect_graph(
    decls: &[CodeDecl],
    parents: &mut Vec<String>,
    graph: &mut BTreeMap<String, Vec<String>>,
) {
    for decl in decls {
        let key = qualify(parents, decl.name());
        let mut edges = Vec::new();
        match decl {
            CodeDecl::Struct { fields, .. } => {
                for field in fields {
                    value_edges(&field.type_, &mut edges);
                }
            }
            CodeDecl::Sum { cases, .. } => {
                for case in cases {
                    if let Some(payload) = &case.payload {
                        value_edges(payload, &mut edges);
                    }
                }
            }
            CodeDecl::Alias { target, .. } => value_edges(target, &mut edges),
            CodeDecl::Enum { .. } => {}
        }
        graph.insert(key, edges);
        parents.push(decl.name().to_string());
        collect_graph(decl.nested(), parents, graph);
        parents.pop();
    }
}

fn reaches(graph: &BTreeMap<String, Vec<String>>, from: &str, to: &str) -> bool {
    let mut seen = BTreeSet::new();
    let mut stack = vec![from.to_string()];
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if !seen.insert(node.clone()) {
            continue;
        }
        if let Some(edges) = graph.get(&node) {
            stack.extend(edges.iter().cloned());
        }
    }
    false
}

/// Wrap cycle-closing `Named` references in `Indirect`.
fn wrap_type(type_: &mut CodeType, should_wrap: &dyn Fn(&str) -> bool) {
    match type_ {
        CodeType::Named(path) => {
            if should_wrap(&path.join(".")) {
                let named = CodeType::Named(std::mem::take(path));
                *type_ = CodeType::indirect(named);
            }
        }
        CodeType::Optional(inner) => wrap_type(inner, should_wrap),
        CodeType::Tuple(items) => items.iter_mut().for_each(|t| wrap_type(t, should_wrap)),
        _ => {}
    }
}

fn apply_indirection(types: &mut [CodeDecl], threshold: usize) {
    let mut graph = BTreeMap::new();
    collect_graph(types, &mut Vec::new(), &mut graph);
    let mut parents = Vec::new();
    rewrite_decls(types, &mut parents, &graph, threshold);
}

fn rewrite_decls(
    decls: &mut [CodeDecl],
    parents: &mut Vec<String>,
    graph: &BTreeMap<String, Vec<String>>,
    threshold: usize,
) {
    for decl in decls {
        let key = qualify(parents, decl.name());
        match decl {
            CodeDecl::Struct { fields, .. } => {
                let oversized = fields.len() > threshold;
                for field in fields.iter_mut() {
                    wrap_type(&mut field.type_, &|target| {
                        oversized || reaches(graph, target, &key)
                    });
                }
            }
            CodeDecl::Sum { cases, .. } => {
                for case in cases.iter_mut() {
                    if let Some(payload) = &mut case.payload {
                        wrap_type(payload, &|target| reaches(graph, target, &key));
                    }
                }
            }
            CodeDecl::Alias { target, .. } => {
                wrap_type(target, &|t| reaches(graph, t, &key));
            }
            CodeDecl::Enum { .. } => {}
        }
        let name = decl.name().to_string();
        parents.push(name);
        match decl {
            CodeDecl::Struct { nested, .. } | CodeDecl::Sum { nested, .. } => {
                rewrite_decls(nested, parents, graph, threshold);
            }
            _ => {}
        }
        parents.pop();
    }
}

fn needs_indexmap(decls: &[CodeDecl]) -> bool {
    fn type_has_map(type_: &CodeType) -> bool {
        match type_ {
            CodeType::Map(_) => true,
            CodeType::Array(inner) | CodeType::Optional(inner) | CodeType::Indirect(inner) => {
                type_has_map(inner)
            }
            CodeType::Tuple(items) => items.iter().any(type_has_map),
            _ => false,
        }
    }
    decls.iter().any(|decl| match decl {
        CodeDecl::Struct {
            fields,
            rest,
            nested,
            transparent,
            ..
        } => {
            !transparent
                || rest.is_some()
                || fields.iter().any(|f| type_has_map(&f.type_))
                || needs_indexmap(nested)
        }
        CodeDecl::Sum { cases, nested, .. } => {
            cases
                .iter()
                .any(|c| c.payload.as_ref().is_some_and(type_has_map))
                || needs_indexmap(nested)
        }
        CodeDecl::Alias { target, .. } => type_has_map(target),
        CodeDecl::Enum { .. } => false,
    })
}
