//! Golden-text checks for the Rust emitter.

use curio::reify::{reify_module, ReifyOptions};
use curio::{decode_schema, emit, emit_to_string, MemorySink, Schema, Target};

fn schema(text: &str) -> Schema {
    decode_schema(&bric::parse(text).unwrap()).unwrap()
}

fn render(text: &str, id: &str) -> String {
    let module = reify_module(&schema(text), id, &ReifyOptions::default()).unwrap();
    emit_to_string(&module, Target::Rust)
}

#[test]
fn person_module_golden() {
    let text = render(
        r#"{
            "title": "A person",
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"}
            },
            "required": ["name"]
        }"#,
        "Person",
    );
    let expected = r#"//! Generated by curio; do not edit.

use bric::Bric;
use bric_bind::{helpers, BindError, FromBric, ToBric};
use indexmap::IndexMap;

/// A person
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: Option<i64>,
    pub additional_properties: IndexMap<String, Bric>,
}

impl ToBric for Person {
    fn to_bric(&self) -> Bric {
        let mut obj = IndexMap::new();
        obj.insert("name".to_string(), self.name.to_bric());
        if let Some(value) = &self.age {
            obj.insert("age".to_string(), value.to_bric());
        }
        for (key, value) in &self.additional_properties {
            obj.insert(key.clone(), value.to_bric());
        }
        Bric::Obj(obj)
    }
}

impl FromBric for Person {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        let obj = helpers::as_obj(bric, "Person")?;
        Ok(Self {
            name: helpers::req(obj, "name", "Person")?,
            age: helpers::opt(obj, "age")?,
            additional_properties: helpers::collect_rest(obj, &["name", "age"])?,
        })
    }
}
"#;
    assert_eq!(text, expected);
}

#[test]
fn enum_module_golden() {
    let text = render(r#"{"type": "string", "enum": ["value"]}"#, "Prop");
    let expected = r#"//! Generated by curio; do not edit.

use bric::Bric;
use bric_bind::{BindError, BindErrorKind, FromBric, ToBric};

#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    Value,
}

impl ToBric for Prop {
    fn to_bric(&self) -> Bric {
        match self {
            Self::Value => Bric::Str("value".to_string()),
        }
    }
}

impl FromBric for Prop {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        if *bric == Bric::Str("value".to_string()) {
            return Ok(Self::Value);
        }
        Err(BindError::new(
            BindErrorKind::InvalidEnumValue { value: bric.clone() },
            "Prop",
        ))
    }
}
"#;
    assert_eq!(text, expected);
}

#[test]
fn one_of_module_emits_exactly_one_counting() {
    let text = render(
        r#"{"oneOf": [{"type": "string"}, {"type": "number"}]}"#,
        "StringOrNumber",
    );
    assert!(text.contains("pub enum StringOrNumber {"));
    assert!(text.contains("    Choice1(String),"));
    assert!(text.contains("    Choice2(f64),"));
    assert!(text.contains("match <String as FromBric>::from_bric(bric) {"));
    assert!(text.contains("match <f64 as FromBric>::from_bric(bric) {"));
    assert!(text.contains("if matched.len() > 1 {"));
    assert!(text.contains("BindErrorKind::ExactlyOneViolated { matched },"));
    assert!(text.contains("BindErrorKind::NoAlternativeMatched { causes },"));
}

#[test]
fn any_of_module_takes_first_match() {
    let text = render(
        r#"{"anyOf": [{"type": "string"}, {"type": "number"}]}"#,
        "Loose",
    );
    assert!(text.contains("Ok(v) => return Ok(Self::Choice1(v)),"));
    assert!(!text.contains("matched"));
}

#[test]
fn closed_struct_emits_deny() {
    let text = render(
        r#"{"type": "object", "properties": {"a": {"type": "string"}}, "additionalProperties": false}"#,
        "Closed",
    );
    assert!(text.contains(r#"helpers::deny_unknown(obj, &["a"], "Closed")?;"#));
    assert!(!text.contains("collect_rest"));
    assert!(!text.contains("additional_properties"));
}

#[test]
fn defaulted_field_emits_a_literal_fallback() {
    let text = render(
        r#"{"type": "object", "properties": {"count": {"type": "integer", "default": 3}}}"#,
        "Counted",
    );
    assert!(text.contains("pub count: i64,"));
    assert!(text.contains("count: match obj.get(\"count\") {"));
    assert!(text.contains("None => 3,"));
}

#[test]
fn negative_schema_emits_an_assertion() {
    let text = render(
        r#"{"type": "string", "not": {"enum": ["reserved"]}}"#,
        "Word",
    );
    assert!(text.contains("pub struct Word {"));
    assert!(text.contains("pub value: String,"));
    assert!(text.contains("if WordNot::from_bric(bric).is_ok() {"));
    assert!(text.contains("BindErrorKind::NotSchemaMatched, \"Word\""));
    assert!(text.contains("pub enum WordNot {"));
    assert!(text.contains("    Reserved,"));
}

#[test]
fn nested_declarations_flatten_with_parent_names() {
    let text = render(
        r#"{
            "type": "object",
            "properties": {
                "address": {"type": "object", "properties": {"street": {"type": "string"}}}
            }
        }"#,
        "Person",
    );
    assert!(text.contains("pub struct PersonAddress {"));
    assert!(text.contains("pub address: Option<PersonAddress>,"));
}

#[test]
fn alias_modules_emit_type_aliases() {
    let text = render(r#"{"type": "array", "items": {"type": "string"}}"#, "Names");
    assert!(text.contains("pub type Names = Vec<String>;"));
    // no impls, so no bind imports
    assert!(!text.contains("bric_bind"));
}

#[test]
fn doc_comments_flow_from_title_and_description() {
    let text = render(
        r#"{
            "title": "Widget",
            "description": "A humble widget.",
            "type": "object",
            "properties": {
                "id": {"type": "integer", "description": "Stable identity."}
            },
            "required": ["id"]
        }"#,
        "Widget",
    );
    assert!(text.contains("/// Widget\n///\n/// A humble widget.\n"));
    assert!(text.contains("    /// Stable identity.\n    pub id: i64,"));
}

#[test]
fn emission_is_deterministic_and_writes_one_file() {
    let source = r#"{
        "type": "object",
        "properties": {"kind": {"enum": ["a", "b"]}},
        "definitions": {"extra": {"type": "number"}}
    }"#;
    let module = reify_module(&schema(source), "Doc", &ReifyOptions::default()).unwrap();
    let first = emit_to_string(&module, Target::Rust);
    let second = emit_to_string(&module, Target::Rust);
    assert_eq!(first, second);

    let mut sink = MemorySink::new();
    emit(&module, Target::Rust, &mut sink).unwrap();
    assert_eq!(sink.files.len(), 1);
    assert_eq!(sink.files.keys().next().map(String::as_str), Some("doc.rs"));
    assert_eq!(sink.files["doc.rs"], first);
}
