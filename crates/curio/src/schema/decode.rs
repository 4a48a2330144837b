//! The bootstrap bind implementation for `Schema`.
//!
//! Everything else the generator binds is emitted code; the schema of
//! schemas is written by hand, once, against the same contracts.

use bric::Bric;
use bric_bind::{helpers, BindError, BindErrorKind, FromBric, ToBric};
use indexmap::IndexMap;

use super::model::{AdditionalProperties, Items, Schema, SimpleType, TypeSpec};

fn unexpected(expected: &'static str, got: &Bric, type_name: &str) -> BindError {
    BindError::new(
        BindErrorKind::UnexpectedType {
            expected,
            got: got.kind(),
        },
        type_name,
    )
}

impl FromBric for SimpleType {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        let word = bric
            .as_str()
            .ok_or_else(|| unexpected("string", bric, "SimpleType"))?;
        SimpleType::from_word(word).ok_or_else(|| {
            BindError::new(
                BindErrorKind::InvalidEnumValue {
                    value: bric.clone(),
                },
                "SimpleType",
            )
        })
    }
}

impl ToBric for SimpleType {
    fn to_bric(&self) -> Bric {
        Bric::Str(self.as_str().to_string())
    }
}

impl FromBric for TypeSpec {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        match bric {
            Bric::Str(_) => SimpleType::from_bric(bric).map(TypeSpec::One),
            Bric::Arr(_) => Vec::<SimpleType>::from_bric(bric).map(TypeSpec::Many),
            other => Err(unexpected("string or array", other, "TypeSpec")),
        }
    }
}

impl ToBric for TypeSpec {
    fn to_bric(&self) -> Bric {
        match self {
            TypeSpec::One(t) => t.to_bric(),
            TypeSpec::Many(ts) => ts.to_bric(),
        }
    }
}

impl FromBric for Items {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        match bric {
            Bric::Obj(_) => Schema::from_bric(bric).map(|s| Items::Single(Box::new(s))),
            Bric::Arr(_) => Vec::<Schema>::from_bric(bric).map(Items::Tuple),
            other => Err(unexpected("object or array", other, "Items")),
        }
    }
}

impl ToBric for Items {
    fn to_bric(&self) -> Bric {
        match self {
            Items::Single(s) => s.to_bric(),
            Items::Tuple(ss) => ss.to_bric(),
        }
    }
}

impl FromBric for AdditionalProperties {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        match bric {
            Bric::Bool(b) => Ok(AdditionalProperties::Allowed(*b)),
            Bric::Obj(_) => Schema::from_bric(bric)
                .map(|s| AdditionalProperties::Schema(Box::new(s))),
            other => Err(unexpected("boolean or object", other, "AdditionalProperties")),
        }
    }
}

impl ToBric for AdditionalProperties {
    fn to_bric(&self) -> Bric {
        match self {
            AdditionalProperties::Allowed(b) => Bric::Bool(*b),
            AdditionalProperties::Schema(s) => s.to_bric(),
        }
    }
}

impl FromBric for Schema {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        let obj = helpers::as_obj(bric, "Schema")?;
        let mut schema = Schema::default();
        for (key, value) in obj {
            let keyed = |e: BindError| e.at(key.clone());
            match key.as_str() {
                "id" => schema.id = Some(String::from_bric(value).map_err(keyed)?),
                "$ref" => schema.ref_ = Some(String::from_bric(value).map_err(keyed)?),
                "type" => schema.type_ = Some(TypeSpec::from_bric(value).map_err(keyed)?),
                "title" => schema.title = Some(String::from_bric(value).map_err(keyed)?),
                "description" => {
                    schema.description = Some(String::from_bric(value).map_err(keyed)?)
                }
                "default" => schema.default = Some(value.clone()),
                "const" => schema.const_ = Some(value.clone()),
                "enum" => {
                    let items = helpers::as_arr(value, "Schema").map_err(keyed)?;
                    schema.enum_ = Some(items.to_vec());
                }
                "required" => {
                    schema.required = Some(Vec::<String>::from_bric(value).map_err(keyed)?)
                }
                "properties" => {
                    schema.properties =
                        Some(IndexMap::<String, Schema>::from_bric(value).map_err(keyed)?)
                }
                "additionalProperties" => {
                    schema.additional_properties =
                        Some(AdditionalProperties::from_bric(value).map_err(keyed)?)
                }
                "items" => schema.items = Some(Items::from_bric(value).map_err(keyed)?),
                "minItems" => schema.min_items = Some(u64::from_bric(value).map_err(keyed)?),
                "maxItems" => schema.max_items = Some(u64::from_bric(value).map_err(keyed)?),
                "allOf" => schema.all_of = Some(Vec::<Schema>::from_bric(value).map_err(keyed)?),
                "anyOf" => schema.any_of = Some(Vec::<Schema>::from_bric(value).map_err(keyed)?),
                "oneOf" => schema.one_of = Some(Vec::<Schema>::from_bric(value).map_err(keyed)?),
                "not" => schema.not = Some(Box::new(Schema::from_bric(value).map_err(keyed)?)),
                "definitions" => {
                    schema.definitions =
                        Some(IndexMap::<String, Schema>::from_bric(value).map_err(keyed)?)
                }
                _ => {
                    schema.extensions.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(schema)
    }
}

impl ToBric for Schema {
    fn to_bric(&self) -> Bric {
        let mut obj = IndexMap::new();
        if let Some(v) = &self.id {
            obj.insert("id".to_string(), v.to_bric());
        }
        if let Some(v) = &self.ref_ {
            obj.insert("$ref".to_string(), v.to_bric());
        }
        if let Some(v) = &self.type_ {
            obj.insert("type".to_string(), v.to_bric());
        }
        if let Some(v) = &self.title {
            obj.insert("title".to_string(), v.to_bric());
        }
        if let Some(v) = &self.description {
            obj.insert("description".to_string(), v.to_bric());
        }
        if let Some(v) = &self.default {
            obj.insert("default".to_string(), v.clone());
        }
        if let Some(v) = &self.const_ {
            obj.insert("const".to_string(), v.clone());
        }
        if let Some(v) = &self.enum_ {
            obj.insert("enum".to_string(), Bric::Arr(v.clone()));
        }
        if let Some(v) = &self.required {
            obj.insert("required".to_string(), v.to_bric());
        }
        if let Some(v) = &self.properties {
            obj.insert("properties".to_string(), v.to_bric());
        }
        if let Some(v) = &self.additional_properties {
            obj.insert("additionalProperties".to_string(), v.to_bric());
        }
        if let Some(v) = &self.items {
            obj.insert("items".to_string(), v.to_bric());
        }
        if let Some(v) = &self.min_items {
            obj.insert("minItems".to_string(), v.to_bric());
        }
        if let Some(v) = &self.max_items {
            obj.insert("maxItems".to_string(), v.to_bric());
        }
        if let Some(v) = &self.all_of {
            obj.insert("allOf".to_string(), v.to_bric());
        }
        if let Some(v) = &self.any_of {
            obj.insert("anyOf".to_string(), v.to_bric());
        }
        if let Some(v) = &self.one_of {
            obj.insert("oneOf".to_string(), v.to_bric());
        }
        if let Some(v) = &self.not {
            obj.insert("not".to_string(), v.to_bric());
        }
        if let Some(v) = &self.definitions {
            obj.insert("definitions".to_string(), v.to_bric());
        }
        for (key, value) in &self.extensions {
            obj.insert(key.clone(), value.clone());
        }
        Bric::Obj(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bric::parse;

    fn decode(text: &str) -> Schema {
        Schema::from_bric(&parse(text).unwrap()).unwrap()
    }

    #[test]
    fn decode_simple_object_schema() {
        let s = decode(
            r#"{
                "type": "object",
                "title": "Person",
                "properties": {"name": {"type": "string"}, "age": {"type": "integer"}},
                "required": ["name"]
            }"#,
        );
        assert_eq!(s.type_, Some(TypeSpec::One(SimpleType::Object)));
        assert_eq!(s.title.as_deref(), Some("Person"));
        let props = s.properties.as_ref().unwrap();
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert!(s.requires("name"));
        assert!(!s.requires("age"));
    }

    #[test]
    fn decode_type_list() {
        let s = decode(r#"{"type": ["string", "null"]}"#);
        assert_eq!(
            s.type_,
            Some(TypeSpec::Many(vec![SimpleType::String, SimpleType::Null]))
        );
    }

    #[test]
    fn decode_bad_type_word_points_at_keyword() {
        let err = Schema::from_bric(&parse(r#"{"type": "float"}"#).unwrap()).unwrap_err();
        assert_eq!(
            err.kind,
            BindErrorKind::InvalidEnumValue {
                value: Bric::Str("float".into())
            }
        );
        assert_eq!(err.pointer, vec!["type"]);
    }

    #[test]
    fn decode_items_single_and_tuple() {
        let s = decode(r#"{"type": "array", "items": {"type": "number"}}"#);
        assert!(matches!(s.items, Some(Items::Single(_))));
        let s = decode(r#"{"type": "array", "items": [{"type": "number"}, {"type": "string"}]}"#);
        match s.items {
            Some(Items::Tuple(items)) => assert_eq!(items.len(), 2),
            other => panic!("expected tuple items, got {:?}", other),
        }
    }

    #[test]
    fn decode_additional_properties_forms() {
        let s = decode(r#"{"additionalProperties": false}"#);
        assert_eq!(
            s.additional_properties,
            Some(AdditionalProperties::Allowed(false))
        );
        let s = decode(r#"{"additionalProperties": {"type": "string"}}"#);
        assert!(matches!(
            s.additional_properties,
            Some(AdditionalProperties::Schema(_))
        ));
    }

    #[test]
    fn decode_nested_error_path() {
        let err = Schema::from_bric(
            &parse(r#"{"properties": {"a": {"items": 5}}}"#).unwrap(),
        )
        .unwrap_err();
        assert_eq!(err.pointer, vec!["properties", "a", "items"]);
    }

    #[test]
    fn unknown_keywords_land_in_extensions() {
        let s = decode(r#"{"type": "string", "format": "date-time", "x-order": 3}"#);
        let keys: Vec<&str> = s.extensions.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["format", "x-order"]);
    }

    #[test]
    fn encode_round_trips_including_extensions() {
        let text = r##"{
            "id": "http://example.com/root",
            "type": "object",
            "properties": {"a": {"type": "string", "format": "uuid"}},
            "required": ["a"],
            "definitions": {"Node": {"$ref": "#"}},
            "x-vendor": {"keep": [1, 2]}
        }"##;
        let s = decode(text);
        let round = Schema::from_bric(&s.to_bric()).unwrap();
        assert_eq!(round, s);
    }

    #[test]
    fn decode_composition_keywords() {
        let s = decode(
            r#"{"oneOf": [{"type": "string"}, {"type": "number"}], "not": {"type": "null"}}"#,
        );
        assert_eq!(s.one_of.as_ref().unwrap().len(), 2);
        assert!(s.not.is_some());
    }
}
