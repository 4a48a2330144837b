//! `Bricolage` — the pluggable value builder driven by the pull parser.
//!
//! The parser never commits to a value representation; it calls the
//! create/combine capabilities below, so callers can parse straight into
//! `Bric`, into `serde_json::Value`, or into anything else that can be
//! assembled from the six JSON kinds.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::value::Bric;

/// Create/combine capabilities for the six JSON kinds.
pub trait Bricolage {
    type Value;
    type Array;
    type Object;

    fn create_null(&mut self) -> Self::Value;
    fn create_true(&mut self) -> Self::Value;
    fn create_false(&mut self) -> Self::Value;
    fn create_string(&mut self, scalars: &str) -> Self::Value;
    /// Build a number from its source text (already validated against the
    /// JSON grammar, or one of `NaN`/`Infinity`/`-Infinity` under the
    /// compatibility options). `None` marks the text unrepresentable.
    fn create_number(&mut self, text: &str) -> Option<Self::Value>;
    fn create_array(&mut self) -> Self::Array;
    fn create_object(&mut self) -> Self::Object;
    fn put_element(&mut self, arr: &mut Self::Array, element: Self::Value);
    /// Returns `true` when `key` was already present; the new value wins.
    fn put_key_value(&mut self, obj: &mut Self::Object, key: &str, value: Self::Value) -> bool;
    fn finish_array(&mut self, arr: Self::Array) -> Self::Value;
    fn finish_object(&mut self, obj: Self::Object) -> Self::Value;
}

/// Builds `Bric` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BricBricolage;

impl Bricolage for BricBricolage {
    type Value = Bric;
    type Array = Vec<Bric>;
    type Object = IndexMap<String, Bric>;

    fn create_null(&mut self) -> Bric {
        Bric::Null
    }

    fn create_true(&mut self) -> Bric {
        Bric::Bool(true)
    }

    fn create_false(&mut self) -> Bric {
        Bric::Bool(false)
    }

    fn create_string(&mut self, scalars: &str) -> Bric {
        Bric::Str(scalars.to_string())
    }

    fn create_number(&mut self, text: &str) -> Option<Bric> {
        text.parse::<f64>().ok().map(Bric::Num)
    }

    fn create_array(&mut self) -> Vec<Bric> {
        Vec::new()
    }

    fn create_object(&mut self) -> IndexMap<String, Bric> {
        IndexMap::new()
    }

    fn put_element(&mut self, arr: &mut Vec<Bric>, element: Bric) {
        arr.push(element);
    }

    fn put_key_value(&mut self, obj: &mut IndexMap<String, Bric>, key: &str, value: Bric) -> bool {
        obj.insert(key.to_string(), value).is_some()
    }

    fn finish_array(&mut self, arr: Vec<Bric>) -> Bric {
        Bric::Arr(arr)
    }

    fn finish_object(&mut self, obj: IndexMap<String, Bric>) -> Bric {
        Bric::Obj(obj)
    }
}

/// Builds host-native `serde_json::Value` trees without an intermediate
/// `Bric` pass. `NaN`/±∞ have no `serde_json` representation and are
/// reported unrepresentable.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBricolage;

impl Bricolage for JsonBricolage {
    type Value = Value;
    type Array = Vec<Value>;
    type Object = Map<String, Value>;

    fn create_null(&mut self) -> Value {
        Value::Null
    }

    fn create_true(&mut self) -> Value {
        Value::Bool(true)
    }

    fn create_false(&mut self) -> Value {
        Value::Bool(false)
    }

    fn create_string(&mut self, scalars: &str) -> Value {
        Value::String(scalars.to_string())
    }

    fn create_number(&mut self, text: &str) -> Option<Value> {
        if !text.contains(['.', 'e', 'E']) {
            if let Ok(i) = text.parse::<i64>() {
                return Some(Value::Number(Number::from(i)));
            }
            if let Ok(u) = text.parse::<u64>() {
                return Some(Value::Number(Number::from(u)));
            }
        }
        let f = text.parse::<f64>().ok()?;
        Number::from_f64(f).map(Value::Number)
    }

    fn create_array(&mut self) -> Vec<Value> {
        Vec::new()
    }

    fn create_object(&mut self) -> Map<String, Value> {
        Map::new()
    }

    fn put_element(&mut self, arr: &mut Vec<Value>, element: Value) {
        arr.push(element);
    }

    fn put_key_value(&mut self, obj: &mut Map<String, Value>, key: &str, value: Value) -> bool {
        obj.insert(key.to_string(), value).is_some()
    }

    fn finish_array(&mut self, arr: Vec<Value>) -> Value {
        Value::Array(arr)
    }

    fn finish_object(&mut self, obj: Map<String, Value>) -> Value {
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bric_bricolage_builds_bric() {
        let mut b = BricBricolage;
        let mut obj = b.create_object();
        let t = b.create_true();
        assert!(!b.put_key_value(&mut obj, "a", t));
        let f = b.create_false();
        assert!(b.put_key_value(&mut obj, "a", f));
        let v = b.finish_object(obj);
        assert_eq!(v.get("a"), Some(&Bric::Bool(false)));
    }

    #[test]
    fn bric_bricolage_number_text() {
        let mut b = BricBricolage;
        assert_eq!(b.create_number("1.23e-12"), Some(Bric::Num(1.23e-12)));
        assert!(b.create_number("NaN").is_some());
        assert!(b.create_number("-Infinity").is_some());
    }

    #[test]
    fn json_bricolage_keeps_integers_integral() {
        let mut b = JsonBricolage;
        assert_eq!(b.create_number("42"), Some(serde_json::json!(42)));
        assert_eq!(b.create_number("-7"), Some(serde_json::json!(-7)));
        assert_eq!(b.create_number("2.5"), Some(serde_json::json!(2.5)));
    }

    #[test]
    fn json_bricolage_rejects_nan() {
        let mut b = JsonBricolage;
        assert!(b.create_number("NaN").is_none());
    }
}
