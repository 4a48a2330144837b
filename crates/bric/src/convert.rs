//! Conversions between `Bric` and `serde_json::Value`.
//!
//! `serde_json` is built with `preserve_order`, so object key order
//! survives the trip in both directions. Numbers outside the f64 range
//! saturate through `as_f64`; integral doubles convert back to JSON
//! integers where they fit.

use serde_json::{Map, Number, Value};

use crate::value::Bric;

impl From<Value> for Bric {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Bric::Null,
            Value::Bool(b) => Bric::Bool(b),
            Value::Number(n) => Bric::Num(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Bric::Str(s),
            Value::Array(items) => Bric::Arr(items.into_iter().map(Bric::from).collect()),
            Value::Object(map) => Bric::Obj(
                map.into_iter()
                    .map(|(k, v)| (k, Bric::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Bric> for Value {
    fn from(value: &Bric) -> Self {
        match value {
            Bric::Null => Value::Null,
            Bric::Bool(b) => Value::Bool(*b),
            Bric::Num(n) => number_to_value(*n),
            Bric::Str(s) => Value::String(s.clone()),
            Bric::Arr(items) => Value::Array(items.iter().map(Value::from).collect()),
            Bric::Obj(map) => {
                let mut out = Map::new();
                for (k, v) in map {
                    out.insert(k.clone(), Value::from(v));
                }
                Value::Object(out)
            }
        }
    }
}

impl From<Bric> for Value {
    fn from(value: Bric) -> Self {
        Value::from(&value)
    }
}

fn number_to_value(n: f64) -> Value {
    if n.trunc() == n && n.is_finite() && n.abs() < 9.007_199_254_740_992e15 {
        if n.is_sign_negative() && n != 0.0 {
            return Value::Number(Number::from(n as i64));
        }
        if !n.is_sign_negative() {
            return Value::Number(Number::from(n as u64));
        }
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_to_bric_and_back() {
        let v = json!({"z": 1, "a": [true, null, "s", 2.5]});
        let b = Bric::from(v.clone());
        assert_eq!(Value::from(&b), v);
    }

    #[test]
    fn key_order_is_preserved() {
        let v = json!({"z": 1, "a": 2});
        let b = Bric::from(v);
        let keys: Vec<&str> = b.as_obj().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn integral_doubles_become_json_integers() {
        assert_eq!(Value::from(Bric::Num(3.0)), json!(3));
        assert_eq!(Value::from(Bric::Num(-3.0)), json!(-3));
        assert_eq!(Value::from(Bric::Num(2.5)), json!(2.5));
    }

    #[test]
    fn non_finite_becomes_null() {
        assert_eq!(Value::from(Bric::Num(f64::NAN)), Value::Null);
        assert_eq!(Value::from(Bric::Num(f64::INFINITY)), Value::Null);
    }

    #[test]
    fn negative_zero_stays_a_float() {
        // -0.0 has no integer spelling; it must stay a float to keep its sign
        let v = Value::from(Bric::Num(-0.0));
        assert_eq!(v.as_f64().unwrap().to_bits(), (-0.0f64).to_bits());
    }
}
