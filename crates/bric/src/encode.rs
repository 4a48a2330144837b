//! JSON text encoding for `Bric` values.
//!
//! `encode` emits compact text; `encode_pretty` indents with two spaces.
//! Non-finite numbers have no JSON spelling and encode as `null`.

use std::fmt::Write as _;

use crate::value::Bric;

const TAB: &str = "  ";

/// Encode a value as compact JSON text.
pub fn encode(value: &Bric) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Encode a value as indented JSON text.
pub fn encode_pretty(value: &Bric) -> String {
    let mut out = String::new();
    write_value_pretty(&mut out, value, "");
    out
}

fn write_value(out: &mut String, value: &Bric) {
    match value {
        Bric::Null => out.push_str("null"),
        Bric::Bool(true) => out.push_str("true"),
        Bric::Bool(false) => out.push_str("false"),
        Bric::Num(n) => write_number(out, *n),
        Bric::Str(s) => write_string(out, s),
        Bric::Arr(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Bric::Obj(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_value_pretty(out: &mut String, value: &Bric, indent: &str) {
    match value {
        Bric::Arr(items) if !items.is_empty() => {
            let inner = format!("{indent}{TAB}");
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&inner);
                write_value_pretty(out, item, &inner);
            }
            out.push('\n');
            out.push_str(indent);
            out.push(']');
        }
        Bric::Obj(map) if !map.is_empty() => {
            let inner = format!("{indent}{TAB}");
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&inner);
                write_string(out, key);
                out.push_str(": ");
                write_value_pretty(out, item, &inner);
            }
            out.push('\n');
            out.push_str(indent);
            out.push('}');
        }
        other => write_value(out, other),
    }
}

fn write_number(out: &mut String, n: f64) {
    if !n.is_finite() {
        out.push_str("null");
        return;
    }
    // Rust's Display prints the shortest decimal that round-trips.
    let _ = write!(out, "{}", n);
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn obj(pairs: &[(&str, Bric)]) -> Bric {
        let mut map = IndexMap::new();
        for (k, v) in pairs {
            map.insert(k.to_string(), v.clone());
        }
        Bric::Obj(map)
    }

    #[test]
    fn encode_scalars() {
        assert_eq!(encode(&Bric::Null), "null");
        assert_eq!(encode(&Bric::Bool(true)), "true");
        assert_eq!(encode(&Bric::Bool(false)), "false");
        assert_eq!(encode(&Bric::Num(1.0)), "1");
        assert_eq!(encode(&Bric::Num(2.5)), "2.5");
        assert_eq!(encode(&Bric::Str("hi".into())), "\"hi\"");
    }

    #[test]
    fn encode_negative_zero_keeps_sign() {
        assert_eq!(encode(&Bric::Num(-0.0)), "-0");
    }

    #[test]
    fn encode_small_exponent_survives() {
        let n: f64 = "1.23e-12".parse().unwrap();
        let text = encode(&Bric::Num(n));
        let back: f64 = text.parse().unwrap();
        assert_eq!(back.to_bits(), n.to_bits());
    }

    #[test]
    fn encode_non_finite_as_null() {
        assert_eq!(encode(&Bric::Num(f64::NAN)), "null");
        assert_eq!(encode(&Bric::Num(f64::INFINITY)), "null");
        assert_eq!(encode(&Bric::Num(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn encode_containers_compact() {
        let v = obj(&[
            ("a", Bric::Arr(vec![Bric::from(1.0), Bric::Null])),
            ("b", Bric::from("x")),
        ]);
        assert_eq!(encode(&v), r#"{"a":[1,null],"b":"x"}"#);
    }

    #[test]
    fn encode_string_escapes() {
        assert_eq!(
            encode(&Bric::Str("a\"b\\c\nd\u{01}".into())),
            "\"a\\\"b\\\\c\\nd\\u0001\""
        );
    }

    #[test]
    fn encode_preserves_key_order() {
        let v = obj(&[("z", Bric::from(1.0)), ("a", Bric::from(2.0))]);
        assert_eq!(encode(&v), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn pretty_indents_nested_containers() {
        let v = obj(&[("a", Bric::Arr(vec![Bric::from(1.0)]))]);
        assert_eq!(encode_pretty(&v), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn pretty_empty_containers_stay_compact() {
        assert_eq!(encode_pretty(&Bric::arr()), "[]");
        assert_eq!(encode_pretty(&Bric::obj()), "{}");
    }
}
