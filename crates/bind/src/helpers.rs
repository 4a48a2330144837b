//! Object deconstruction helpers shared by generated decoders and the
//! hand-written schema bootstrap.

use bric::Bric;
use indexmap::IndexMap;

use crate::error::{BindError, BindErrorKind};
use crate::traits::FromBric;

/// View a value as an object, or fail with the caller's type name.
pub fn as_obj<'a>(bric: &'a Bric, type_name: &str) -> Result<&'a IndexMap<String, Bric>, BindError> {
    bric.as_obj().ok_or_else(|| {
        BindError::new(
            BindErrorKind::UnexpectedType {
                expected: "object",
                got: bric.kind(),
            },
            type_name,
        )
    })
}

/// View a value as an array, or fail with the caller's type name.
pub fn as_arr<'a>(bric: &'a Bric, type_name: &str) -> Result<&'a [Bric], BindError> {
    bric.as_arr().ok_or_else(|| {
        BindError::new(
            BindErrorKind::UnexpectedType {
                expected: "array",
                got: bric.kind(),
            },
            type_name,
        )
    })
}

/// Decode a required member. Absence is `MissingRequired`; a member error
/// gains the key as a path component.
pub fn req<T: FromBric>(
    obj: &IndexMap<String, Bric>,
    key: &str,
    type_name: &str,
) -> Result<T, BindError> {
    match obj.get(key) {
        Some(value) => T::from_bric(value).map_err(|e| e.at(key)),
        None => Err(BindError::new(
            BindErrorKind::MissingRequired { key: key.to_string() },
            type_name,
        )),
    }
}

/// Decode an optional member. Absence and JSON null both read as `None`.
pub fn opt<T: FromBric>(obj: &IndexMap<String, Bric>, key: &str) -> Result<Option<T>, BindError> {
    match obj.get(key) {
        Some(value) => Option::<T>::from_bric(value).map_err(|e| e.at(key)),
        None => Ok(None),
    }
}

/// Reject members outside `known`, pointing at the first offender.
pub fn deny_unknown(
    obj: &IndexMap<String, Bric>,
    known: &[&str],
    type_name: &str,
) -> Result<(), BindError> {
    for key in obj.keys() {
        if !known.contains(&key.as_str()) {
            return Err(BindError::new(
                BindErrorKind::AdditionalPropertyForbidden { key: key.clone() },
                type_name,
            )
            .at(key.clone()));
        }
    }
    Ok(())
}

/// Decode every member outside `known` into an ordered map.
pub fn collect_rest<T: FromBric>(
    obj: &IndexMap<String, Bric>,
    known: &[&str],
) -> Result<IndexMap<String, T>, BindError> {
    let mut rest = IndexMap::new();
    for (key, value) in obj {
        if !known.contains(&key.as_str()) {
            rest.insert(key.clone(), T::from_bric(value).map_err(|e| e.at(key.clone()))?);
        }
    }
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bric::parse;

    #[test]
    fn req_missing_names_the_key() {
        let v = parse(r#"{"present": 1}"#).unwrap();
        let obj = as_obj(&v, "T").unwrap();
        let err = req::<f64>(obj, "absent", "T").unwrap_err();
        assert_eq!(
            err.kind,
            BindErrorKind::MissingRequired { key: "absent".into() }
        );
        assert_eq!(err.pointer, Vec::<String>::new());
        assert_eq!(err.type_name, "T");
    }

    #[test]
    fn req_member_error_gains_the_key() {
        let v = parse(r#"{"n": "not a number"}"#).unwrap();
        let obj = as_obj(&v, "T").unwrap();
        let err = req::<f64>(obj, "n", "T").unwrap_err();
        assert_eq!(err.pointer, vec!["n"]);
    }

    #[test]
    fn opt_absent_and_null_read_as_none() {
        let v = parse(r#"{"a": null}"#).unwrap();
        let obj = as_obj(&v, "T").unwrap();
        assert_eq!(opt::<f64>(obj, "a").unwrap(), None);
        assert_eq!(opt::<f64>(obj, "b").unwrap(), None);
    }

    #[test]
    fn deny_unknown_points_at_offender() {
        let v = parse(r#"{"a": 1, "mystery": 2}"#).unwrap();
        let obj = as_obj(&v, "T").unwrap();
        let err = deny_unknown(obj, &["a"], "T").unwrap_err();
        assert_eq!(
            err.kind,
            BindErrorKind::AdditionalPropertyForbidden { key: "mystery".into() }
        );
        assert_eq!(err.pointer_text(), "#/mystery");
        assert!(deny_unknown(obj, &["a", "mystery"], "T").is_ok());
    }

    #[test]
    fn collect_rest_keeps_order_and_skips_known() {
        let v = parse(r#"{"known": 0, "z": 1, "a": 2}"#).unwrap();
        let obj = as_obj(&v, "T").unwrap();
        let rest = collect_rest::<f64>(obj, &["known"]).unwrap();
        let keys: Vec<&str> = rest.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn as_obj_reports_kind() {
        let err = as_obj(&Bric::Num(1.0), "T").unwrap_err();
        assert_eq!(
            err.kind,
            BindErrorKind::UnexpectedType {
                expected: "object",
                got: "number"
            }
        );
    }
}
