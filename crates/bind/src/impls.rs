//! Bind implementations for the vocabulary generated code speaks:
//! scalars, `Option`, `Vec`, `Box`, string-keyed maps, tuples, and `Bric`
//! itself.

use bric::Bric;
use indexmap::IndexMap;

use crate::error::{BindError, BindErrorKind};
use crate::traits::{FromBric, ToBric};

fn unexpected(expected: &'static str, got: &Bric, type_name: &str) -> BindError {
    BindError::new(
        BindErrorKind::UnexpectedType {
            expected,
            got: got.kind(),
        },
        type_name,
    )
}

impl ToBric for Bric {
    fn to_bric(&self) -> Bric {
        self.clone()
    }
}

impl FromBric for Bric {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        Ok(bric.clone())
    }
}

impl ToBric for bool {
    fn to_bric(&self) -> Bric {
        Bric::Bool(*self)
    }
}

impl FromBric for bool {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        bric.as_bool()
            .ok_or_else(|| unexpected("boolean", bric, "bool"))
    }
}

impl ToBric for f64 {
    fn to_bric(&self) -> Bric {
        Bric::Num(*self)
    }
}

impl FromBric for f64 {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        bric.as_num()
            .ok_or_else(|| unexpected("number", bric, "f64"))
    }
}

impl ToBric for i64 {
    fn to_bric(&self) -> Bric {
        Bric::Num(*self as f64)
    }
}

impl FromBric for i64 {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        match bric.as_num() {
            Some(n) if n.trunc() == n && n.is_finite() => Ok(n as i64),
            Some(_) => Err(unexpected("integer", bric, "i64")),
            None => Err(unexpected("integer", bric, "i64")),
        }
    }
}

impl ToBric for u64 {
    fn to_bric(&self) -> Bric {
        Bric::Num(*self as f64)
    }
}

impl FromBric for u64 {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        match bric.as_num() {
            Some(n) if n.trunc() == n && n.is_finite() && n >= 0.0 => Ok(n as u64),
            _ => Err(unexpected("integer", bric, "u64")),
        }
    }
}

impl ToBric for String {
    fn to_bric(&self) -> Bric {
        Bric::Str(self.clone())
    }
}

impl FromBric for String {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        bric.as_str()
            .map(str::to_string)
            .ok_or_else(|| unexpected("string", bric, "String"))
    }
}

impl ToBric for () {
    fn to_bric(&self) -> Bric {
        Bric::Null
    }
}

impl FromBric for () {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        if bric.is_null() {
            Ok(())
        } else {
            Err(unexpected("null", bric, "()"))
        }
    }
}

impl<T: ToBric> ToBric for Option<T> {
    fn to_bric(&self) -> Bric {
        match self {
            Some(v) => v.to_bric(),
            None => Bric::Null,
        }
    }
}

impl<T: FromBric> FromBric for Option<T> {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        if bric.is_null() {
            Ok(None)
        } else {
            T::from_bric(bric).map(Some)
        }
    }
}

impl<T: ToBric> ToBric for Box<T> {
    fn to_bric(&self) -> Bric {
        (**self).to_bric()
    }
}

impl<T: FromBric> FromBric for Box<T> {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        T::from_bric(bric).map(Box::new)
    }
}

impl<T: ToBric> ToBric for Vec<T> {
    fn to_bric(&self) -> Bric {
        Bric::Arr(self.iter().map(ToBric::to_bric).collect())
    }
}

impl<T: FromBric> FromBric for Vec<T> {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        let items = bric
            .as_arr()
            .ok_or_else(|| unexpected("array", bric, "Array"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_bric(item).map_err(|e| e.at_index(i)))
            .collect()
    }
}

impl<T: ToBric> ToBric for IndexMap<String, T> {
    fn to_bric(&self) -> Bric {
        let mut map = IndexMap::with_capacity(self.len());
        for (k, v) in self {
            map.insert(k.clone(), v.to_bric());
        }
        Bric::Obj(map)
    }
}

impl<T: FromBric> FromBric for IndexMap<String, T> {
    fn from_bric(bric: &Bric) -> Result<Self, BindError> {
        let obj = bric
            .as_obj()
            .ok_or_else(|| unexpected("object", bric, "Map"))?;
        let mut out = IndexMap::with_capacity(obj.len());
        for (k, v) in obj {
            out.insert(k.clone(), T::from_bric(v).map_err(|e| e.at(k.clone()))?);
        }
        Ok(out)
    }
}

macro_rules! tuple_bind {
    ($len:expr; $($name:ident $idx:tt),+) => {
        impl<$($name: ToBric),+> ToBric for ($($name,)+) {
            fn to_bric(&self) -> Bric {
                Bric::Arr(vec![$(self.$idx.to_bric()),+])
            }
        }

        impl<$($name: FromBric),+> FromBric for ($($name,)+) {
            fn from_bric(bric: &Bric) -> Result<Self, BindError> {
                let items = bric
                    .as_arr()
                    .ok_or_else(|| unexpected("array", bric, "Tuple"))?;
                if items.len() < $len {
                    return Err(BindError::new(
                        BindErrorKind::TooFewItems { expected: $len, got: items.len() },
                        "Tuple",
                    ));
                }
                if items.len() > $len {
                    return Err(BindError::new(
                        BindErrorKind::TooManyItems { expected: $len, got: items.len() },
                        "Tuple",
                    ));
                }
                Ok(($($name::from_bric(&items[$idx]).map_err(|e| e.at_index($idx))?,)+))
            }
        }
    };
}

tuple_bind!(1; A 0);
tuple_bind!(2; A 0, B 1);
tuple_bind!(3; A 0, B 1, C 2);
tuple_bind!(4; A 0, B 1, C 2, D 3);
tuple_bind!(5; A 0, B 1, C 2, D 3, E 4);
tuple_bind!(6; A 0, B 1, C 2, D 3, E 4, F 5);
tuple_bind!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
tuple_bind!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
