//! Structural updates over `Bric` values.
//!
//! `Bric` is an immutable value; both operations here return a new tree and
//! leave the receiver untouched.

use indexmap::IndexMap;

use crate::value::Bric;

impl Bric {
    /// Returns a copy of `self` with `value` placed at `path`.
    ///
    /// An empty path replaces the whole value. Missing object keys are
    /// created; an out-of-range array index appends; a path component that
    /// does not fit the node it lands on rebuilds that node as an object.
    pub fn update<S: AsRef<str>>(&self, value: Bric, path: &[S]) -> Bric {
        let Some((head, rest)) = path.split_first() else {
            return value;
        };
        let key = head.as_ref();
        match self {
            Bric::Obj(map) => {
                let mut map = map.clone();
                let child = map.get(key).cloned().unwrap_or(Bric::Null);
                map.insert(key.to_string(), child.update(value, rest));
                Bric::Obj(map)
            }
            Bric::Arr(items) => match key.parse::<usize>() {
                Ok(i) if i < items.len() => {
                    let mut items = items.clone();
                    items[i] = items[i].update(value, rest);
                    Bric::Arr(items)
                }
                Ok(_) => {
                    let mut items = items.clone();
                    items.push(Bric::Null.update(value, rest));
                    Bric::Arr(items)
                }
                Err(_) => singleton(key, Bric::Null.update(value, rest)),
            },
            _ => singleton(key, Bric::Null.update(value, rest)),
        }
    }

    /// Rebuilds the tree bottom-up, applying `f` to every node together
    /// with its pointer path. Children are transformed before their parent
    /// sees them.
    pub fn alter<F>(&self, mut f: F) -> Bric
    where
        F: FnMut(&[String], Bric) -> Bric,
    {
        let mut path = Vec::new();
        walk(self, &mut path, &mut f)
    }
}

fn singleton(key: &str, value: Bric) -> Bric {
    let mut map = IndexMap::new();
    map.insert(key.to_string(), value);
    Bric::Obj(map)
}

fn walk<F>(node: &Bric, path: &mut Vec<String>, f: &mut F) -> Bric
where
    F: FnMut(&[String], Bric) -> Bric,
{
    let rebuilt = match node {
        Bric::Arr(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                out.push(walk(item, path, f));
                path.pop();
            }
            Bric::Arr(out)
        }
        Bric::Obj(map) => {
            let mut out = IndexMap::with_capacity(map.len());
            for (key, item) in map {
                path.push(key.clone());
                out.insert(key.clone(), walk(item, path, f));
                path.pop();
            }
            Bric::Obj(out)
        }
        scalar => scalar.clone(),
    };
    f(path, rebuilt)
}
