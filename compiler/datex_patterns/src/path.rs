//! Positions inside a value and rebuilding along them.
//!
//! Containers are persistent, so writing below the root copies every
//! container on the path and shares everything else. Cells on the path are
//! read through and replaced by the plain container they held.

use std::fmt;

use smallvec::SmallVec;

use crate::errors::{index_out_of_bounds, type_mismatch, EvalResult};
use crate::value::{Object, Value};

/// One step from a container to a child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Index(usize),
    Key(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Index(i) => write!(f, "[{i}]"),
            Step::Key(key) => write!(f, ".{key}"),
        }
    }
}

/// Steps from the root; most data is shallow.
pub type Path = SmallVec<[Step; 4]>;

/// A copy of `items` with position `i` set to `value`.
///
/// Positions past the end are filled with `Undefined`.
pub(crate) fn with_index(items: &[Value], i: usize, value: Value) -> Value {
    let mut items = items.to_vec();
    if i >= items.len() {
        items.resize(i + 1, Value::Undefined);
    }
    items[i] = value;
    Value::list(items)
}

/// A copy of `object` with `key` bound to `value`, keeping key order.
pub(crate) fn with_key(object: &Object, key: &str, value: Value) -> Value {
    let mut object = object.clone();
    object.insert(key, value);
    Value::object(object)
}

/// Rebuild `root` with `new_value` placed at `path`.
pub fn set_path(root: &Value, path: &[Step], new_value: Value) -> EvalResult {
    let Some((step, rest)) = path.split_first() else {
        return Ok(new_value);
    };
    let node = root.resolved();
    match (step, &*node) {
        (Step::Index(i), Value::List(items)) => {
            let Some(child) = items.get(*i) else {
                return Err(index_out_of_bounds(
                    i64::try_from(*i).unwrap_or(i64::MAX),
                    items.len(),
                ));
            };
            let child = set_path(child, rest, new_value)?;
            Ok(with_index(items, *i, child))
        }
        (Step::Key(key), Value::Map(object)) => {
            let child = object.get(key).cloned().unwrap_or_default();
            let child = set_path(&child, rest, new_value)?;
            Ok(with_key(object, key, child))
        }
        (Step::Index(_), other) => Err(type_mismatch("array", other.type_name())),
        (Step::Key(_), other) => Err(type_mismatch("object", other.type_name())),
    }
}

#[cfg(test)]
mod tests;
