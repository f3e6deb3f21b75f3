//! Shorthand for building test data.

use crate::value::Value;

pub fn int(n: i64) -> Value {
    Value::int(n)
}

pub fn s(text: &str) -> Value {
    Value::string(text)
}

pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
    Value::list(items.into_iter().collect())
}

pub fn obj<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    Value::map(entries)
}

/// `{foo: 1, bar: [2, {baz: 3}]}`
pub fn nested() -> Value {
    obj([
        ("foo", int(1)),
        ("bar", list([int(2), obj([("baz", int(3))])])),
    ])
}

use crate::errors::EvalError;
use crate::pattern::Pattern;

/// Every matched value, panicking on an evaluation error.
pub fn all(pattern: &Pattern, focus: &Value) -> Vec<Value> {
    match pattern.match_all(focus).collect::<Result<Vec<_>, EvalError>>() {
        Ok(values) => values,
        Err(err) => panic!("{pattern} failed on {focus}: {err}"),
    }
}

/// The first matched value, panicking when there is none.
pub fn first(pattern: &Pattern, focus: &Value) -> Value {
    match pattern.match_first(focus) {
        Ok(Some(value)) => value,
        other => panic!("{pattern} on {focus}: expected a match, got {other:?}"),
    }
}

/// Replace the first match, panicking on an evaluation error.
pub fn replaced(pattern: &Pattern, focus: &Value, new_value: Value) -> Value {
    match pattern.replace(focus, new_value) {
        Ok(value) => value,
        Err(err) => panic!("replacing {pattern} in {focus}: {err}"),
    }
}
