//! Conversion between JSON documents and data values.
//!
//! JSON has no undefined, dates or symbols, so `to_json` is lossy:
//! `Undefined` becomes `null`, dates become RFC 3339 strings and symbols
//! their description. Functions, opaque host objects and cyclic cells have
//! no JSON form at all.

use datex_patterns::{Object, Value};
use serde_json::{Map, Number};

/// Value that cannot be written as JSON.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum JsonError {
    #[error("{type_name} values have no JSON representation")]
    Unsupported { type_name: &'static str },
    #[error("cannot write a cyclic value as JSON")]
    Cyclic,
    #[error("non-finite number {0} has no JSON representation")]
    NonFinite(f64),
}

/// Build a value from a JSON document.
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::int(i),
            // u64 above i64::MAX and fractions
            None => Value::float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => {
            Value::list(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(entries) => Value::object(
            entries
                .into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect::<Object>(),
        ),
    }
}

/// Write a value as a JSON document.
pub fn to_json(value: &Value) -> Result<serde_json::Value, JsonError> {
    let mut open_cells = Vec::new();
    write_value(value, &mut open_cells)
}

fn write_value(value: &Value, open_cells: &mut Vec<usize>) -> Result<serde_json::Value, JsonError> {
    Ok(match value {
        Value::Undefined | Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::Number((*n).into()),
        Value::Float(n) => {
            serde_json::Value::Number(Number::from_f64(*n).ok_or(JsonError::NonFinite(*n))?)
        }
        Value::Str(s) => serde_json::Value::String(s.to_string()),
        Value::Symbol(sym) => serde_json::Value::String(sym.description().to_owned()),
        Value::Date(instant) => serde_json::Value::String(instant.to_rfc3339()),
        Value::List(items) => serde_json::Value::Array(
            items
                .iter()
                .map(|item| write_value(item, open_cells))
                .collect::<Result<_, _>>()?,
        ),
        Value::Map(object) => {
            let mut map = Map::with_capacity(object.len());
            for (key, item) in object.iter() {
                map.insert(key.to_owned(), write_value(item, open_cells)?);
            }
            serde_json::Value::Object(map)
        }
        Value::Cell(_) => {
            let id = value.identity().unwrap_or_default();
            if open_cells.contains(&id) {
                return Err(JsonError::Cyclic);
            }
            open_cells.push(id);
            let written = write_value(&value.resolved(), open_cells);
            open_cells.pop();
            written?
        }
        Value::Function(_) | Value::Opaque(_) => {
            return Err(JsonError::Unsupported {
                type_name: value.type_name(),
            })
        }
    })
}
