#![allow(
    clippy::module_name_repetitions,
    reason = "pattern kinds read better with their full names"
)]
//! `DatEx` Patterns - pattern matching and immutable update for tree data.
//!
//! This crate provides:
//! - Persistent data values (`Value`, `Object`, `Heap`)
//! - Evaluation error types (`EvalError`, `EvalResult`)
//! - The pattern algebra (`Pattern` and its building blocks)
//! - Operations running a pattern over a focus (`test`, `replace`, ...)
//!
//! # Matches
//!
//! Applying a pattern to a focus yields a lazy stream of `Match` records.
//! Each record carries the matched value and a replacer that rebuilds the
//! whole focus with a new value at that position:
//!
//! ```text
//! let p = Pattern::seq([Pattern::key("foo"), Pattern::index(-1)]);
//! let v = Value::map([("foo", Value::list(vec![Value::int(1), Value::int(2)]))]);
//! p.match_first(&v)             // Ok(Some(Int(2)))
//! p.replace(&v, Value::int(9))  // Ok({"foo": [1, 9]})
//! ```
//!
//! Failing to match is an empty stream, never an error. Errors are kept for
//! data of the wrong shape and travel through every combinator as `Err`
//! items.

mod errors;
mod matching;
pub mod operations;
mod path;
mod pattern;
mod value;

#[cfg(test)]
mod test_helpers;

pub use errors::{
    arity_mismatch, index_out_of_bounds, type_mismatch, EvalError, EvalErrorKind, EvalResult,
};
pub use matching::{Match, Matches, Replacer};
pub use operations::{match_all, match_first, replace, rewrite, test, update_all};
pub use path::{set_path, Path, Step};
pub use pattern::{
    ArrayShape, Collect, FieldPattern, Lens, ObjectShape, Pattern, Predicate, Reducer,
    RegexPattern,
};
pub use value::{FunctionValue, Heap, Object, OpaqueValue, Symbol, Value, ValueType};
