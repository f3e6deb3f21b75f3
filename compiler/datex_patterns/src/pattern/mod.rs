//! The pattern algebra.
//!
//! A `Pattern` is an immutable tree built once and applied to many foci.
//! `Pattern::matches` turns a focus into a lazy stream of matches; nothing
//! is computed until the stream is pulled, and dropping it early is free.
//!
//! Constructors are associated functions (`Pattern::key("foo")`,
//! `Pattern::seq([..])`); the compiler in `datex_compile` produces the same
//! trees from source text.

mod combinator;
mod primitive;
mod shape;
mod traverse;

use std::any::Any;
use std::fmt;

pub use combinator::{Collect, Reducer};
pub use primitive::{Lens, Predicate, RegexPattern};
pub use shape::{ArrayShape, FieldPattern, ObjectShape};

use crate::matching::{empty, once, Match, Matches};
use crate::value::{Value, ValueType};

/// A composable pattern over `Value`s.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// `_`: the focus itself.
    Id,
    /// Never matches.
    Fail,
    /// The focus, when the predicate holds.
    Where(Predicate),
    /// The focus, when it equals the value.
    Value(Value),
    /// `.name` / `.name?`
    Key { name: String, optional: bool },
    /// `.3` / `.-1?`
    Index { index: i64, optional: bool },
    /// `.[start:end]`
    Slice { start: Option<i64>, end: Option<i64> },
    Regex(RegexPattern),
    Lens(Lens),
    /// `*`
    Spread,
    /// `**`
    Recursive { max_visits: usize },
    Seq(Vec<Pattern>),
    Alt(Vec<Pattern>),
    /// `p &`: lookahead.
    And(Box<Pattern>),
    /// At most this many matches; `p !` is a limit of one.
    Limit(Box<Pattern>, usize),
    Collect(Collect),
    Object(ObjectShape),
    Array(ArrayShape),
    /// The whole list, when every element matches.
    ArrayOf(Box<Pattern>),
}

// Constructors

impl Pattern {
    #[inline]
    pub fn id() -> Self {
        Pattern::Id
    }

    #[inline]
    pub fn fail() -> Self {
        Pattern::Fail
    }

    /// Match the focus when `predicate` holds.
    pub fn where_(predicate: Predicate) -> Self {
        Pattern::Where(predicate)
    }

    pub fn predicate(
        name: &str,
        test: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Pattern::Where(Predicate::new(name, test))
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Pattern::Value(value.into())
    }

    pub fn type_of(expected: ValueType) -> Self {
        Pattern::predicate(expected.name(), move |v| v.type_of() == expected)
    }

    pub fn number() -> Self {
        Pattern::type_of(ValueType::Number)
    }

    pub fn string() -> Self {
        Pattern::type_of(ValueType::String)
    }

    pub fn bool() -> Self {
        Pattern::type_of(ValueType::Bool)
    }

    pub fn func() -> Self {
        Pattern::type_of(ValueType::Function)
    }

    pub fn symbol() -> Self {
        Pattern::type_of(ValueType::Symbol)
    }

    pub fn date() -> Self {
        Pattern::type_of(ValueType::Date)
    }

    /// Any map.
    pub fn object() -> Self {
        Pattern::type_of(ValueType::Object)
    }

    /// Any list.
    pub fn array() -> Self {
        Pattern::type_of(ValueType::Array)
    }

    /// Opaque host objects of type `T`.
    pub fn instance_of<T: Any>() -> Self {
        Pattern::predicate(std::any::type_name::<T>(), |v| v.downcast_ref::<T>().is_some())
    }

    pub fn key(name: impl Into<String>) -> Self {
        Pattern::Key {
            name: name.into(),
            optional: false,
        }
    }

    pub fn optional_key(name: impl Into<String>) -> Self {
        Pattern::Key {
            name: name.into(),
            optional: true,
        }
    }

    pub fn index(index: i64) -> Self {
        Pattern::Index {
            index,
            optional: false,
        }
    }

    pub fn optional_index(index: i64) -> Self {
        Pattern::Index {
            index,
            optional: true,
        }
    }

    pub fn slice(start: Option<i64>, end: Option<i64>) -> Self {
        Pattern::Slice { start, end }
    }

    pub fn regex(regex: RegexPattern) -> Self {
        Pattern::Regex(regex)
    }

    pub fn lens(lens: Lens) -> Self {
        Pattern::Lens(lens)
    }

    /// Match `f(focus)`; replacing returns the new value as is.
    pub fn project(f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Pattern::Lens(Lens::getter("project", move |v| Ok(f(v))))
    }

    #[inline]
    pub fn spread() -> Self {
        Pattern::Spread
    }

    /// Breadth-first descent visiting each container once.
    #[inline]
    pub fn recursive() -> Self {
        Pattern::Recursive { max_visits: 1 }
    }

    pub fn recursive_with(max_visits: usize) -> Self {
        Pattern::Recursive { max_visits }
    }

    pub fn seq(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Seq(patterns.into_iter().collect())
    }

    pub fn alt(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Alt(patterns.into_iter().collect())
    }

    pub fn and(inner: Pattern) -> Self {
        Pattern::And(Box::new(inner))
    }

    pub fn limit(inner: Pattern, n: usize) -> Self {
        Pattern::Limit(Box::new(inner), n)
    }

    /// `p !`
    pub fn cut(inner: Pattern) -> Self {
        Pattern::limit(inner, 1)
    }

    pub fn collect(inner: Pattern) -> Self {
        Pattern::Collect(Collect::new(inner, Reducer::Shared))
    }

    pub fn collect_with(inner: Pattern, reducer: Reducer) -> Self {
        Pattern::Collect(Collect::new(inner, reducer))
    }

    pub fn object_shape(fields: Vec<FieldPattern>, rest: Option<Pattern>) -> Self {
        Pattern::Object(ObjectShape {
            fields,
            rest: rest.map(Box::new),
        })
    }

    pub fn array_shape(items: Vec<Pattern>, rest: Option<Pattern>) -> Self {
        Pattern::Array(ArrayShape {
            items,
            rest: rest.map(Box::new),
        })
    }

    pub fn array_of(inner: Pattern) -> Self {
        Pattern::ArrayOf(Box::new(inner))
    }
}

// Matching

impl Pattern {
    /// All matches of this pattern against `focus`, lazily.
    pub fn matches(&self, focus: Value) -> Matches<'_> {
        match self {
            Pattern::Id => once(Match::whole(focus)),
            Pattern::Fail => empty(),
            Pattern::Where(predicate) => {
                if predicate.test(&focus) {
                    once(Match::whole(focus))
                } else {
                    empty()
                }
            }
            Pattern::Value(expected) => {
                if focus == *expected || *focus.resolved() == *expected {
                    once(Match::whole(focus))
                } else {
                    empty()
                }
            }
            Pattern::Key { name, optional } => primitive::key(name, *optional, &focus),
            Pattern::Index { index, optional } => primitive::index(*index, *optional, &focus),
            Pattern::Slice { start, end } => primitive::slice(*start, *end, &focus),
            Pattern::Regex(regex) => regex.matches(&focus),
            Pattern::Lens(lens) => lens.matches(focus),
            Pattern::Spread => traverse::spread(&focus),
            Pattern::Recursive { max_visits } => {
                Box::new(traverse::Descend::new(focus, *max_visits))
            }
            Pattern::Seq(patterns) => combinator::seq(patterns, focus),
            Pattern::Alt(patterns) => combinator::alt(patterns, focus),
            Pattern::And(inner) => combinator::and(inner, focus),
            Pattern::Limit(inner, n) => Box::new(inner.matches(focus).take(*n)),
            Pattern::Collect(collect) => collect.matches(focus),
            Pattern::Object(shape) => shape.matches(&focus),
            Pattern::Array(shape) => shape.matches(&focus),
            Pattern::ArrayOf(inner) => shape::array_of(inner, &focus),
        }
    }
}

// Printing

fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    let mut chars = key.chars();
    let plain = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        f.write_str(key)
    } else {
        write!(f, "{key:?}")
    }
}

fn write_optional(f: &mut fmt::Formatter<'_>, optional: bool) -> fmt::Result {
    if optional {
        f.write_str("?")
    } else {
        Ok(())
    }
}

/// Print `pattern`, parenthesized unless it is atomic.
fn write_atom(f: &mut fmt::Formatter<'_>, pattern: &Pattern) -> fmt::Result {
    match pattern {
        Pattern::Seq(ps) | Pattern::Alt(ps) if ps.len() > 1 => write!(f, "({pattern})"),
        Pattern::And(_) | Pattern::Limit(..) => write!(f, "({pattern})"),
        _ => write!(f, "{pattern}"),
    }
}

fn write_rest(f: &mut fmt::Formatter<'_>, rest: &Pattern) -> fmt::Result {
    let printed = rest.to_string();
    if printed.starts_with('.') {
        write!(f, "... {printed}")
    } else {
        write!(f, "...{printed}")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Id => f.write_str("_"),
            Pattern::Fail => f.write_str("fail"),
            Pattern::Where(predicate) => write!(f, "where({})", predicate.name()),
            Pattern::Value(value) => write!(f, "{value}"),
            Pattern::Key { name, optional } => {
                f.write_str(".")?;
                write_key(f, name)?;
                write_optional(f, *optional)
            }
            Pattern::Index { index, optional } => {
                write!(f, ".{index}")?;
                write_optional(f, *optional)
            }
            Pattern::Slice { start, end } => {
                f.write_str(".[")?;
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                f.write_str(":")?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                f.write_str("]")
            }
            Pattern::Regex(regex) => write!(f, "{regex}"),
            Pattern::Lens(lens) => write!(f, "lens({})", lens.name()),
            Pattern::Spread => f.write_str("*"),
            Pattern::Recursive { max_visits: 1 } => f.write_str("**"),
            Pattern::Recursive { max_visits } => write!(f, "recursive({max_visits})"),
            Pattern::Seq(patterns) if patterns.is_empty() => f.write_str("_"),
            Pattern::Seq(patterns) => {
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match pattern {
                        Pattern::Alt(ps) if ps.len() > 1 => write!(f, "({pattern})")?,
                        _ if i == 0 => write!(f, "{pattern}")?,
                        _ => write_atom(f, pattern)?,
                    }
                }
                Ok(())
            }
            Pattern::Alt(patterns) if patterns.is_empty() => f.write_str("fail"),
            Pattern::Alt(patterns) => {
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    match pattern {
                        Pattern::Alt(ps) if ps.len() > 1 => write!(f, "({pattern})")?,
                        _ => write!(f, "{pattern}")?,
                    }
                }
                Ok(())
            }
            Pattern::And(inner) => {
                write_postfix_operand(f, inner)?;
                f.write_str(" &")
            }
            Pattern::Limit(inner, 1) => {
                write_postfix_operand(f, inner)?;
                f.write_str(" !")
            }
            Pattern::Limit(inner, n) => write!(f, "limit({inner}, {n})"),
            Pattern::Collect(collect) => write!(f, "collect({})", collect.pattern()),
            Pattern::Object(shape) => {
                f.write_str("{")?;
                for (i, field) in shape.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_key(f, &field.key)?;
                    write_optional(f, field.optional)?;
                    write!(f, ": {}", field.pattern)?;
                }
                if let Some(rest) = &shape.rest {
                    if !shape.fields.is_empty() {
                        f.write_str(", ")?;
                    }
                    write_rest(f, rest)?;
                }
                f.write_str("}")
            }
            Pattern::Array(shape) => {
                f.write_str("[")?;
                for (i, item) in shape.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if let Some(rest) = &shape.rest {
                    if !shape.items.is_empty() {
                        f.write_str(", ")?;
                    }
                    write_rest(f, rest)?;
                }
                f.write_str("]")
            }
            Pattern::ArrayOf(inner) => write!(f, "array_of({inner})"),
        }
    }
}

/// Operand of a postfix `&` or `!`: sequences bind tighter, alternations
/// need parentheses.
fn write_postfix_operand(f: &mut fmt::Formatter<'_>, inner: &Pattern) -> fmt::Result {
    match inner {
        Pattern::Alt(ps) if ps.len() > 1 => write!(f, "({inner})"),
        _ => write!(f, "{inner}"),
    }
}
