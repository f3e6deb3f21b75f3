//! Leaf patterns: predicates, field access, slicing, regexes and lenses.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::errors::{index_out_of_bounds, type_mismatch, EvalResult};
use crate::matching::{empty, failed, once, Match, Matches};
use crate::path::{with_index, with_key};
use crate::value::Value;

// Predicate

type TestFn = dyn Fn(&Value) -> bool + Send + Sync;

/// Named test over a value. The value passed in has its cells read through.
#[derive(Clone)]
pub struct Predicate {
    name: Arc<str>,
    test: Arc<TestFn>,
}

impl Predicate {
    pub fn new(
        name: impl Into<Arc<str>>,
        test: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Predicate {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.test)(&value.resolved())
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}

// Lens

type GetFn = dyn Fn(&Value) -> EvalResult + Send + Sync;
type SetFn = dyn Fn(&Value, Value) -> EvalResult + Send + Sync;

/// Host-defined view of a focus.
///
/// A getter error means "no match" rather than failure; setter errors
/// propagate out of the replace call.
#[derive(Clone)]
pub struct Lens {
    name: Arc<str>,
    get: Arc<GetFn>,
    set: Arc<SetFn>,
}

impl Lens {
    pub fn new(
        name: impl Into<Arc<str>>,
        get: impl Fn(&Value) -> EvalResult + Send + Sync + 'static,
        set: impl Fn(&Value, Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Lens {
            name: name.into(),
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    /// Lens whose setter returns the new value unchanged.
    pub fn getter(
        name: impl Into<Arc<str>>,
        get: impl Fn(&Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Lens::new(name, get, |_, new_value| Ok(new_value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(super) fn matches(&self, focus: Value) -> Matches<'static> {
        match (self.get)(&focus) {
            Ok(value) => {
                let set = Arc::clone(&self.set);
                once(Match::new(value, move |new_value| set(&focus, new_value)))
            }
            Err(err) => {
                tracing::trace!(lens = %self.name, error = %err, "lens getter failed, no match");
                empty()
            }
        }
    }
}

impl fmt::Debug for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lens({})", self.name)
    }
}

// RegexPattern

/// A compiled regex plus the global flag.
///
/// Positions come from the regex iterators, so one pattern can be used
/// concurrently and repeatedly without carrying state between runs.
#[derive(Clone, Debug)]
pub struct RegexPattern {
    regex: Regex,
    global: bool,
}

impl RegexPattern {
    /// Yields only the first match.
    pub fn new(regex: Regex) -> Self {
        RegexPattern {
            regex,
            global: false,
        }
    }

    /// Yields every non-overlapping match, left to right.
    pub fn global(regex: Regex) -> Self {
        RegexPattern {
            regex,
            global: true,
        }
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    pub(super) fn matches(&self, focus: &Value) -> Matches<'static> {
        let Some(text) = focus.resolved().as_str().map(str::to_owned) else {
            return empty();
        };
        let spans: Vec<(usize, usize)> = if self.global {
            self.regex.find_iter(&text).map(|m| (m.start(), m.end())).collect()
        } else {
            self.regex.find(&text).map(|m| (m.start(), m.end())).into_iter().collect()
        };
        let text: Arc<str> = text.into();
        Box::new(spans.into_iter().map(move |(start, end)| {
            let text = Arc::clone(&text);
            let found = Value::string(&text[start..end]);
            Ok(Match::new(found, move |new_value| {
                let Some(replacement) = new_value.display_value() else {
                    return Err(type_mismatch("string", new_value.type_name()));
                };
                Ok(Value::string(format!(
                    "{}{replacement}{}",
                    &text[..start],
                    &text[end..]
                )))
            }))
        }))
    }
}

impl fmt::Display for RegexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.regex.as_str(), if self.global { "g" } else { "" })
    }
}

// Field access

/// Match for a slot that does not exist yet. Writing `Undefined` back
/// leaves `original` as it was; anything else goes through `fill`.
fn absent(
    original: Value,
    fill: impl Fn(Value) -> EvalResult + Send + Sync + 'static,
) -> Matches<'static> {
    once(Match::new(Value::Undefined, move |new_value| {
        if matches!(new_value, Value::Undefined) {
            Ok(original.clone())
        } else {
            fill(new_value)
        }
    }))
}

pub(super) fn key(name: &str, optional: bool, focus: &Value) -> Matches<'static> {
    match focus.resolved().into_owned() {
        Value::Map(object) => {
            let name = name.to_owned();
            match object.get(&name).cloned() {
                Some(found) => {
                    once(Match::new(found, move |new_value| {
                        Ok(with_key(&object, &name, new_value))
                    }))
                }
                None if optional => absent(focus.clone(), move |new_value| {
                    Ok(with_key(&object, &name, new_value))
                }),
                None => empty(),
            }
        }
        Value::Undefined | Value::Null if optional => {
            let name = name.to_owned();
            absent(focus.clone(), move |new_value| {
                Ok(Value::map([(name.clone(), new_value)]))
            })
        }
        other if optional => {
            let got = other.type_name();
            absent(focus.clone(), move |_| Err(type_mismatch("object", got)))
        }
        _ => empty(),
    }
}

/// Most `Undefined` filler an optional index may add when it writes past
/// the end of a list.
const MAX_INDEX_FILL: usize = 1 << 16;

/// Position of `index` in a sequence of `len`, counting negative indices
/// from the end. `None` when it lands before the start.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let position = if index < 0 { len + index } else { index };
    usize::try_from(position).ok()
}

/// Optional index `i` missing from a list of `len`; `fill` writes a
/// position past the end.
fn absent_index(
    original: Value,
    len: usize,
    i: i64,
    fill: impl Fn(usize, Value) -> EvalResult + Send + Sync + 'static,
) -> Matches<'static> {
    match normalize_index(i, len) {
        Some(position) if position.saturating_sub(len) <= MAX_INDEX_FILL => {
            absent(original, move |new_value| fill(position, new_value))
        }
        _ => absent(original, move |_| Err(index_out_of_bounds(i, len))),
    }
}

pub(super) fn index(i: i64, optional: bool, focus: &Value) -> Matches<'static> {
    match focus.resolved().into_owned() {
        Value::List(items) => {
            let len = items.len();
            match normalize_index(i, len) {
                Some(position) if position < len => {
                    let found = items[position].clone();
                    once(Match::new(found, move |new_value| {
                        Ok(with_index(&items, position, new_value))
                    }))
                }
                _ if optional => {
                    absent_index(focus.clone(), len, i, move |position, new_value| {
                        Ok(with_index(&items, position, new_value))
                    })
                }
                _ => empty(),
            }
        }
        Value::Map(_) => key(&i.to_string(), optional, focus),
        Value::Undefined | Value::Null if optional => {
            absent_index(focus.clone(), 0, i, |position, new_value| {
                Ok(with_index(&[], position, new_value))
            })
        }
        other => failed(type_mismatch("array", other.type_name())),
    }
}

// Slicing

/// Clamp a slice bound the way host slicing does: negative counts from the
/// end, everything is clamped into `0..=len`.
fn clamp_bound(bound: i64, len: usize) -> usize {
    match normalize_index(bound, len) {
        Some(position) => position.min(len),
        None => 0,
    }
}

fn slice_range(start: Option<i64>, end: Option<i64>, len: usize) -> (usize, usize) {
    let from = start.map_or(0, |b| clamp_bound(b, len));
    let to = end.map_or(len, |b| clamp_bound(b, len));
    (from, to.max(from))
}

pub(super) fn slice(start: Option<i64>, end: Option<i64>, focus: &Value) -> Matches<'static> {
    match focus.resolved().into_owned() {
        Value::List(items) => {
            let (from, to) = slice_range(start, end, items.len());
            let found = Value::list(items[from..to].to_vec());
            once(Match::new(found, move |new_value| {
                let Some(middle) = new_value.resolved().as_list().map(<[Value]>::to_vec) else {
                    return Err(type_mismatch("array", new_value.type_name()));
                };
                let mut spliced = Vec::with_capacity(items.len() - (to - from) + middle.len());
                spliced.extend_from_slice(&items[..from]);
                spliced.extend(middle);
                spliced.extend_from_slice(&items[to..]);
                Ok(Value::list(spliced))
            }))
        }
        Value::Str(text) => {
            let chars: Vec<char> = text.chars().collect();
            let (from, to) = slice_range(start, end, chars.len());
            let found = Value::string(chars[from..to].iter().collect::<String>());
            let prefix: String = chars[..from].iter().collect();
            let suffix: String = chars[to..].iter().collect();
            once(Match::new(found, move |new_value| {
                let Some(middle) = new_value.resolved().as_str().map(str::to_owned) else {
                    return Err(type_mismatch("string", new_value.type_name()));
                };
                Ok(Value::string(format!("{prefix}{middle}{suffix}")))
            }))
        }
        other => failed(type_mismatch("array or string", other.type_name())),
    }
}
