//! Operations: the public surface for running a pattern against data.
//!
//! Each function has a method twin on `Pattern`, so `test(&p, &v)` and
//! `p.test(&v)` are interchangeable.

use crate::errors::{EvalError, EvalResult};
use crate::matching::{Match, Matches};
use crate::pattern::Pattern;
use crate::value::Value;

/// Whether `pattern` matches `focus` at least once.
pub fn test(pattern: &Pattern, focus: &Value) -> Result<bool, EvalError> {
    pattern.matches(focus.clone()).next().transpose().map(|m| m.is_some())
}

/// The first matched value, if any.
pub fn match_first(pattern: &Pattern, focus: &Value) -> Result<Option<Value>, EvalError> {
    pattern
        .matches(focus.clone())
        .next()
        .transpose()
        .map(|m| m.map(|m| m.value))
}

/// Every matched value, lazily.
pub fn match_all<'p>(
    pattern: &'p Pattern,
    focus: &Value,
) -> impl Iterator<Item = EvalResult> + 'p {
    pattern.matches(focus.clone()).map(|m| m.map(|m| m.value))
}

/// Replace the first match with `new_value`; the focus is returned
/// unchanged when nothing matches.
pub fn replace(pattern: &Pattern, focus: &Value, new_value: Value) -> EvalResult {
    match pattern.matches(focus.clone()).next() {
        Some(found) => found?.replace(new_value),
        None => Ok(focus.clone()),
    }
}

/// For every match, the focus with that one match transformed by `f`.
///
/// Each result is independent: edits from one match never show up in the
/// next.
pub fn update_all<'p, F>(
    pattern: &'p Pattern,
    focus: &Value,
    mut f: F,
) -> impl Iterator<Item = EvalResult> + 'p
where
    F: FnMut(&Value) -> EvalResult + 'p,
{
    pattern
        .matches(focus.clone())
        .map(move |found| {
            let found = found?;
            found.replace(f(&found.value)?)
        })
}

/// Transform every match with `f` and apply all edits to one result.
pub fn rewrite<F>(pattern: &Pattern, focus: &Value, mut f: F) -> EvalResult
where
    F: FnMut(&Value) -> EvalResult,
{
    let mut count = 0;
    for found in pattern.matches(focus.clone()) {
        found?;
        count += 1;
    }
    apply_jointly(pattern, focus, count, |_, old| f(old))
}

/// The `n`th match (zero-based), surfacing errors from any earlier item.
fn nth_match(stream: Matches<'_>, n: usize) -> Result<Option<Match>, EvalError> {
    for (seen, found) in stream.enumerate() {
        let found = found?;
        if seen == n {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Apply `count` edits to `focus`, last match first.
///
/// Every step re-runs `pattern` on the intermediate result so positions stay
/// valid after earlier edits changed the shape. A match whose ordinal no
/// longer exists is skipped.
pub(crate) fn apply_jointly<F>(
    pattern: &Pattern,
    focus: &Value,
    count: usize,
    mut edit: F,
) -> EvalResult
where
    F: FnMut(usize, &Value) -> EvalResult,
{
    let mut current = focus.clone();
    for ordinal in (0..count).rev() {
        let Some(found) = nth_match(pattern.matches(current.clone()), ordinal)? else {
            tracing::debug!(ordinal, "match vanished during joint edit, skipping");
            continue;
        };
        let new_value = edit(ordinal, &found.value)?;
        current = found.replace(new_value)?;
    }
    Ok(current)
}

impl Pattern {
    pub fn test(&self, focus: &Value) -> Result<bool, EvalError> {
        test(self, focus)
    }

    pub fn match_first(&self, focus: &Value) -> Result<Option<Value>, EvalError> {
        match_first(self, focus)
    }

    pub fn match_all<'p>(&'p self, focus: &Value) -> impl Iterator<Item = EvalResult> + 'p {
        match_all(self, focus)
    }

    pub fn replace(&self, focus: &Value, new_value: Value) -> EvalResult {
        replace(self, focus, new_value)
    }

    pub fn update_all<'p, F>(&'p self, focus: &Value, f: F) -> impl Iterator<Item = EvalResult> + 'p
    where
        F: FnMut(&Value) -> EvalResult + 'p,
    {
        update_all(self, focus, f)
    }

    pub fn rewrite<F>(&self, focus: &Value, f: F) -> EvalResult
    where
        F: FnMut(&Value) -> EvalResult,
    {
        rewrite(self, focus, f)
    }
}
