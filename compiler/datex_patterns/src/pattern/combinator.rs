//! Combinators over sub-patterns.

use std::sync::Arc;

use crate::errors::{arity_mismatch, type_mismatch, EvalError};
use crate::matching::{failed, once, Match, Matches};
use crate::operations::apply_jointly;
use crate::value::Value;

use super::Pattern;

/// Run each pattern on the matches of the one before it.
///
/// The first pattern varies slowest; replacing goes back out through every
/// layer.
pub(super) fn seq<'p>(patterns: &'p [Pattern], focus: Value) -> Matches<'p> {
    patterns
        .iter()
        .fold(once(Match::whole(focus)), |stream, pattern| {
            Box::new(stream.flat_map(move |outer| -> Matches<'p> {
                match outer {
                    Ok(outer) => Box::new(
                        pattern
                            .matches(outer.value.clone())
                            .map(move |inner| inner.map(|inner| outer.then(inner))),
                    ),
                    Err(err) => failed(err),
                }
            }))
        })
}

/// Every match of every alternative, in order.
pub(super) fn alt<'p>(patterns: &'p [Pattern], focus: Value) -> Matches<'p> {
    Box::new(
        patterns
            .iter()
            .flat_map(move |pattern| pattern.matches(focus.clone())),
    )
}

/// Yield the focus itself when `inner` matches it.
pub(super) fn and<'p>(inner: &'p Pattern, focus: Value) -> Matches<'p> {
    Box::new(
        std::iter::once_with(move || match inner.matches(focus.clone()).next() {
            Some(Ok(_)) => Some(Ok(Match::whole(focus))),
            Some(Err(err)) => Some(Err(err)),
            None => None,
        })
        .flatten(),
    )
}

/// How a `collect` replacement is spread over the collected positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Reducer {
    /// The same replacement goes to every position.
    #[default]
    Shared,
    /// The replacement is a list with one entry per position.
    PerPosition,
}

/// Gathers every match of a pattern into one list-valued match.
#[derive(Clone, Debug)]
pub struct Collect {
    pattern: Arc<Pattern>,
    reducer: Reducer,
}

impl Collect {
    pub fn new(pattern: Pattern, reducer: Reducer) -> Self {
        Collect {
            pattern: Arc::new(pattern),
            reducer,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn reducer(&self) -> Reducer {
        self.reducer
    }

    pub(super) fn matches(&self, focus: Value) -> Matches<'_> {
        let pattern = Arc::clone(&self.pattern);
        let reducer = self.reducer;
        Box::new(
            std::iter::once_with(move || -> Result<Match, EvalError> {
                let found = pattern
                    .matches(focus.clone())
                    .map(|m| m.map(|m| m.value))
                    .collect::<Result<Vec<_>, _>>()?;
                let count = found.len();
                Ok(Match::new(Value::list(found), move |new_value| {
                    let edits = match reducer {
                        Reducer::Shared => vec![new_value; count],
                        Reducer::PerPosition => {
                            let Some(edits) = new_value.resolved().as_list().map(<[Value]>::to_vec)
                            else {
                                return Err(type_mismatch("array", new_value.type_name()));
                            };
                            if edits.len() != count {
                                return Err(arity_mismatch(count, edits.len()));
                            }
                            edits
                        }
                    };
                    apply_jointly(&pattern, &focus, count, |ordinal, _| {
                        Ok(edits[ordinal].clone())
                    })
                }))
            }),
        )
    }
}

#[cfg(test)]
mod tests;
