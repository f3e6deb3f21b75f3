//! The match record and the lazy match stream.
//!
//! A pattern applied to a focus yields `Matches`: a pull-based iterator of
//! `Result<Match, EvalError>`. Each `Match` carries the matched value and a
//! replacer that rebuilds the whole focus around a new value for that
//! position. Replacers close over owned data only, so a match outlives the
//! iterator that produced it.

use std::fmt;
use std::sync::Arc;

use crate::errors::{EvalError, EvalResult};
use crate::value::Value;

/// Rebuilds the focus with a new value at the matched position.
pub type Replacer = Arc<dyn Fn(Value) -> EvalResult + Send + Sync>;

/// Lazy stream of matches borrowed from a pattern.
pub type Matches<'p> = Box<dyn Iterator<Item = Result<Match, EvalError>> + 'p>;

/// A single match: the value found and how to put a new one in its place.
#[derive(Clone)]
pub struct Match {
    pub value: Value,
    replace: Replacer,
}

impl Match {
    pub fn new(
        value: Value,
        replace: impl Fn(Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Match {
            value,
            replace: Arc::new(replace),
        }
    }

    /// Match whose replacement simply becomes the new focus.
    pub fn whole(value: Value) -> Self {
        Match::new(value, Ok)
    }

    /// Rebuild the focus with `new_value` at this match's position.
    pub fn replace(&self, new_value: Value) -> EvalResult {
        (self.replace)(new_value)
    }

    /// Compose with a match found inside this one's value: the result
    /// carries the inner value and replaces through both layers.
    pub(crate) fn then(&self, inner: Match) -> Match {
        let outer = Arc::clone(&self.replace);
        let Match {
            value,
            replace: inner_replace,
        } = inner;
        Match {
            value,
            replace: Arc::new(move |new_value| outer(inner_replace(new_value)?)),
        }
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match").field("value", &self.value).finish_non_exhaustive()
    }
}

/// Exactly one match.
pub(crate) fn once<'p>(m: Match) -> Matches<'p> {
    Box::new(std::iter::once(Ok(m)))
}

/// No match.
pub(crate) fn empty<'p>() -> Matches<'p> {
    Box::new(std::iter::empty())
}

/// A stream that reports a single error.
pub(crate) fn failed<'p>(err: EvalError) -> Matches<'p> {
    Box::new(std::iter::once(Err(err)))
}
