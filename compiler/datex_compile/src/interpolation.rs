//! Host items referenced from source text by `<n>` placeholders.

use datex_patterns::{Pattern, Predicate, RegexPattern, Value};

/// An item supplied alongside the source text.
///
/// What an item compiles to depends on where its placeholder appears: as a
/// whole pattern a `Value` matches by equality, a `Predicate` becomes a
/// `where`, a `Regex` matches strings and a `Pattern` is spliced in as is.
/// In key, index and slice positions only values are accepted.
#[derive(Clone, Debug)]
pub enum Interpolation {
    Value(Value),
    Predicate(Predicate),
    Regex(RegexPattern),
    Pattern(Pattern),
}

impl Interpolation {
    /// Description used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Interpolation::Value(Value::Str(_)) => "a string",
            Interpolation::Value(Value::Int(_)) => "an integer",
            Interpolation::Value(_) => "a value",
            Interpolation::Predicate(_) => "a predicate",
            Interpolation::Regex(_) => "a regex",
            Interpolation::Pattern(_) => "a pattern",
        }
    }
}

impl From<Value> for Interpolation {
    fn from(value: Value) -> Self {
        Interpolation::Value(value)
    }
}

impl From<Predicate> for Interpolation {
    fn from(predicate: Predicate) -> Self {
        Interpolation::Predicate(predicate)
    }
}

impl From<RegexPattern> for Interpolation {
    fn from(regex: RegexPattern) -> Self {
        Interpolation::Regex(regex)
    }
}

impl From<Pattern> for Interpolation {
    fn from(pattern: Pattern) -> Self {
        Interpolation::Pattern(pattern)
    }
}

impl From<i64> for Interpolation {
    fn from(n: i64) -> Self {
        Interpolation::Value(Value::int(n))
    }
}

impl From<&str> for Interpolation {
    fn from(s: &str) -> Self {
        Interpolation::Value(Value::string(s))
    }
}
