//! Parse error types.
//!
//! Errors carry the span of the offending token and, where known, the
//! construct being parsed for "while parsing X" messages.

use std::fmt;

use datex_ir::Span;

/// Construct being parsed when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    Group,
    ObjectPattern,
    ArrayPattern,
    Slice,
    Key,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Group => "a parenthesized expression",
            Self::ObjectPattern => "an object pattern",
            Self::ArrayPattern => "an array pattern",
            Self::Slice => "a slice",
            Self::Key => "a key access",
        }
    }
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("empty expression")]
    EmptyExpression,
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid token")]
    InvalidToken,
    #[error("unexpected input after expression: {found}")]
    TrailingInput { found: &'static str },
    #[error("bare identifier `{name}`; use `.{name}` for a key or \"{name}\" for a string")]
    BareIdentifier { name: String },
    #[error("{count} stars in a row; use `*` for spread or `**` for recursive descent")]
    TooManyStars { count: usize },
    #[error("unexpected run of {count} dots")]
    UnexpectedDots { count: usize },
}

/// Parse error with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            context: None,
        }
    }

    /// Attach a context unless a more specific one is already set.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(context) = self.context {
            write!(f, " while parsing {}", context.description())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
