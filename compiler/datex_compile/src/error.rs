//! Compile errors.
//!
//! Every error points at the syntax node it came from, so diagnostics can
//! underline the offending part of the source.

use std::fmt;

use datex_ir::Span;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileErrorKind {
    #[error("bare identifier `{name}`; use `.{name}` for a key or \"{name}\" for a string")]
    BareIdentifier { name: String },

    #[error("placeholder <{index}> has no interpolated item ({supplied} supplied)")]
    MissingInterpolation { index: usize, supplied: usize },

    #[error("placeholder <{index}> holds {found}, which cannot be used as {position}")]
    InvalidInterpolation {
        index: usize,
        found: &'static str,
        position: &'static str,
    },

    #[error("object pattern has more than one rest entry")]
    DuplicateRest,

    #[error("rest entry must come last in an array pattern")]
    RestNotLast,

    #[error("{found} literal cannot be used as {position}")]
    InvalidLiteral {
        found: &'static str,
        position: &'static str,
    },
}

/// Compile error with the span of the offending node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub span: Span,
}

impl CompileError {
    pub fn new(kind: CompileErrorKind, span: Span) -> Self {
        CompileError { kind, span }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for CompileError {}
