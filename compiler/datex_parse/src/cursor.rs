//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use std::mem::discriminant;

use datex_ir::{Span, Token, TokenKind, TokenList};

use crate::{ParseError, ParseErrorKind};

/// Cursor for navigating tokens.
///
/// Invariant: the token list ends with `Eof` and the cursor never advances
/// past it, so `current()` is always valid.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(tokens: &'a TokenList) -> Self {
        debug_assert!(
            matches!(tokens.as_slice().last(), Some(t) if t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    /// Get the current position in the token stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        *self.current_kind() == TokenKind::Eof
    }

    /// Check if the current token has the same kind as `kind`, ignoring
    /// payloads except for `Dots`/`Stars` run lengths.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        let current = self.current_kind();
        match (current, kind) {
            (TokenKind::Dots(a), TokenKind::Dots(b))
            | (TokenKind::Stars(a), TokenKind::Stars(b)) => a == b,
            _ => discriminant(current) == discriminant(kind),
        }
    }

    /// Advance to the next token, returning the consumed one.
    ///
    /// Stays on `Eof` once reached.
    #[inline]
    pub fn advance(&mut self) -> &'a Token {
        let current = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        current
    }

    /// Consume the current token if it matches.
    #[inline]
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect the current token to be of the given kind, advance and return it.
    #[inline]
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    /// Build an "expected X, found Y" error at the current token.
    #[cold]
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        let kind = match self.current_kind() {
            TokenKind::Error => ParseErrorKind::InvalidToken,
            found => ParseErrorKind::UnexpectedToken {
                expected,
                found: found.display_name(),
            },
        };
        ParseError::new(kind, self.current_span())
    }
}
