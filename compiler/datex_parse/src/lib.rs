//! Recursive descent parser for data expressions.
//!
//! Turns a `TokenList` from `datex_lexer` into a `datex_ir::Expr`. The
//! grammar is small enough that the parser stops at the first error; there
//! is no recovery.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};

use datex_ir::{Expr, TokenKind, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse a complete expression; all input must be consumed.
    pub fn parse_complete(mut self) -> Result<Expr, ParseError> {
        if self.cursor.is_at_end() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyExpression,
                self.cursor.current_span(),
            ));
        }
        let expr = self.parse_expr()?;
        if *self.cursor.current_kind() == TokenKind::Error {
            return Err(self.cursor.unexpected("end of input"));
        }
        if !self.cursor.is_at_end() {
            let found = self.cursor.current_kind().display_name();
            return Err(ParseError::new(
                ParseErrorKind::TrailingInput { found },
                self.cursor.current_span(),
            ));
        }
        Ok(expr)
    }
}

/// Parse a token list.
pub fn parse(tokens: &TokenList) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse_complete()
}

/// Lex and parse source text.
pub fn parse_source(source: &str) -> Result<Expr, ParseError> {
    let tokens = datex_lexer::lex(source);
    let result = parse(&tokens);
    match &result {
        Ok(expr) => tracing::trace!(kind = expr.kind.name(), "parsed expression"),
        Err(err) => tracing::debug!(%err, span = %err.span, "parse failed"),
    }
    result
}
