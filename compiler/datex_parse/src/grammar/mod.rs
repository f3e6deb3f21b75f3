//! Grammar productions.
//!
//! ```text
//! Expr  := Seq ("|" Seq)*
//! Seq   := Base (Base | "!" | "&")*
//! Base  := "(" Expr ")" | "{" Object "}" | "[" Array "]"
//!        | "." Key "?"? | "." "[" Bound? ":" Bound? "]"
//!        | "**" | "*" | "_" | Str | Int | Placeholder
//! ```
//!
//! `!` and `&` apply to everything sequenced so far, so `.a .b ! .c` is
//! `Seq(Cut(Seq(.a, .b)), .c)`.

mod structure;

use datex_ir::{Expr, ExprKind, Literal, Span, TokenKind};

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Run a production, tagging any error with what was being parsed.
    pub(crate) fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|e| e.in_context(context))
    }

    /// Parse an alternation: `Seq ("|" Seq)*`, left-associative.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_seq()?;
        while self.cursor.eat(&TokenKind::Pipe) {
            let right = self.parse_seq()?;
            let span = left.span.merge(right.span);
            left = Expr::new(ExprKind::Alt(Box::new(left), Box::new(right)), span);
        }
        Ok(left)
    }

    /// Parse a sequence with its postfix `!` and `&` operators.
    fn parse_seq(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_base()?;
        loop {
            let kind = self.cursor.current_kind();
            left = match kind {
                TokenKind::Bang | TokenKind::Amp => {
                    let op = self.cursor.advance();
                    let span = left.span.merge(op.span);
                    let inner = Box::new(left);
                    let kind = if op.kind == TokenKind::Bang {
                        ExprKind::Cut(inner)
                    } else {
                        ExprKind::And(inner)
                    };
                    Expr::new(kind, span)
                }
                // Dots and star runs of any length go to `parse_base` so that
                // malformed runs get a precise error instead of "trailing input".
                k if k.can_start_expr()
                    || matches!(k, TokenKind::Dots(_) | TokenKind::Stars(_)) =>
                {
                    let right = self.parse_base()?;
                    let span = left.span.merge(right.span);
                    Expr::new(ExprKind::Seq(Box::new(left), Box::new(right)), span)
                }
                _ => break,
            };
        }
        Ok(left)
    }

    /// Parse one atomic expression.
    fn parse_base(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let start = token.span;
        let kind = match &token.kind {
            TokenKind::LParen => return self.parse_group(),
            TokenKind::LBrace => return self.parse_object(),
            TokenKind::LBracket => return self.parse_array(),
            TokenKind::Dots(1) => return self.parse_access(),
            TokenKind::Dots(count) => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedDots { count: *count },
                    start,
                ))
            }
            TokenKind::Stars(1) => ExprKind::Spread,
            TokenKind::Stars(2) => ExprKind::Recursive,
            TokenKind::Stars(count) => {
                return Err(ParseError::new(
                    ParseErrorKind::TooManyStars { count: *count },
                    start,
                ))
            }
            TokenKind::Underscore => ExprKind::Id,
            TokenKind::Str(s) => ExprKind::Literal(Literal::Str(s.clone())),
            TokenKind::Int(n) => ExprKind::Literal(Literal::Int(*n)),
            TokenKind::Placeholder(i) => ExprKind::Literal(Literal::Placeholder(*i)),
            TokenKind::Ident(name) => {
                return Err(ParseError::new(
                    ParseErrorKind::BareIdentifier { name: name.clone() },
                    start,
                ))
            }
            _ => return Err(self.cursor.unexpected("expression")),
        };
        self.cursor.advance();
        Ok(Expr::new(kind, start))
    }

    /// `( Expr )`; the result keeps the inner node but spans the parentheses.
    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance().span;
        self.in_error_context(ErrorContext::Group, |p| {
            let inner = p.parse_expr()?;
            let close = p.cursor.expect(&TokenKind::RParen)?.span;
            Ok(Expr::new(inner.kind, open.merge(close)))
        })
    }

    /// `.key`, `."key"`, `.<n>`, `.3`, `.-1` (each optionally `?`) or `.[a:b]`.
    fn parse_access(&mut self) -> Result<Expr, ParseError> {
        let dot = self.cursor.advance().span;
        let (key, is_index) = match self.cursor.current_kind() {
            TokenKind::LBracket => return self.parse_slice(dot),
            TokenKind::Ident(name) => (Literal::Ident(name.clone()), false),
            TokenKind::Underscore => (Literal::Ident("_".to_string()), false),
            TokenKind::Str(s) => (Literal::Str(s.clone()), false),
            TokenKind::Placeholder(i) => (Literal::Placeholder(*i), false),
            TokenKind::Int(n) => (Literal::Int(*n), true),
            _ => {
                return Err(self
                    .cursor
                    .unexpected("key, index or slice")
                    .in_context(ErrorContext::Key))
            }
        };
        self.cursor.advance();
        let optional = self.cursor.eat(&TokenKind::Question);
        let kind = if is_index {
            ExprKind::Index {
                index: key,
                optional,
            }
        } else {
            ExprKind::Key { key, optional }
        };
        Ok(Expr::new(kind, dot.merge(self.cursor.previous_span())))
    }

    /// `[ Bound? : Bound? ]` after the dot.
    fn parse_slice(&mut self, dot: Span) -> Result<Expr, ParseError> {
        self.in_error_context(ErrorContext::Slice, |p| {
            p.cursor.expect(&TokenKind::LBracket)?;
            let from = p.parse_bound()?;
            p.cursor.expect(&TokenKind::Colon)?;
            let to = p.parse_bound()?;
            let close = p.cursor.expect(&TokenKind::RBracket)?.span;
            Ok(Expr::new(ExprKind::Slice { from, to }, dot.merge(close)))
        })
    }

    fn parse_bound(&mut self) -> Result<Option<Literal>, ParseError> {
        let bound = match self.cursor.current_kind() {
            TokenKind::Int(n) => Literal::Int(*n),
            TokenKind::Placeholder(i) => Literal::Placeholder(*i),
            TokenKind::Colon | TokenKind::RBracket => return Ok(None),
            _ => return Err(self.cursor.unexpected("integer or placeholder")),
        };
        self.cursor.advance();
        Ok(Some(bound))
    }
}
