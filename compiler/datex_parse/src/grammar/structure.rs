//! Object and array patterns.

use datex_ir::{ArrayEntry, Expr, ExprKind, Literal, ObjectEntry, TokenKind};

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// `{ key?: expr, ...expr }` with an optional trailing comma.
    pub(super) fn parse_object(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance().span;
        self.in_error_context(ErrorContext::ObjectPattern, |p| {
            let mut entries = Vec::new();
            while !p.cursor.check(&TokenKind::RBrace) {
                entries.push(p.parse_object_entry()?);
                if !p.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            let close = p.cursor.expect(&TokenKind::RBrace)?.span;
            Ok(Expr::new(ExprKind::Object(entries), open.merge(close)))
        })
    }

    fn parse_object_entry(&mut self) -> Result<ObjectEntry, ParseError> {
        if self.cursor.eat(&TokenKind::Dots(3)) {
            return Ok(ObjectEntry::Rest(self.parse_expr()?));
        }
        let key = match self.cursor.current_kind() {
            TokenKind::Ident(name) => Literal::Ident(name.clone()),
            TokenKind::Underscore => Literal::Ident("_".to_string()),
            TokenKind::Str(s) => Literal::Str(s.clone()),
            TokenKind::Int(n) => Literal::Int(*n),
            TokenKind::Placeholder(i) => Literal::Placeholder(*i),
            _ => return Err(self.cursor.unexpected("object key or `...`")),
        };
        self.cursor.advance();
        let optional = self.cursor.eat(&TokenKind::Question);
        self.cursor.expect(&TokenKind::Colon)?;
        let value = self.parse_expr()?;
        Ok(ObjectEntry::Field {
            key,
            optional,
            value,
        })
    }

    /// `[ expr, ...expr ]` with an optional trailing comma.
    pub(super) fn parse_array(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance().span;
        self.in_error_context(ErrorContext::ArrayPattern, |p| {
            let mut entries = Vec::new();
            while !p.cursor.check(&TokenKind::RBracket) {
                let entry = if p.cursor.eat(&TokenKind::Dots(3)) {
                    ArrayEntry::Rest(p.parse_expr()?)
                } else {
                    ArrayEntry::Item(p.parse_expr()?)
                };
                entries.push(entry);
                if !p.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            let close = p.cursor.expect(&TokenKind::RBracket)?.span;
            Ok(Expr::new(ExprKind::Array(entries), open.merge(close)))
        })
    }
}
