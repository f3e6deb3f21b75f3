//! Lexer for data expressions using logos.
//!
//! Produces a `TokenList` that always ends with `TokenKind::Eof`. Unknown
//! input becomes `TokenKind::Error` tokens; the parser reports them with
//! their spans, so lexing itself never fails.

mod escape;
mod raw_token;

use datex_ir::{Span, Token, TokenKind, TokenList};
use logos::Logos;

use crate::escape::unescape_string;
use crate::raw_token::RawToken;

/// Lex source text into tokens.
pub fn lex(source: &str) -> TokenList {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let kind = match token_result {
            Ok(raw) => convert_token(raw, logos.slice()),
            Err(()) => TokenKind::Error,
        };
        result.push(Token::new(kind, span));
    }

    let eof = Span::from_range(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof));

    result
}

/// Convert a raw token to a `TokenKind`, cooking literal payloads.
fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Dots(n) => TokenKind::Dots(n),
        RawToken::Stars(n) => TokenKind::Stars(n),
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::Placeholder(i) => TokenKind::Placeholder(i),
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
        RawToken::Str => TokenKind::Str(unescape_string(&slice[1..slice.len() - 1])),
        RawToken::Question => TokenKind::Question,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Underscore => TokenKind::Underscore,
    }
}
