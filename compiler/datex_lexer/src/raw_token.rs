//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! literal payloads are cooked into `TokenKind`s.

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r"\.+", |lex| lex.slice().len())]
    Dots(usize),
    #[regex(r"\*+", |lex| lex.slice().len())]
    Stars(usize),

    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("_", priority = 10)]
    Underscore,

    // Out-of-range integers fail the callback and surface as `Error`.
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"<[0-9]+>", |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].parse::<usize>().ok()
    })]
    Placeholder(usize),

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,
}
