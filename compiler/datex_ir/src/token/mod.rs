//! Token types for the expression lexer.
//!
//! The lexer produces a `TokenList` that always ends with `TokenKind::Eof`,
//! so the parser can peek one token ahead without bounds checks.

use super::Span;
use std::fmt;

/// A token with its span in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a dummy token for tests.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds of the data expression language.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// Integer literal, sign included: `3`, `-1`
    Int(i64),
    /// String literal with escapes resolved: `"foo"`
    Str(String),
    /// Identifier: `foo`, `$bar`
    Ident(String),
    /// Interpolation placeholder: `<0>`
    Placeholder(usize),

    /// A run of dots: `.` (1), `..` (2), `...` (3)
    Dots(usize),
    /// A run of stars: `*` (1), `**` (2)
    Stars(usize),

    Question,
    Bang,
    Amp,
    Pipe,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Underscore,

    /// Unrecognized input.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Check if this token can start a base expression.
    pub fn can_start_expr(&self) -> bool {
        matches!(
            self,
            TokenKind::Int(_)
                | TokenKind::Str(_)
                | TokenKind::Ident(_)
                | TokenKind::Placeholder(_)
                | TokenKind::Dots(1)
                | TokenKind::Stars(1 | 2)
                | TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::LBracket
                | TokenKind::Underscore
        )
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Placeholder(_) => "placeholder",
            TokenKind::Dots(1) => "`.`",
            TokenKind::Dots(3) => "`...`",
            TokenKind::Dots(_) => "dots",
            TokenKind::Stars(1) => "`*`",
            TokenKind::Stars(2) => "`**`",
            TokenKind::Stars(_) => "stars",
            TokenKind::Question => "`?`",
            TokenKind::Bang => "`!`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Underscore => "`_`",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "Int({n})"),
            TokenKind::Str(s) => write!(f, "Str({s:?})"),
            TokenKind::Ident(name) => write!(f, "Ident({name})"),
            TokenKind::Placeholder(i) => write!(f, "Placeholder({i})"),
            TokenKind::Dots(n) => write!(f, "Dots({n})"),
            TokenKind::Stars(n) => write!(f, "Stars({n})"),
            _ => write!(f, "{}", self.display_name()),
        }
    }
}

/// A list of tokens terminated by `Eof`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create an empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Add a token.
    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get token at index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Borrow the tokens as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterate over the token kinds, `Eof` included.
    pub fn kinds(&self) -> impl Iterator<Item = &TokenKind> + '_ {
        self.tokens.iter().map(|t| &t.kind)
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.tokens).finish()
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}
