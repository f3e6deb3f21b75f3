//! DatEx IR - syntax types shared by the front-end and the compiler.
//!
//! This crate contains the data structures that flow between the stages of
//! the expression pipeline:
//! - Spans for source locations
//! - Tokens and `TokenList` for lexer output
//! - Expression trees (`Expr`) for parser output
//!
//! Nothing here knows how to lex, parse or evaluate; the crate only describes
//! shapes so that the lexer, parser and compiler can evolve independently.
//!
//! With the `serde` feature every type derives `Serialize` and `Deserialize`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod span;
mod token;

pub use ast::{ArrayEntry, Expr, ExprKind, Literal, ObjectEntry};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
