//! Debug commands: `lex` and `parse` for inspecting the front-end.

use crate::{parse, render_error, Error};

use super::fail;

/// Lex an expression and display the token stream.
pub fn lex_expr(source: &str) {
    let tokens = datex_lexer::lex(source);

    println!("Tokens for {source:?} ({} tokens):", tokens.len());
    for token in tokens.as_slice() {
        println!("  {token:?}");
    }
}

/// Parse an expression and print its syntax tree as JSON.
pub fn parse_expr(source: &str) {
    let expr = match parse(source) {
        Ok(expr) => expr,
        Err(err) => fail(&render_error(source, &Error::from(err))),
    };
    match serde_json::to_string_pretty(&expr) {
        Ok(text) => println!("{text}"),
        Err(e) => fail(&format!("error: {e}")),
    }
}
