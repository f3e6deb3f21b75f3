//! `DatEx` - data expressions over tree-shaped data.
//!
//! This crate glues the pipeline together for embedders and for the
//! `datex` binary:
//!
//! ```text
//! source ──lex──▶ tokens ──parse──▶ Expr ──compile(items)──▶ Pattern
//! ```
//!
//! `dx` is the usual entry point. Placeholders `<n>` in the source refer to
//! the n-th interpolated item:
//!
//! ```text
//! let p = dx(".users * {name: <0>, age: _}", &[Interpolation::from("ada")])?;
//! let older = p.rewrite(&doc, |m| bump_age(m))?;
//! ```
//!
//! The `json` module converts between `serde_json` documents and values,
//! `render_error` turns an `Error` into a source-annotated diagnostic.

pub mod commands;
mod json;
mod report;

use std::sync::Once;

use datex_ir::{Expr, Span};

pub use datex_compile::{compile, CompileError, CompileErrorKind, Interpolation};
pub use datex_parse::{ParseError, ParseErrorKind};
pub use datex_patterns::{EvalError, Pattern, Value};
pub use json::{from_json, to_json, JsonError};
pub use report::render_error;

/// Failure to turn source text into a pattern.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl Error {
    /// Source span of the offending syntax.
    pub fn span(&self) -> Span {
        match self {
            Error::Parse(err) => err.span,
            Error::Compile(err) => err.span,
        }
    }
}

/// Parse source text into a syntax tree.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    datex_parse::parse_source(source)
}

/// Parse and compile `source`, resolving placeholders against `items`.
pub fn dx(source: &str, items: &[Interpolation]) -> Result<Pattern, Error> {
    let expr = parse(source)?;
    Ok(compile(&expr, items)?)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=datex_patterns=trace`
/// or `RUST_LOG=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
