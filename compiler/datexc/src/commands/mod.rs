//! Command handlers for the `datex` CLI.
//!
//! Handlers print their results to stdout and exit the process on error:
//! status 2 for bad input (unreadable files, invalid JSON, expressions that
//! do not compile, evaluation errors). `test` additionally exits with 1
//! when nothing matches.

mod debug;
mod run;

pub use debug::{lex_expr, parse_expr};
pub use run::{match_expr, replace_expr, rewrite_expr, test_expr};

use std::io::Read;

use datex_patterns::{Pattern, Value};

use crate::{dx, from_json, render_error, to_json};

/// Exit status for malformed input of any kind.
pub const EXIT_ERROR: i32 = 2;

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(EXIT_ERROR);
}

/// Read a file, or standard input when `path` is `None` or `-`.
fn read_input(path: Option<&str>) -> String {
    match path {
        None | Some("-") => {
            let mut content = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut content) {
                fail(&format!("error reading standard input: {e}"));
            }
            content
        }
        Some(path) => read_file(path),
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            fail(&msg);
        }
    }
}

/// Parse a JSON document; `what` names it in error messages.
fn parse_json(text: &str, what: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(json) => from_json(json),
        Err(e) => fail(&format!("invalid JSON in {what}: {e}")),
    }
}

fn load_document(path: Option<&str>) -> Value {
    let text = read_input(path);
    parse_json(&text, path.unwrap_or("standard input"))
}

fn compile_or_exit(source: &str) -> Pattern {
    match dx(source, &[]) {
        Ok(pattern) => pattern,
        Err(err) => fail(&render_error(source, &err)),
    }
}

fn json_text(value: &Value, pretty: bool) -> String {
    let json = match to_json(value) {
        Ok(json) => json,
        Err(e) => fail(&format!("error: {e}")),
    };
    let text = if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };
    match text {
        Ok(text) => text,
        Err(e) => fail(&format!("error: {e}")),
    }
}
