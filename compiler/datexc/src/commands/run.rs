//! Commands that run an expression over a JSON document.

use datex_patterns::{EvalError, Value};

use super::{compile_or_exit, fail, json_text, load_document, parse_json};

fn eval_or_exit<T>(result: Result<T, EvalError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fail(&format!("error: {err}")),
    }
}

/// Print every match (or only the first) as one JSON line each.
pub fn match_expr(source: &str, file: Option<&str>, first_only: bool) {
    let pattern = compile_or_exit(source);
    let document = load_document(file);

    if first_only {
        if let Some(found) = eval_or_exit(pattern.match_first(&document)) {
            println!("{}", json_text(&found, false));
        }
        return;
    }
    for found in pattern.match_all(&document) {
        println!("{}", json_text(&eval_or_exit(found), false));
    }
}

/// Exit with status 0 when the expression matches the document, 1 otherwise.
pub fn test_expr(source: &str, file: Option<&str>) {
    let pattern = compile_or_exit(source);
    let document = load_document(file);

    let matched = eval_or_exit(pattern.test(&document));
    tracing::debug!(matched, "tested document");
    std::process::exit(if matched { 0 } else { 1 });
}

/// Print the document with its first match replaced.
pub fn replace_expr(source: &str, replacement: &str, file: Option<&str>) {
    let pattern = compile_or_exit(source);
    let replacement = parse_json(replacement, "replacement");
    let document = load_document(file);

    let result = eval_or_exit(pattern.replace(&document, replacement));
    println!("{}", json_text(&result, true));
}

/// Print the document with every match replaced by the same value.
pub fn rewrite_expr(source: &str, replacement: &str, file: Option<&str>) {
    let pattern = compile_or_exit(source);
    let replacement = parse_json(replacement, "replacement");
    let document = load_document(file);

    let result = eval_or_exit(pattern.rewrite(&document, |_: &Value| Ok(replacement.clone())));
    println!("{}", json_text(&result, true));
}
