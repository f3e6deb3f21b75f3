#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use datex_ir::{ArrayEntry, ExprKind, Literal, Span};
use datex_patterns::{Predicate, RegexPattern};
use pretty_assertions::assert_eq;

use super::*;

fn compile_source(source: &str, items: &[Interpolation]) -> Result<Pattern, CompileError> {
    let expr = match datex_parse::parse_source(source) {
        Ok(expr) => expr,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    };
    compile(&expr, items)
}

fn compiled(source: &str, items: &[Interpolation]) -> Pattern {
    match compile_source(source, items) {
        Ok(pattern) => pattern,
        Err(err) => panic!("failed to compile {source:?}: {err}"),
    }
}

fn compile_err(source: &str, items: &[Interpolation]) -> CompileError {
    match compile_source(source, items) {
        Ok(pattern) => panic!("expected {source:?} to fail, got {pattern}"),
        Err(err) => err,
    }
}

fn map(entries: &[(&str, i64)]) -> Value {
    Value::map(entries.iter().map(|(k, v)| (*k, Value::int(*v))))
}

// Translation

#[test]
fn test_leaves() {
    assert!(matches!(compiled(".foo", &[]), Pattern::Key { ref name, optional: false } if name == "foo"));
    assert!(matches!(compiled(".foo?", &[]), Pattern::Key { optional: true, .. }));
    assert!(matches!(compiled(".-1", &[]), Pattern::Index { index: -1, optional: false }));
    assert!(matches!(compiled(".[1:]", &[]), Pattern::Slice { start: Some(1), end: None }));
    assert!(matches!(compiled("*", &[]), Pattern::Spread));
    assert!(matches!(compiled("**", &[]), Pattern::Recursive { max_visits: 1 }));
    assert!(matches!(compiled("_", &[]), Pattern::Id));
    assert!(matches!(compiled("3", &[]), Pattern::Value(Value::Int(3))));
}

#[test]
fn test_alternatives_are_flattened() {
    let Pattern::Alt(branches) = compiled(".a | .b | .c", &[]) else {
        panic!("expected an alternation");
    };
    assert_eq!(branches.len(), 3);
}

#[test]
fn test_sequences_are_flattened() {
    let pattern = compiled(".a .b .c", &[]);
    let Pattern::Seq(steps) = &pattern else {
        panic!("expected a sequence");
    };
    assert_eq!(steps.len(), 3);
    assert_eq!(pattern.to_string(), ".a .b .c");
}

#[test]
fn test_cut_and_lookahead() {
    assert_eq!(compiled(".1 .2 ! .3", &[]).to_string(), ".1 .2 ! .3");
    assert!(matches!(compiled(".a &", &[]), Pattern::And(_)));
}

#[test]
fn test_structures() {
    assert_eq!(
        compiled("{x: 1, y?: _, ...*}", &[]).to_string(),
        "{x: 1, y?: _, ...*}"
    );
    assert_eq!(compiled("[\"foo\", ...<0>]", &[Pattern::number().into()]).to_string(), "[\"foo\", ...where(number)]");
}

// Placeholders

#[test]
fn test_placeholder_key_and_index() {
    let items = [Interpolation::from("foo"), Interpolation::from(1_i64)];
    assert!(matches!(compiled(".<0>", &items), Pattern::Key { ref name, .. } if name == "foo"));
    assert!(matches!(compiled(".<1>?", &items), Pattern::Index { index: 1, optional: true }));
    assert!(matches!(compiled(".[<1>:]", &items), Pattern::Slice { start: Some(1), end: None }));
}

#[test]
fn test_placeholder_object_key() {
    let pattern = compiled("{<0>: _}", &[Interpolation::from("k")]);
    assert_eq!(pattern.to_string(), "{k: _}");
}

#[test]
fn test_placeholder_kinds() {
    let predicate = Predicate::new("even", |v| v.as_int().is_some_and(|n| n % 2 == 0));
    let regex = RegexPattern::new(regex::Regex::new("a+").unwrap());
    let items = [
        Interpolation::from(Value::int(4)),
        Interpolation::from(predicate),
        Interpolation::from(regex),
        Interpolation::from(Pattern::key("x")),
    ];
    assert!(matches!(compiled("<0>", &items), Pattern::Value(Value::Int(4))));
    assert!(matches!(compiled("<1>", &items), Pattern::Where(_)));
    assert!(matches!(compiled("<2>", &items), Pattern::Regex(_)));
    assert!(matches!(compiled("<3>", &items), Pattern::Key { .. }));
}

#[test]
fn test_spliced_pattern_behaves() {
    let pattern = compiled(".a <0>", &[Pattern::collect(Pattern::spread()).into()]);
    let focus = Value::map([("a", Value::list(vec![Value::int(1), Value::int(2)]))]);
    assert_eq!(
        pattern.match_first(&focus),
        Ok(Some(Value::list(vec![Value::int(1), Value::int(2)])))
    );
}

// Errors

#[test]
fn test_missing_interpolation() {
    let err = compile_err(".a <2>", &[Interpolation::from(1_i64)]);
    assert_eq!(
        err.kind,
        CompileErrorKind::MissingInterpolation {
            index: 2,
            supplied: 1
        }
    );
    assert_eq!(err.span, Span::new(3, 6));
}

#[test]
fn test_invalid_interpolation() {
    let err = compile_err(".<0>", &[Pattern::id().into()]);
    assert_eq!(
        err.kind,
        CompileErrorKind::InvalidInterpolation {
            index: 0,
            found: "a pattern",
            position: "a key"
        }
    );
    let err = compile_err(".[<0>:]", &[Interpolation::from("x")]);
    assert_eq!(
        err.kind,
        CompileErrorKind::InvalidInterpolation {
            index: 0,
            found: "a string",
            position: "a slice bound"
        }
    );
}

#[test]
fn test_duplicate_rest() {
    let err = compile_err("{...*, ..._}", &[]);
    assert_eq!(err.kind, CompileErrorKind::DuplicateRest);
}

#[test]
fn test_rest_not_last() {
    let err = compile_err("[..._, 1]", &[]);
    assert_eq!(err.kind, CompileErrorKind::RestNotLast);
}

#[test]
fn test_bare_identifier_in_hand_built_tree() {
    let expr = Expr::new(ExprKind::Literal(Literal::Ident("foo".into())), Span::new(0, 3));
    let err = compile(&expr, &[]).unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::BareIdentifier {
            name: "foo".into()
        }
    );
    assert_eq!(
        err.to_string(),
        "bare identifier `foo`; use `.foo` for a key or \"foo\" for a string"
    );
}

#[test]
fn test_invalid_literal_in_hand_built_tree() {
    let rest = Expr::new(ExprKind::Id, Span::new(4, 5));
    let item = Expr::new(
        ExprKind::Index {
            index: Literal::Str("x".into()),
            optional: false,
        },
        Span::new(1, 2),
    );
    let expr = Expr::new(
        ExprKind::Array(vec![ArrayEntry::Item(item), ArrayEntry::Rest(rest)]),
        Span::new(0, 6),
    );
    let err = compile(&expr, &[]).unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::InvalidLiteral {
            found: "string",
            position: "an index"
        }
    );
    assert_eq!(err.span, Span::new(1, 2));
}

// End to end

#[test]
fn test_compiled_patterns_match() {
    let focus = map(&[("foo", 1), ("bar", 2)]);
    assert_eq!(compiled(".foo", &[]).match_first(&focus), Ok(Some(Value::int(1))));
    let all: Result<Vec<_>, _> = compiled(".foo | .bar", &[]).match_all(&focus).collect();
    assert_eq!(all, Ok(vec![Value::int(1), Value::int(2)]));
    assert_eq!(
        compiled("{foo: 1, ..._}", &[]).match_first(&focus),
        Ok(Some(focus.clone()))
    );
}
