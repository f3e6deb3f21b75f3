//! End-to-end tests: source text in, matches and rebuilt documents out.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use datexc::{dx, from_json, to_json, Error, EvalError, Interpolation, Pattern, Value};
use datex_patterns::{EvalErrorKind, Predicate, RegexPattern};
use pretty_assertions::assert_eq;
use serde_json::{json, Value as Json};

fn pattern(source: &str, items: &[Interpolation]) -> Pattern {
    match dx(source, items) {
        Ok(pattern) => pattern,
        Err(err) => panic!("{source:?} did not compile: {err}"),
    }
}

fn matches(source: &str, document: Json) -> Vec<Json> {
    pattern(source, &[])
        .match_all(&from_json(document))
        .map(|found| to_json(&found.unwrap()).unwrap())
        .collect()
}

fn replaced(source: &str, items: &[Interpolation], document: Json, new_value: Json) -> Json {
    let result = pattern(source, items)
        .replace(&from_json(document), from_json(new_value))
        .unwrap();
    to_json(&result).unwrap()
}

// Template expressions

#[test]
fn test_single_key() {
    assert_eq!(matches(".foo", json!({"foo": 1})), vec![json!(1)]);
}

#[test]
fn test_alternation_yields_both() {
    assert_eq!(
        matches(".foo | .bar", json!({"foo": 1, "bar": 2})),
        vec![json!(1), json!(2)]
    );
}

#[test]
fn test_sequence_descends() {
    assert_eq!(matches(".foo .bar", json!({"foo": {"bar": 3}})), vec![json!(3)]);
    assert_eq!(matches(".foo .0", json!({"foo": ["bar", "baz"]})), vec![json!("bar")]);
    assert_eq!(matches(".foo.1", json!({"foo": ["bar", "baz"]})), vec![json!("baz")]);
}

#[test]
fn test_lookahead_and_grouping() {
    let source = ".foo & .bar .baz | .quux .xyzzy";
    assert_eq!(
        matches(
            source,
            json!({"foo": 0, "bar": {"baz": 2}, "quux": {"xyzzy": 3}})
        ),
        vec![json!(2), json!(3)]
    );
    assert_eq!(
        matches(source, json!({"bar": {"baz": 2}, "quux": {"xyzzy": 3}})),
        vec![json!(3)]
    );
}

#[test]
fn test_cut_keeps_first() {
    assert_eq!(matches("* !", json!([1, 2, 3])), vec![json!(1)]);
    assert_eq!(
        matches("(.a | .b)! | .c", json!({"a": 1, "b": 2, "c": 3})),
        vec![json!(1), json!(3)]
    );
}

#[test]
fn test_slices() {
    assert_eq!(matches(".[1:]", json!(["a", "b", "c"])), vec![json!(["b", "c"])]);
    assert_eq!(matches(".[-1:]", json!("hello")), vec![json!("o")]);
    assert_eq!(
        replaced(".[1:3]", &[], json!(["foo", "bar", "baz", "quux"]), json!(["flerb"])),
        json!(["foo", "flerb", "quux"])
    );
}

// Traversal

#[test]
fn test_recursive_is_breadth_first() {
    assert_eq!(
        matches("**", json!({"a": 1, "b": [2, {"c": 3}]})),
        vec![
            json!({"a": 1, "b": [2, {"c": 3}]}),
            json!(1),
            json!([2, {"c": 3}]),
            json!(2),
            json!({"c": 3}),
            json!(3),
        ]
    );
}

#[test]
fn test_recursive_replace_reaches_deep_keys() {
    assert_eq!(
        replaced(
            "** .bar",
            &[],
            json!({"foo": {"quux": {"flerb": {"bar": 1}}}}),
            json!(2)
        ),
        json!({"foo": {"quux": {"flerb": {"bar": 2}}}})
    );
}

#[test]
fn test_rewrite_every_price() {
    let document = from_json(json!({"items": [{"price": 1}, {"price": 2}, {"name": "free"}]}));
    let result = pattern(".items * .price", &[])
        .rewrite(&document, |price| {
            Ok(Value::int(price.as_int().unwrap_or_default() * 10))
        })
        .unwrap();
    assert_eq!(
        to_json(&result).unwrap(),
        json!({"items": [{"price": 10}, {"price": 20}, {"name": "free"}]})
    );
}

#[test]
fn test_optional_key_inserts() {
    assert_eq!(
        replaced(".missing?", &[], json!({"kept": true}), json!(1)),
        json!({"kept": true, "missing": 1})
    );
}

// Structures and interpolation

#[test]
fn test_array_shape_with_rest() {
    let items = [
        Interpolation::from("foo"),
        Interpolation::from(Pattern::number()),
    ];
    let shape = pattern("[<0>, ...<1>]", &items);
    assert!(shape.test(&from_json(json!(["foo", 1, 2, 3]))).unwrap());
    assert!(shape.test(&from_json(json!(["foo"]))).unwrap());
    assert!(!shape.test(&from_json(json!(["foo", 1, "x"]))).unwrap());
    assert!(!shape.test(&from_json(json!(["bar", 1]))).unwrap());
}

#[test]
fn test_object_shape_replaces_named_fields_only() {
    let positive = Predicate::new("positive", |v| v.as_f64().is_some_and(|n| n > 0.0));
    let items = [
        Interpolation::from(positive),
        Interpolation::from(Pattern::string()),
    ];
    let document = json!({"foo": 10, "bar": "a string", "baz": ["else"]});

    let shape = pattern("{foo: <0>, bar: <1>}", &items);
    let found = shape.match_first(&from_json(document.clone())).unwrap().unwrap();
    assert_eq!(to_json(&found).unwrap(), json!({"foo": 10, "bar": "a string"}));

    assert_eq!(
        replaced(
            "{foo: <0>, bar: <1>}",
            &items,
            document,
            json!({"foo": 20, "bar": "flerb"})
        ),
        json!({"foo": 20, "bar": "flerb", "baz": ["else"]})
    );
}

#[test]
fn test_object_rest_collects_leftovers() {
    assert_eq!(
        matches("{a: _, ..._}", json!({"a": 1, "b": 2, "c": 3})),
        vec![json!({"a": 1, "b": 2, "c": 3})]
    );
    assert_eq!(
        replaced("{a: _, ..._}", &[], json!({"a": 1, "b": 2}), json!({"a": 5, "z": 0})),
        json!({"a": 5, "z": 0})
    );
}

#[test]
fn test_regex_interpolation() {
    let items = [Interpolation::from(RegexPattern::global(
        regex::Regex::new("h.").unwrap(),
    ))];
    let found: Vec<Json> = pattern(".text <0>", &items)
        .match_all(&from_json(json!({"text": "ha ho he hi"})))
        .map(|m| to_json(&m.unwrap()).unwrap())
        .collect();
    assert_eq!(found, vec![json!("ha"), json!("ho"), json!("he"), json!("hi")]);

    assert_eq!(
        replaced(".text <0>", &items, json!({"text": "ha oh"}), json!("HA")),
        json!({"text": "HA oh"})
    );
}

// Errors

#[test]
fn test_shape_errors_surface() {
    let err: EvalError = pattern(".[0:1]", &[])
        .match_first(&from_json(json!({"a": 1})))
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_optional_index_far_past_end_is_an_error() {
    let err = pattern(".9223372036854775807?", &[])
        .replace(&from_json(json!([1])), Value::int(2))
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::IndexOutOfBounds {
            index: i64::MAX,
            len: 1
        }
    );
}

#[test]
fn test_optional_key_keeps_absent_slot_on_no_op() {
    let document = from_json(json!({"a": 1}));
    let rewritten = pattern(".x?", &[]).rewrite(&document, |v| Ok(v.clone())).unwrap();
    assert_eq!(to_json(&rewritten).unwrap(), json!({"a": 1}));
}

#[test]
fn test_front_end_errors() {
    assert!(matches!(dx("foo", &[]), Err(Error::Parse(_))));
    assert!(matches!(dx("<0>", &[]), Err(Error::Compile(_))));
    assert!(matches!(dx("[..._, 1]", &[]), Err(Error::Compile(_))));
}
