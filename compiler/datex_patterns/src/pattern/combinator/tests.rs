use pretty_assertions::assert_eq;

use crate::errors::EvalErrorKind;
use crate::pattern::{Pattern, Reducer};
use crate::test_helpers::{all, first, int, list, obj, replaced, s};
use crate::value::Value;

// seq

#[test]
fn test_seq_traverses() {
    let pattern = Pattern::seq([Pattern::key("foo"), Pattern::key("bar")]);
    let focus = obj([("foo", obj([("bar", int(1))]))]);
    assert_eq!(first(&pattern, &focus), int(1));
    assert_eq!(
        replaced(&pattern, &focus, int(2)),
        obj([("foo", obj([("bar", int(2))]))])
    );
}

#[test]
fn test_seq_is_nested_cartesian() {
    let pattern = Pattern::seq([Pattern::spread(), Pattern::spread()]);
    let focus = list([list([int(1), int(2)]), list([int(3)])]);
    assert_eq!(all(&pattern, &focus), vec![int(1), int(2), int(3)]);
    assert_eq!(
        replaced(&pattern, &focus, int(0)),
        list([list([int(0), int(2)]), list([int(3)])])
    );
}

#[test]
fn test_empty_seq_is_identity() {
    assert_eq!(all(&Pattern::seq([]), &int(4)), vec![int(4)]);
}

#[test]
fn test_seq_propagates_errors() {
    let pattern = Pattern::seq([Pattern::key("a"), Pattern::index(0)]);
    let result = pattern.match_first(&obj([("a", s("text"))]));
    assert!(matches!(
        result.map_err(|e| e.kind),
        Err(EvalErrorKind::TypeMismatch { .. })
    ));
}

// alt

#[test]
fn test_alt() {
    let pattern = Pattern::alt([Pattern::key("foo"), Pattern::key("bar")]);
    assert_eq!(first(&pattern, &obj([("foo", int(1)), ("baz", int(3))])), int(1));
    assert_eq!(first(&pattern, &obj([("bar", int(2)), ("baz", int(3))])), int(2));
    assert_eq!(pattern.test(&obj([("baz", int(3))])), Ok(false));
    assert_eq!(
        replaced(&pattern, &obj([("foo", int(1)), ("baz", int(3))]), int(10)),
        obj([("foo", int(10)), ("baz", int(3))])
    );
    assert_eq!(
        replaced(&pattern, &obj([("bar", int(2)), ("baz", int(3))]), int(10)),
        obj([("bar", int(10)), ("baz", int(3))])
    );
}

#[test]
fn test_alt_update_all() {
    let pattern = Pattern::alt([Pattern::key("foo"), Pattern::key("bar")]);
    let focus = obj([("foo", int(1)), ("bar", int(2)), ("baz", int(3))]);
    let updated: Result<Vec<Value>, _> = pattern.update_all(&focus, |_| Ok(int(10))).collect();
    assert_eq!(
        updated,
        Ok(vec![
            obj([("foo", int(10)), ("bar", int(2)), ("baz", int(3))]),
            obj([("foo", int(1)), ("bar", int(10)), ("baz", int(3))]),
        ])
    );
}

#[test]
fn test_alt_keeps_duplicates() {
    let pattern = Pattern::alt([Pattern::id(), Pattern::id()]);
    assert_eq!(all(&pattern, &int(1)), vec![int(1), int(1)]);
}

// and

#[test]
fn test_and_is_lookahead() {
    let pattern = Pattern::seq([Pattern::and(Pattern::key("foo")), Pattern::key("bar")]);
    assert_eq!(first(&pattern, &obj([("foo", int(1)), ("bar", int(2))])), int(2));
    assert_eq!(pattern.test(&obj([("bar", int(2)), ("quux", int(3))])), Ok(false));
    assert_eq!(
        replaced(&pattern, &obj([("foo", int(1)), ("bar", int(2))]), int(4)),
        obj([("foo", int(1)), ("bar", int(4))])
    );
}

#[test]
fn test_and_yields_once() {
    let pattern = Pattern::and(Pattern::spread());
    let focus = list([int(1), int(2)]);
    assert_eq!(all(&pattern, &focus), vec![focus.clone()]);
}

#[test]
fn test_and_propagates_first_error() {
    let pattern = Pattern::and(Pattern::index(0));
    assert!(pattern.test(&s("x")).is_err());
}

// limit

#[test]
fn test_limit_and_cut() {
    let focus = list([int(1), int(2), int(3)]);
    assert_eq!(
        all(&Pattern::limit(Pattern::spread(), 2), &focus),
        vec![int(1), int(2)]
    );
    assert_eq!(all(&Pattern::cut(Pattern::spread()), &focus), vec![int(1)]);
    assert_eq!(
        all(&Pattern::limit(Pattern::spread(), 0), &focus),
        Vec::<Value>::new()
    );
}

#[test]
fn test_cut_only_applies_to_its_operand() {
    // (.0 .* !) .*  on [[[1, 2], [3]]]
    let pattern = Pattern::seq([
        Pattern::cut(Pattern::seq([Pattern::index(0), Pattern::spread()])),
        Pattern::spread(),
    ]);
    let focus = list([list([list([int(1), int(2)]), list([int(3)])])]);
    assert_eq!(all(&pattern, &focus), vec![int(1), int(2)]);
}

// collect

#[test]
fn test_collect() {
    let pattern = Pattern::collect(Pattern::alt([Pattern::key("foo"), Pattern::key("bar")]));
    assert_eq!(
        first(&pattern, &obj([("foo", int(1)), ("bar", int(2)), ("baz", int(3))])),
        list([int(1), int(2)])
    );
    assert_eq!(first(&pattern, &obj([("foo", int(1)), ("quux", int(2))])), list([int(1)]));
    assert_eq!(first(&pattern, &obj([])), list([]));
}

#[test]
fn test_collect_replace_is_joint() {
    let pattern = Pattern::collect(Pattern::alt([Pattern::key("foo"), Pattern::key("bar")]));
    let focus = obj([("foo", int(1)), ("bar", int(2)), ("baz", int(3))]);
    assert_eq!(
        replaced(&pattern, &focus, int(10)),
        obj([("foo", int(10)), ("bar", int(10)), ("baz", int(3))])
    );
}

#[test]
fn test_collect_per_position() {
    let pattern = Pattern::collect_with(Pattern::spread(), Reducer::PerPosition);
    let focus = list([int(1), int(2), int(3)]);
    assert_eq!(
        replaced(&pattern, &focus, list([int(10), int(20), int(30)])),
        list([int(10), int(20), int(30)])
    );
    let err = pattern.replace(&focus, list([int(10)]));
    assert_eq!(
        err.map_err(|e| e.kind),
        Err(EvalErrorKind::ArityMismatch { expected: 3, got: 1 })
    );
}

#[test]
fn test_collect_inside_seq() {
    let pattern = Pattern::seq([
        Pattern::key("xs"),
        Pattern::collect(Pattern::seq([Pattern::spread(), Pattern::number()])),
    ]);
    let focus = obj([("xs", list([int(1), s("a"), int(2)]))]);
    assert_eq!(first(&pattern, &focus), list([int(1), int(2)]));
    assert_eq!(
        replaced(&pattern, &focus, int(0)),
        obj([("xs", list([int(0), s("a"), int(0)]))])
    );
}
