use super::*;
use pretty_assertions::assert_eq;
use smallvec::smallvec;

use crate::errors::EvalErrorKind;

fn sample() -> Value {
    Value::map([
        ("foo", Value::int(1)),
        (
            "bar",
            Value::list(vec![Value::int(2), Value::map([("baz", Value::int(3))])]),
        ),
    ])
}

#[test]
fn test_empty_path_replaces_root() {
    assert_eq!(set_path(&sample(), &[], Value::Null), Ok(Value::Null));
}

#[test]
fn test_nested_path() {
    let path: Path = smallvec![Step::Key("bar".into()), Step::Index(1), Step::Key("baz".into())];
    let updated = set_path(&sample(), &path, Value::string("x"));
    let expected = Value::map([
        ("foo", Value::int(1)),
        (
            "bar",
            Value::list(vec![Value::int(2), Value::map([("baz", Value::string("x"))])]),
        ),
    ]);
    assert_eq!(updated, Ok(expected));
}

#[test]
fn test_untouched_children_are_shared() {
    let root = sample();
    let updated = set_path(&root, &[Step::Key("foo".into())], Value::int(9));
    let (Some(before), Ok(Some(after))) = (
        root.as_object().and_then(|o| o.get("bar")).cloned(),
        updated.map(|v| v.as_object().and_then(|o| o.get("bar")).cloned()),
    ) else {
        panic!("expected bar on both sides");
    };
    assert_eq!(before.identity(), after.identity());
}

#[test]
fn test_cells_are_flattened() {
    let root = Value::cell(Value::list(vec![Value::int(1)]));
    let updated = set_path(&root, &[Step::Index(0)], Value::int(5));
    assert_eq!(updated, Ok(Value::list(vec![Value::int(5)])));
    // The cell itself is untouched.
    assert_eq!(*root.resolved(), Value::list(vec![Value::int(1)]));
}

#[test]
fn test_wrong_container_is_type_error() {
    let err = set_path(&Value::int(1), &[Step::Index(0)], Value::Null);
    assert!(matches!(
        err.map_err(|e| e.kind),
        Err(EvalErrorKind::TypeMismatch { .. })
    ));
}

#[test]
fn test_with_index_fills_gaps() {
    let extended = with_index(&[Value::int(1)], 3, Value::int(4));
    assert_eq!(
        extended,
        Value::list(vec![
            Value::int(1),
            Value::Undefined,
            Value::Undefined,
            Value::int(4)
        ])
    );
}

#[test]
fn test_step_display() {
    assert_eq!(Step::Index(2).to_string(), "[2]");
    assert_eq!(Step::Key("a".into()).to_string(), ".a");
}
