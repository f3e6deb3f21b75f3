use super::*;

#[test]
fn type_mismatch_has_correct_kind() {
    let err = type_mismatch("array", "number");
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "array".to_string(),
            got: "number".to_string()
        }
    );
    assert_eq!(err.message, "type mismatch: expected array, got number");
    assert_eq!(err.to_string(), err.message);
}

#[test]
fn index_out_of_bounds_has_correct_kind() {
    let err = index_out_of_bounds(-4, 3);
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: -4, len: 3 });
    assert_eq!(err.message, "index -4 out of bounds for length 3");
}

#[test]
fn arity_mismatch_has_correct_kind() {
    let err = arity_mismatch(2, 1);
    assert_eq!(err.kind, EvalErrorKind::ArityMismatch { expected: 2, got: 1 });
    assert_eq!(err.message, "replacement has 1 elements, expected 2");
}

#[test]
fn custom_error_keeps_message() {
    let err = EvalError::new("getter failed");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "getter failed".to_string()
        }
    );
    assert_eq!(err.to_string(), "getter failed");
}

#[test]
fn kind_converts_into_error() {
    let err: EvalError = EvalErrorKind::ArityMismatch { expected: 1, got: 0 }.into();
    assert_eq!(err.message, "replacement has 0 elements, expected 1");
}
