use datex_compile::Interpolation;

use super::*;
use crate::dx;

fn rendered(source: &str, items: &[Interpolation]) -> String {
    match dx(source, items) {
        Ok(pattern) => panic!("expected {source:?} to fail, got {pattern}"),
        Err(err) => render_error(source, &err),
    }
}

#[test]
fn test_parse_error_report() {
    let report = rendered(".a foo", &[]);
    assert!(report.contains("bare identifier `foo`"), "{report}");
    assert!(report.contains(".a foo"), "{report}");
    assert!(report.contains("here"), "{report}");
}

#[test]
fn test_compile_error_report() {
    let report = rendered(".a <0>", &[]);
    assert!(
        report.contains("placeholder <0> has no interpolated item (0 supplied)"),
        "{report}"
    );
    assert!(report.contains("no item for this placeholder"), "{report}");
}

#[test]
fn test_error_at_end_of_input() {
    let report = rendered("{a: 1", &[]);
    assert!(report.contains("while parsing an object pattern"), "{report}");
}

#[test]
fn test_multibyte_source() {
    let report = rendered("\"é\" <0>", &[]);
    assert!(report.contains("placeholder <0>"), "{report}");
}

#[test]
fn test_empty_source() {
    let report = rendered("", &[]);
    assert!(report.contains("empty expression"), "{report}");
}

#[test]
fn test_char_offset_counts_characters() {
    assert_eq!(char_offset("héllo", 0), 0);
    assert_eq!(char_offset("héllo", 3), 2);
    assert_eq!(char_offset("héllo", 100), 5);
}
