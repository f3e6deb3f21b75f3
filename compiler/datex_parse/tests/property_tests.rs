//! Property-based tests for the parser.
//!
//! Random syntax trees are printed with `Display` and parsed back; the
//! result must have the same shape. This exercises precedence handling in
//! the printer and the parser together.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use datex_ir::{ArrayEntry, Expr, ExprKind, Literal, ObjectEntry, Span};
use datex_parse::parse_source;
use proptest::prelude::*;

// -- Generation Strategies --

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z$][a-z0-9_$]{0,6}").expect("valid regex")
}

fn string_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z \"\\\\.]{0,6}").expect("valid regex")
}

fn key_strategy() -> impl Strategy<Value = Literal> {
    prop_oneof![
        identifier_strategy().prop_map(Literal::Ident),
        string_strategy().prop_map(Literal::Str),
        (0usize..4).prop_map(Literal::Placeholder),
    ]
}

fn bound_strategy() -> impl Strategy<Value = Option<Literal>> {
    prop_oneof![
        Just(None),
        (-5i64..5).prop_map(|n| Some(Literal::Int(n))),
        (0usize..4).prop_map(|i| Some(Literal::Placeholder(i))),
    ]
}

fn e(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

fn leaf_strategy() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (key_strategy(), any::<bool>()).prop_map(|(key, optional)| e(ExprKind::Key { key, optional })),
        (-50i64..50, any::<bool>()).prop_map(|(n, optional)| e(ExprKind::Index {
            index: Literal::Int(n),
            optional
        })),
        (bound_strategy(), bound_strategy()).prop_map(|(from, to)| e(ExprKind::Slice { from, to })),
        Just(e(ExprKind::Spread)),
        Just(e(ExprKind::Recursive)),
        Just(e(ExprKind::Id)),
        (-50i64..50).prop_map(|n| e(ExprKind::Literal(Literal::Int(n)))),
        string_strategy().prop_map(|s| e(ExprKind::Literal(Literal::Str(s)))),
        (0usize..4).prop_map(|i| e(ExprKind::Literal(Literal::Placeholder(i)))),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| e(ExprKind::Alt(Box::new(a), Box::new(b)))),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| e(ExprKind::Seq(Box::new(a), Box::new(b)))),
            inner.clone().prop_map(|a| e(ExprKind::And(Box::new(a)))),
            inner.clone().prop_map(|a| e(ExprKind::Cut(Box::new(a)))),
            (
                prop::collection::vec((identifier_strategy(), any::<bool>(), inner.clone()), 0..3),
                prop::option::of(inner.clone())
            )
                .prop_map(|(fields, rest)| {
                    let mut entries: Vec<_> = fields
                        .into_iter()
                        .map(|(key, optional, value)| ObjectEntry::Field {
                            key: Literal::Ident(key),
                            optional,
                            value,
                        })
                        .collect();
                    entries.extend(rest.map(ObjectEntry::Rest));
                    e(ExprKind::Object(entries))
                }),
            (
                prop::collection::vec(inner.clone(), 0..3),
                prop::option::of(inner)
            )
                .prop_map(|(items, rest)| {
                    let mut entries: Vec<_> = items.into_iter().map(ArrayEntry::Item).collect();
                    entries.extend(rest.map(ArrayEntry::Rest));
                    e(ExprKind::Array(entries))
                }),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn printed_trees_parse_back(expr in expr_strategy()) {
        let printed = expr.to_string();
        let reparsed = parse_source(&printed)
            .map_err(|err| TestCaseError::fail(format!("{printed:?}: {err}")))?;
        prop_assert!(
            expr.same_shape(&reparsed),
            "printed {:?}\nexpected {:?}\nreparsed {:?}",
            printed,
            expr,
            reparsed
        );
    }

    #[test]
    fn printing_is_stable(expr in expr_strategy()) {
        let once = expr.to_string();
        let twice = parse_source(&once).unwrap().to_string();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn arbitrary_input_never_panics(source in "[.*?!&|(){}\\[\\],:_a-z0-9<> \"-]{0,24}") {
        let _ = parse_source(&source);
    }
}
