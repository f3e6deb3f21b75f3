//! Property tests over generated JSON documents.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use datexc::{dx, from_json, to_json};
use proptest::prelude::*;
use serde_json::Value as Json;

fn json_document() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i64>().prop_map(Json::from),
        "[a-z]{0,6}".prop_map(Json::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|entries| Json::Object(entries.into_iter().collect())),
        ]
    })
}

fn expression() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "_", "*", "**", ".a", ".a?", ".0", ".-1", ".5?", ".[1:]", "* *", "** .b", ".a | .b",
        "* !",
    ])
}

proptest! {
    #[test]
    fn json_round_trips(document in json_document()) {
        prop_assert_eq!(to_json(&from_json(document.clone())).unwrap(), document);
    }

    #[test]
    fn rewriting_with_the_same_value_is_identity(
        document in json_document(),
        source in expression(),
    ) {
        let pattern = dx(source, &[]).unwrap();
        let focus = from_json(document.clone());
        let rewritten = pattern.rewrite(&focus, |v| Ok(v.clone()));
        // Shape errors (e.g. a slice on an object) are fine; silent changes are not.
        if let Ok(rewritten) = rewritten {
            prop_assert_eq!(to_json(&rewritten).unwrap(), document);
        }
    }

    #[test]
    fn test_agrees_with_match_first(
        document in json_document(),
        source in expression(),
    ) {
        let pattern = dx(source, &[]).unwrap();
        let focus = from_json(document);
        if let (Ok(found), Ok(first)) = (pattern.test(&focus), pattern.match_first(&focus)) {
            prop_assert_eq!(found, first.is_some());
        }
    }
}
