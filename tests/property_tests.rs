//! Property-based tests for the parse/serialize round trip.
//!
//! Documents are generated structurally (never through the parser), then
//! serialized and re-parsed. Generation sticks to what the grammar itself
//! can express: no inline tables inside arrays, no empty sub-tables (an
//! empty table emits no header and cannot survive a round trip).

use proptest::prelude::*;
use tomlite::{parse, to_string, Document, Table, Value};

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}".prop_filter("boolean keywords are not keys", |k| {
        k != "true" && k != "false"
    })
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
        "[ -~\t\n]{0,16}".prop_map(Value::String),
        (1i32..=9999, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            Value::Date(chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap())
        }),
    ]
}

fn array_strategy() -> impl Strategy<Value = Value> {
    let element = prop_oneof![
        4 => scalar_strategy(),
        1 => prop::collection::vec(scalar_strategy(), 0..3).prop_map(Value::Array),
    ];
    prop::collection::vec(element, 0..4).prop_map(Value::Array)
}

fn table_strategy(depth: u32) -> BoxedStrategy<Table> {
    let entry = if depth == 0 {
        prop_oneof![scalar_strategy(), array_strategy()].boxed()
    } else {
        prop_oneof![
            4 => scalar_strategy().boxed(),
            2 => array_strategy().boxed(),
            1 => table_strategy(depth - 1).prop_map(Value::Table).boxed(),
        ]
        .boxed()
    };
    prop::collection::btree_map(key_strategy(), entry, 1..5)
        .prop_map(|map| map.into_iter().collect::<Table>())
        .boxed()
}

fn document_strategy() -> impl Strategy<Value = Document> {
    table_strategy(2).prop_map(Document::from)
}

proptest! {
    #[test]
    fn prop_round_trip(doc in document_strategy()) {
        let text = to_string(&doc);
        let reparsed = parse(&text);
        prop_assert!(reparsed.is_ok(), "failed to re-parse:\n{}", text);
        prop_assert_eq!(reparsed.unwrap(), doc);
    }

    #[test]
    fn prop_serialization_idempotent(doc in document_strategy()) {
        let once = to_string(&doc);
        let twice = to_string(&parse(&once).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_integer_literals(n in any::<i64>()) {
        let doc = parse(&format!("n = {n}\n")).unwrap();
        prop_assert_eq!(doc.get("n"), Some(&Value::Integer(n)));
    }

    #[test]
    fn prop_float_literals(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let doc = parse(&format!("f = {f:?}\n")).unwrap();
        prop_assert_eq!(doc.get("f"), Some(&Value::Float(f)));
    }

    #[test]
    fn prop_string_escaping(s in "[ -~\t\n]{0,32}") {
        let mut root = Table::new();
        root.insert("s".to_string(), Value::String(s.clone()));
        let text = to_string(&Document::from(root));
        let doc = parse(&text).unwrap();
        prop_assert_eq!(doc.get_str("s", "<missing>"), s.as_str());
    }

    #[test]
    fn prop_missing_paths_yield_defaults(key in key_strategy(), default in any::<i64>()) {
        let doc = parse("present = 1\n").unwrap();
        prop_assume!(key != "present");
        prop_assert_eq!(doc.get_int(&key, default), default);
    }
}
