//! Property-based tests for the core round-trip guarantees: emit → parse
//! returns an equal tree, key order survives, duplicate keys always fail.

use hjson::{marshal, parse, parse_with_options, DecoderOptions, HjsonMap, Number, Value};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>()
            .prop_filter("finite numbers only", |f| f.is_finite())
            .prop_map(Value::from),
        any::<String>().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((any::<String>(), inner), 0..6).prop_map(|pairs| {
                let mut map = HjsonMap::new();
                for (k, v) in pairs {
                    map.insert(k, v);
                }
                Value::Object(map)
            }),
        ]
    })
}

fn roundtrip(value: &Value) -> Result<Value, String> {
    let emitted = marshal(value).map_err(|e| format!("marshal failed: {e}"))?;
    parse(emitted.as_bytes()).map_err(|e| format!("re-parse of {emitted:?} failed: {e}"))
}

proptest! {
    #[test]
    fn prop_tree_roundtrip(value in arb_value()) {
        let back = roundtrip(&value).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn prop_string_roundtrip(s in any::<String>()) {
        let mut map = HjsonMap::new();
        map.insert("v".to_string(), Value::String(s));
        let value = Value::Object(map);
        let back = roundtrip(&value).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn prop_float_roundtrip(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let back = roundtrip(&Value::from(f)).unwrap();
        prop_assert_eq!(back, Value::from(f));
    }

    #[test]
    fn prop_key_order_is_preserved(
        keys in prop::collection::hash_set("[a-z]{1,8}", 1..10)
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut map = HjsonMap::new();
        for (i, key) in keys.iter().enumerate() {
            map.insert(key.clone(), Value::from(i as f64));
        }
        let value = Value::Object(map);

        let back = roundtrip(&value).unwrap();
        let parsed_keys: Vec<String> =
            back.as_object().unwrap().keys().cloned().collect();
        prop_assert_eq!(parsed_keys, keys);
    }

    #[test]
    fn prop_duplicate_keys_always_fail(key in "[a-z]{1,8}", a in 0i32..100, b in 0i32..100) {
        let text = format!("{{ {key}: {a}, {key}: {b} }}");
        prop_assert!(parse(text.as_bytes()).is_err());
    }

    #[test]
    fn prop_raw_number_text_survives(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let text = f.to_string();
        let options = DecoderOptions::new().with_json_number(true);
        let value = parse_with_options(text.as_bytes(), options).unwrap();
        prop_assert_eq!(&value, &Value::Number(Number::Raw(text.clone())));
        prop_assert_eq!(marshal(&value).unwrap(), text);
    }

    #[test]
    fn prop_quoteless_safe_strings_stay_quoteless(
        s in "[a-z][a-z ]{0,20}[a-z]"
            .prop_filter("keywords need quotes", |s| {
                s != "true" && s != "false" && s != "null"
            })
    ) {
        let mut map = HjsonMap::new();
        map.insert("v".to_string(), Value::from(s.as_str()));
        let emitted = marshal(&Value::Object(map)).unwrap();
        // Simple lowercase phrases never need quotes.
        prop_assert_eq!(emitted, format!("{{\n  v: {s}\n}}"));
    }
}
