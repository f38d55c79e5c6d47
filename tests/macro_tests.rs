use hjson::{hjson, hjson_record, marshal, unmarshal, HjsonMap, Number, Value};

#[test]
fn builds_primitives() {
    assert_eq!(hjson!(null), Value::Null);
    assert_eq!(hjson!(true), Value::Bool(true));
    assert_eq!(hjson!(42), Value::Number(Number::Float(42.0)));
    assert_eq!(hjson!("text"), Value::String("text".to_string()));
}

#[test]
fn builds_nested_structures() {
    let value = hjson!({
        "name": "Alice",
        "age": 30,
        "tags": ["rust", "hjson"],
        "address": {
            "city": "Berlin"
        }
    });

    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("name").unwrap().as_str(), Some("Alice"));
    assert_eq!(obj.get("age").unwrap().as_f64(), Some(30.0));
    assert_eq!(obj.get("tags").unwrap().as_array().unwrap().len(), 2);
    assert_eq!(
        obj.get("address")
            .unwrap()
            .as_object()
            .unwrap()
            .get("city")
            .unwrap()
            .as_str(),
        Some("Berlin")
    );
}

#[test]
fn empty_collections() {
    assert_eq!(hjson!([]), Value::Array(vec![]));
    assert_eq!(hjson!({}), Value::Object(HjsonMap::new()));
}

#[test]
fn macro_values_marshal() {
    let value = hjson!({"greeting": "hello", "n": 2});
    assert_eq!(marshal(&value).unwrap(), "{\n  greeting: hello\n  n: 2\n}");
}

#[test]
fn record_macro_field_forms() {
    #[derive(Default, Debug, PartialEq)]
    struct Inner {
        shared: String,
        nested_only: String,
    }
    hjson_record!(Inner { shared, nested_only });

    #[derive(Default, Debug, PartialEq)]
    struct Outer {
        plain: i64,
        renamed: String,
        shared: String,
        inner: Inner,
    }
    hjson_record!(Outer {
        plain,
        renamed as "other-name",
        shared,
        ..inner,
    });

    let mut outer = Outer::default();
    unmarshal(
        b"plain: 7\nother-name: aliased\nshared: top\nnested_only: deep",
        &mut outer,
    )
    .unwrap();

    assert_eq!(outer.plain, 7);
    assert_eq!(outer.renamed, "aliased");
    // The outer field shadows the embedded one with the same name.
    assert_eq!(outer.shared, "top");
    assert_eq!(outer.inner.shared, "");
    assert_eq!(outer.inner.nested_only, "deep");
}

#[test]
fn record_macro_accepts_trailing_comma() {
    #[derive(Default)]
    struct OneField {
        only: i64,
    }
    hjson_record!(OneField { only, });

    let mut dest = OneField::default();
    unmarshal(b"only: 1", &mut dest).unwrap();
    assert_eq!(dest.only, 1);
}
