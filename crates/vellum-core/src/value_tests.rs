use indexmap::IndexMap;
use serde_json::json;

use crate::Value;

#[test]
fn converts_from_json_preserving_key_order() {
    let value = Value::from(json!({"zeta": 1, "alpha": [true, null, "x"]}));

    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["zeta", "alpha"]);
    assert_eq!(
        value.get("alpha").unwrap().as_array().unwrap(),
        &[Value::Bool(true), Value::Null, Value::from("x")]
    );
}

#[test]
fn serializes_untagged() {
    let mut map = IndexMap::new();
    map.insert("b".to_owned(), Value::from(2));
    map.insert("a".to_owned(), Value::from(vec![Value::from(1), Value::Null]));
    let value = Value::Object(map);

    let out = serde_json::to_string(&value).unwrap();
    assert_eq!(out, r#"{"b":2,"a":[1,null]}"#);
}

#[test]
fn deserializes_into_matching_variants() {
    let value: Value = serde_json::from_str(r#"{"n": 1.5, "s": "t", "o": {}}"#).unwrap();

    assert_eq!(value.get("n").unwrap().type_name(), "number");
    assert_eq!(value.get("s").unwrap(), &Value::from("t"));
    assert_eq!(value.get("o").unwrap().type_name(), "object");
    assert!(value.get("missing").is_none());
}

#[test]
fn round_trips_through_serde_json_value() {
    let original = json!({"a": {"b": [1, 2]}, "c": false});
    let back = serde_json::Value::from(Value::from(&original));
    assert_eq!(back, original);
}
