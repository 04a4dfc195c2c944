//! Construction and casting tests
//!
//! Covers wrapping caller-owned values, normalization through `cast`, and
//! the shared-storage guarantee between an accessor and its caller.

use nestkit::{Accessor, Key, Map, Value, list, map};

use crate::helpers::base_fixture;

#[test]
fn test_new_replaces_non_map_values() {
    let inputs = [
        Value::Null,
        Value::from(false),
        Value::from(true),
        Value::from(0),
        Value::from(1),
        Value::from(""),
        Value::from("foo"),
    ];
    for (i, input) in inputs.into_iter().enumerate() {
        let mut value = input;
        let reflect = Accessor::new(&mut value);
        assert!(reflect.is_empty(), "input {i}");
        drop(reflect);
        assert_eq!(value, Value::Map(Map::new()), "input {i}");
    }
}

#[test]
fn test_new_keeps_existing_map() {
    let mut list = list!["foo", 5, false, true];
    list.insert("key", "val");
    let original = list.clone();

    let mut value = Value::from(list);
    let reflect = Accessor::new(&mut value);
    assert_eq!(reflect.all(), &original);
    drop(reflect);
    assert_eq!(value, Value::from(original));
}

#[test]
fn test_writes_are_visible_to_caller() {
    let mut data = map! { "a" => 1 };
    {
        let mut reflect = Accessor::over(&mut data);
        reflect.set("b", 2).push(["c"]).unset(["a"]);
    }
    assert_eq!(data, map! { "b" => 2, 0 => "c" });
}

#[test]
fn test_cast_normalizes_input() {
    assert!(Accessor::cast(Value::Null).is_empty());
    assert_eq!(Accessor::cast(Value::from("x")).all(), &list!["x"]);
    assert_eq!(Accessor::cast(Value::from(false)).all(), &list![false]);
    assert_eq!(Accessor::cast(map! { "k" => "v" }).all(), &map! { "k" => "v" });
    assert_eq!(Accessor::cast(vec![1, 2, 3]).all(), &list![1, 2, 3]);
}

#[test]
fn test_cast_copies_borrowed_maps() {
    let data = base_fixture();
    let mut reflect = Accessor::cast(&data);
    reflect.clear();
    assert!(reflect.is_empty());
    assert_eq!(data, base_fixture());
}

#[test]
fn test_cast_passes_accessors_through() {
    let mut data = map! { "a" => 1 };
    let reflect = Accessor::over(&mut data);
    let mut again = Accessor::cast(reflect);
    again.set("b", 2);
    drop(again);
    assert_eq!(data, map! { "a" => 1, "b" => 2 });
}

#[test]
fn test_cast_is_idempotent() {
    let once = Accessor::cast(Value::from("x"));
    let twice = Accessor::cast(Accessor::cast(Value::from("x")));
    assert_eq!(once.all(), twice.all());

    let once = Accessor::cast(base_fixture());
    let twice = Accessor::cast(Accessor::cast(base_fixture()));
    assert_eq!(once.all(), twice.all());
}

#[test]
fn test_cast_from_json_keeps_order() {
    let json: serde_json::Value =
        serde_json::from_str(r#"{"z": 1, "a": [true, null], "0": "zero"}"#).unwrap();
    let reflect = Accessor::cast(json);
    let keys: Vec<Key> = reflect.all().keys().cloned().collect();
    assert_eq!(keys, [Key::from("z"), Key::from("a"), Key::Int(0)]);
    assert_eq!(reflect.get("a"), Some(&Value::from(list![true, Value::Null])));
}

#[test]
fn test_collect_into_accessor() {
    let reflect: Accessor = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(reflect.len(), 2);
    assert_eq!(reflect.get_or("b", 0), Value::from(2));

    let reflect = Accessor::from(map! { "k" => "v" });
    assert!(reflect.has_key(["k"]));
}
