//! Mutation tests
//!
//! Covers set, replace, push, merge, unset and clear, and the sizes and
//! snapshots reported afterwards.

use nestkit::{Accessor, Key, Map, Value, list, map};

#[test]
fn test_set() {
    let mut data = Map::new();
    let mut reflect = Accessor::over(&mut data);

    reflect.set("qwe", "rty");
    assert_eq!(reflect.get("qwe"), Some(&Value::from("rty")));

    reflect.replace(list!["qwe", "rty"]);
    assert_eq!(reflect.all(), &list!["qwe", "rty"]);
    drop(reflect);
    assert_eq!(data, list!["qwe", "rty"]);
}

#[test]
fn test_set_keeps_position() {
    let mut reflect = Accessor::cast(map! { "a" => 1, "b" => 2 });
    reflect.set("a", 10);
    let keys: Vec<Key> = reflect.all().keys().cloned().collect();
    assert_eq!(keys, [Key::from("a"), Key::from("b")]);
    assert_eq!(reflect.get("a"), Some(&Value::from(10)));
}

#[test]
fn test_push_appends_sequential_keys() {
    let mut reflect = Accessor::cast(map! { "name" => "x" });
    reflect.push(["a", "b"]).push([Value::Null]);
    assert_eq!(
        reflect.all(),
        &map! { "name" => "x", 0 => "a", 1 => "b", 2 => Value::Null }
    );
}

#[test]
fn test_push_never_overwrites_the_last_integer_key() {
    let mut reflect = Accessor::cast(map! { i64::MAX => "keep" });
    reflect.push(["new"]);
    assert_eq!(reflect.len(), 1);
    assert_eq!(reflect.all(), &map! { i64::MAX => "keep" });

    // Clearing makes sequential keys available again
    reflect.clear().push(["new"]);
    assert_eq!(reflect.all(), &list!["new"]);
}

#[test]
fn test_push_after_unset_does_not_reuse_keys() {
    let mut reflect = Accessor::cast(list!["a", "b"]);
    reflect.unset([1]).push(["c"]);
    assert_eq!(reflect.all(), &map! { 0 => "a", 2 => "c" });

    reflect.clear().push(["d"]);
    assert_eq!(reflect.all(), &list!["d"]);
}

#[test]
fn test_unset() {
    let mut reflect = Accessor::cast(map! { "a" => 1, "b" => 2, "c" => 3 });
    reflect.unset(["b", "missing"]);
    assert_eq!(reflect.all(), &map! { "a" => 1, "c" => 3 });
    assert_eq!(reflect.len(), 2);
}

#[test]
fn test_clear() {
    let mut data = map! { "a" => 1 };
    let mut reflect = Accessor::over(&mut data);
    reflect.clear();
    assert!(reflect.is_empty());
    assert_eq!(reflect.len(), 0);
    drop(reflect);
    assert!(data.is_empty());
}

#[test]
fn test_shallow_merge() {
    let mut base = list!["x", "y"];
    base.insert("name", "left");
    base.insert("keep", true);
    let mut reflect = Accessor::cast(base);

    let mut other = list!["z"];
    other.insert("name", "right");
    other.insert("new", 1);
    reflect.merge(other, false);

    let mut expected = list!["x", "y"];
    expected.insert("name", "right");
    expected.insert("keep", true);
    expected.push("z");
    expected.insert("new", 1);
    assert_eq!(reflect.all(), &expected);
}

#[test]
fn test_merge_renumbers_integer_keys() {
    let mut reflect = Accessor::cast(map! { 5 => "a", 9 => "b" });
    reflect.merge(map! { 3 => "c" }, false);
    assert_eq!(reflect.all(), &list!["a", "b", "c"]);
}

#[test]
fn test_recursive_merge() {
    let mut reflect = Accessor::cast(map! {
        "settings" => map! { "theme" => "dark", "tags" => list!["a"] },
        "count" => 1,
    });
    reflect.merge(
        map! {
            "settings" => map! { "tags" => list!["b"], "lang" => "en" },
            "count" => 2,
        },
        true,
    );
    assert_eq!(
        reflect.all(),
        &map! {
            "settings" => map! { "theme" => "dark", "tags" => list!["a", "b"], "lang" => "en" },
            "count" => list![1, 2],
        }
    );
}

#[test]
fn test_recursive_merge_over_null() {
    let mut reflect = Accessor::cast(map! { "a" => Value::Null });
    reflect.merge(map! { "a" => "x", "b" => Value::Null }, true);
    assert_eq!(reflect.all(), &map! { "a" => list![Value::Null, "x"], "b" => Value::Null });

    let mut reflect = Accessor::cast(map! { "a" => Value::Null });
    reflect.merge(map! { "a" => map! { "k" => 1 } }, true);
    assert_eq!(reflect.all(), &map! { "a" => map! { 0 => Value::Null, "k" => 1 } });
}

#[test]
fn test_to_map_is_a_snapshot() {
    let mut reflect = Accessor::cast(map! { "a" => 1 });
    let snapshot = reflect.to_map();
    reflect.set("b", 2);
    assert_eq!(snapshot, map! { "a" => 1 });
    assert_eq!(reflect.to_map(), map! { "a" => 1, "b" => 2 });
}

#[test]
fn test_json_reflects_live_state() {
    let mut reflect = Accessor::cast(list![1]);
    assert_eq!(reflect.to_json_string().unwrap(), "[1]");
    reflect.set("k", "v");
    assert_eq!(reflect.to_json_string().unwrap(), r#"{"0":1,"k":"v"}"#);
    assert_eq!(serde_json::to_string(&reflect).unwrap(), r#"{"0":1,"k":"v"}"#);
}
