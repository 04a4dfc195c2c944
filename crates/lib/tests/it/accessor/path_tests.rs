//! Write-through reference tests
//!
//! Covers `slot` and `iref`: auto-creation of intermediate levels and
//! visibility of writes in the caller's structure.

use nestkit::{Accessor, ErrorFactory, Map, Value, map};

#[test]
fn test_slot_top_level() {
    let mut data = Map::new();
    let mut reflect = Accessor::over(&mut data);

    *reflect.slot(["qwe"]).unwrap() = Value::from("rty");
    assert_eq!(reflect.get("qwe"), Some(&Value::from("rty")));
    drop(reflect);
    assert_eq!(data, map! { "qwe" => "rty" });
}

#[test]
fn test_slot_creates_path_before_write() {
    let mut data = Map::new();
    let mut reflect = Accessor::over(&mut data);

    let slot = reflect.slot(["k1", "k2", "k3"]).unwrap();
    assert!(slot.is_null());
    assert!(reflect.has_key(["k1"]));
    assert_eq!(
        reflect.get("k1"),
        Some(&Value::from(map! { "k2" => map! { "k3" => Value::Null } }))
    );

    *reflect.slot(["k1", "k2", "k3"]).unwrap() = Value::from(3);
    drop(reflect);
    assert_eq!(data, map! { "k1" => map! { "k2" => map! { "k3" => 3 } } });
}

#[test]
fn test_slot_keeps_existing_values() {
    let mut data = map! { "a" => map! { "b" => 1, "c" => 2 } };
    let mut reflect = Accessor::over(&mut data);

    let slot = reflect.slot(["a", "b"]).unwrap();
    assert_eq!(*slot, 1);
    *slot = Value::from(10);
    drop(reflect);
    assert_eq!(data, map! { "a" => map! { "b" => 10, "c" => 2 } });
}

#[test]
fn test_slot_replaces_scalar_in_the_way() {
    let mut data = map! { "a" => "scalar" };
    let mut reflect = Accessor::over(&mut data);
    *reflect.slot(["a", "b"]).unwrap() = Value::from(true);
    drop(reflect);
    assert_eq!(data, map! { "a" => map! { "b" => true } });
}

#[test]
fn test_slot_empty_path_is_invalid() {
    let mut data = Map::new();
    let mut reflect = Accessor::over(&mut data);
    let err = reflect.slot(Vec::<&str>::new()).unwrap_err();
    assert!(err.is_invalid_path());
    assert!(!err.is_type_error());
    assert_eq!(err.module(), "accessor");
}

#[test]
fn test_iref_creates_empty_map() {
    let mut data = Map::new();
    let mut reflect = Accessor::over(&mut data);
    {
        let mut sub = reflect.iref(["k1", "k2"]);
        assert!(sub.is_empty());
        sub.set("k3", "v3");
    }
    assert_eq!(reflect.xget(&["k1".into(), "k2".into(), "k3".into()]), "v3");
    drop(reflect);
    assert_eq!(data, map! { "k1" => map! { "k2" => map! { "k3" => "v3" } } });
}

#[test]
fn test_iref_over_null_leaf() {
    let mut data = map! { "a" => Value::Null };
    let mut reflect = Accessor::over(&mut data);
    reflect.iref(["a"]).push([1, 2]);
    drop(reflect);
    assert_eq!(data, map! { "a" => nestkit::list![1, 2] });
}

#[test]
fn test_iref_nested_children_chain() {
    let mut data = Map::new();
    let mut reflect = Accessor::over(&mut data);
    reflect.iref(["a"]).iref(["b"]).set("c", 1);
    assert_eq!(reflect.xget(&["a".into(), "b".into(), "c".into()]), 1);
}

#[test]
fn test_iref_shares_error_factory() {
    let mut data = map! { "child" => map! { "n" => "x" } };
    let mut reflect = Accessor::over(&mut data).with_error_factory(ErrorFactory::new(|_| {
        nestkit::AccessError::InvalidPath {
            path: "factory".to_string(),
        }
    }));

    let child = reflect.iref(["child"]);
    assert!(child.error_factory().is_some());
    let err = child.int("n").unwrap_err();
    assert!(err.is_invalid_path());
}
