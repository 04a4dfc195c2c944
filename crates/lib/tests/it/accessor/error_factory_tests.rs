//! Error factory tests
//!
//! Covers caller-defined mismatch errors and their propagation to child
//! accessors.

use nestkit::{
    AccessError, Accessor, ErrorFactory, Key, list, map,
    accessor::{Expected, Mismatch},
};

#[derive(Debug, thiserror::Error)]
#[error("invalid field {field}: expected {expected}")]
struct BadRequest {
    field: String,
    expected: Expected,
}

fn bad_request() -> ErrorFactory {
    ErrorFactory::custom(|mismatch: Mismatch| BadRequest {
        field: mismatch.key.to_string(),
        expected: mismatch.expected,
    })
}

#[test]
fn test_custom_error_replaces_default() {
    let reflect = Accessor::cast(map! { "age" => "old" }).with_error_factory(bad_request());

    let err = reflect.int("age").unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(err.to_string(), "invalid field age: expected int-convertible");

    let access = err.as_access_error().unwrap();
    assert!(access.is_custom());
    let custom = access.custom::<BadRequest>().unwrap();
    assert_eq!(custom.field, "age");
    assert_eq!(custom.expected, Expected::Int);
}

#[test]
fn test_factory_does_not_affect_successful_reads() {
    let reflect = Accessor::cast(map! { "age" => "42" }).with_error_factory(bad_request());
    assert_eq!(reflect.int("age").unwrap(), Some(42));
    assert_eq!(reflect.int("missing").unwrap(), None);
}

#[test]
fn test_factory_can_be_reset() {
    let mut reflect = Accessor::cast(map! { "flag" => "maybe" }).with_error_factory(bad_request());
    assert!(reflect.error_factory().is_some());

    reflect.set_error_factory(None);
    assert!(reflect.error_factory().is_none());
    let err = reflect.bool("flag").unwrap_err();
    assert!(!err.as_access_error().unwrap().is_custom());
    assert_eq!(err.to_string(), r#"Field "flag" is not bool-convertible"#);
}

#[test]
fn test_factory_receives_mismatch_details() {
    let factory = ErrorFactory::new(|mismatch| {
        assert_eq!(mismatch.key, Key::Int(1));
        assert_eq!(mismatch.expected, Expected::Float);
        assert_eq!(mismatch.actual, "bool");
        AccessError::from(mismatch)
    });
    let reflect = Accessor::cast(list![1.5, true]).with_error_factory(factory);
    assert!(reflect.float(1).is_err());
}

#[test]
fn test_children_inherit_factory() {
    let mut reflect = Accessor::cast(map! {
        "nested" => map! { "count" => "many" },
        "items" => list![map! { "id" => "x" }],
    })
    .with_error_factory(bad_request());

    let child = reflect.array_reflect("nested").unwrap().unwrap();
    let err = child.int("count").unwrap_err();
    assert!(err.as_access_error().unwrap().is_custom());

    let mut items = reflect.array_reflect_iter(Some("items".into()));
    let (_, item) = items.next().unwrap().unwrap();
    let err = item.unwrap().int("id").unwrap_err();
    assert!(err.as_access_error().unwrap().custom::<BadRequest>().is_some());
}

#[test]
fn test_iterators_use_factory() {
    let reflect = Accessor::cast(list!["1", "x"]).with_error_factory(bad_request());
    let results: Vec<_> = reflect.int_iter(None).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].as_ref().unwrap_err().as_access_error().unwrap().is_custom());
}
