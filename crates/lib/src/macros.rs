//! Builder macros for nested structures.

/// Builds a [`Map`](crate::Map) from `key => value` pairs, in order.
///
/// Keys go through [`Key`](crate::Key) conversion and values through
/// [`Value`](crate::Value) conversion, so literals of either kind work.
///
/// # Syntax
///
/// - `map! {}` - Empty map
/// - `map! { "a" => 1, 0 => "x" }` - Entries in insertion order
///
/// # Examples
///
/// ```rust
/// # use nestkit::{map, Value};
/// let map = map! {
///     "name" => "Alice",
///     "scores" => map! { 0 => 10, 1 => 12 },
/// };
/// assert_eq!(map.get("name"), Some(&Value::from("Alice")));
/// assert!(map.get("scores").and_then(Value::as_map).is_some_and(|m| m.is_list()));
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::value::Map::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::value::Map::new();
        $(
            map.insert($key, $value);
        )+
        map
    }};
}

/// Builds a list-shaped [`Map`](crate::Map) with keys `0..n`.
///
/// # Examples
///
/// ```rust
/// # use nestkit::list;
/// let list = list!["a", 2, true];
/// assert!(list.is_list());
/// assert_eq!(list.next_index(), Some(3));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::value::Map::new()
    };

    ($($value:expr),+ $(,)?) => {{
        let mut list = $crate::value::Map::new();
        $(
            list.push($value);
        )+
        list
    }};
}
