//! Composite key specs for fetching several values in one call.
//!
//! A [`KeySpec`] is either a single key or a fan-out list of [`Selector`]s.
//! A selector either names a key at the current level or descends into the
//! map under a key and applies nested selectors there. Resolution preserves
//! the order of the selectors and reports whether every key was present.

use std::borrow::Cow;

use crate::value::{Key, Map, Value};

/// What to fetch from one level of a nested structure.
///
/// # Examples
///
/// ```
/// # use nestkit::{list, map, Accessor, KeySpec, Selector, Value};
/// let mut data = map! {
///     "name" => "Alice",
///     "address" => map! { "city" => "Lyon", "zip" => "69001" },
/// };
/// let reflect = Accessor::over(&mut data);
///
/// let spec = KeySpec::many([
///     Selector::from("name"),
///     Selector::nested("address", ["zip", "city"]),
/// ]);
/// let lookup = reflect.select(&spec, &Value::Null);
/// assert!(lookup.found);
/// assert_eq!(lookup.value, Value::from(list!["Alice", list!["69001", "Lyon"]]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    /// A single key at the current level
    Key(Key),
    /// Several values at once, returned as a list in selector order
    Many(Vec<Selector>),
}

/// One element of a fan-out [`KeySpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A key at the current level
    Key(Key),
    /// Descend into the map under the key and select from there
    Nested(Key, Vec<Selector>),
}

impl KeySpec {
    /// Creates a fan-out spec
    pub fn many<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selector>,
    {
        KeySpec::Many(selectors.into_iter().map(Into::into).collect())
    }

    /// Returns true if this spec fans out
    pub fn is_many(&self) -> bool {
        matches!(self, KeySpec::Many(_))
    }

    /// Value produced when the level this spec applies to does not exist:
    /// null for a single key, a list of nulls for a fan-out.
    pub(crate) fn missing(&self) -> Value {
        match self {
            KeySpec::Key(_) => Value::Null,
            KeySpec::Many(selectors) => Value::Map(Map::list(selectors.iter().map(|_| Value::Null))),
        }
    }
}

impl Selector {
    /// Creates a selector descending into the map under `key`
    pub fn nested<K, I, S>(key: K, selectors: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = S>,
        S: Into<Selector>,
    {
        Selector::Nested(key.into(), selectors.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_from_key {
    ($($source:ty),*) => {
        $(
            impl From<$source> for KeySpec {
                fn from(value: $source) -> Self {
                    KeySpec::Key(value.into())
                }
            }

            impl From<$source> for Selector {
                fn from(value: $source) -> Self {
                    Selector::Key(value.into())
                }
            }
        )*
    };
}

impl_from_key!(Key, &Key, &str, String, i64, i32, u32, usize);

impl From<Vec<Selector>> for KeySpec {
    fn from(selectors: Vec<Selector>) -> Self {
        KeySpec::Many(selectors)
    }
}

/// Result of a lookup: the value (or default) and whether every key was present.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub value: Value,
    pub found: bool,
}

impl Lookup {
    /// Returns the value if every key was present
    pub fn into_found(self) -> Option<Value> {
        self.found.then_some(self.value)
    }
}

pub(crate) fn resolve(map: &Map, spec: &KeySpec, default: &Value) -> Lookup {
    match spec {
        KeySpec::Key(key) => resolve_key(map, key, default),
        KeySpec::Many(selectors) => resolve_many(map, selectors, default),
    }
}

fn resolve_key(map: &Map, key: &Key, default: &Value) -> Lookup {
    match map.get(key) {
        Some(value) => Lookup {
            value: value.clone(),
            found: true,
        },
        None => Lookup {
            value: default.clone(),
            found: false,
        },
    }
}

fn resolve_many(map: &Map, selectors: &[Selector], default: &Value) -> Lookup {
    let mut found = true;
    let mut values = Map::with_capacity(selectors.len());
    for selector in selectors {
        let lookup = match selector {
            Selector::Key(key) => resolve_key(map, key, default),
            Selector::Nested(key, nested) => resolve_many(&nested_level(map.get(key)), nested, default),
        };
        found &= lookup.found;
        values.push(lookup.value);
    }
    Lookup {
        value: Value::Map(values),
        found,
    }
}

/// The level a nested selector descends into.
///
/// Absent and falsy values (null, `false`, zero, `""`, `"0"`) give an empty
/// map; any other scalar is wrapped as a one-element list.
fn nested_level(value: Option<&Value>) -> Cow<'_, Map> {
    match value {
        Some(Value::Map(level)) => Cow::Borrowed(level),
        Some(value) if !is_falsy(value) => Cow::Owned(Map::list([value.clone()])),
        _ => Cow::Owned(Map::new()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Int(n) => *n == 0,
        Value::Float(x) => *x == 0.0,
        Value::Text(s) => s.is_empty() || s == "0",
        Value::Map(map) => map.is_empty(),
    }
}
