//! Typed access to nested structures.
//!
//! An [`Accessor`] wraps one [`Map`] level and offers path lookups, lossless
//! typed getters, write-through references into nested levels and typed
//! iterators. The wrapped map is usually borrowed from the caller, so every
//! write made through the accessor (or through any child accessor derived
//! from it) lands in the caller's structure.
//!
//! # Examples
//!
//! ```
//! # use nestkit::{map, Accessor, KeySpec, Value};
//! let mut data = Value::from(map! {
//!     "user" => map! { "name" => " Alice ", "age" => "42" },
//! });
//!
//! let mut reflect = Accessor::new(&mut data);
//! let user = reflect.iref(["user"]);
//! assert_eq!(user.string("name")?, Some("Alice".to_string()));
//! assert_eq!(user.int("age")?, Some(42));
//!
//! *reflect.slot(["user", "address", "city"])? = Value::from("Lyon");
//! let path = [KeySpec::from("user"), "address".into(), "city".into()];
//! assert_eq!(reflect.xget(&path), "Lyon");
//! # Ok::<(), nestkit::Error>(())
//! ```

use std::ops::{Deref, DerefMut};

use serde::{Serialize, Serializer};

use crate::{
    Result,
    value::{Key, Map, NULL, Value, map},
};

mod coerce;
pub mod errors;
pub mod iter;
pub mod select;

use coerce::Coerced;
pub use errors::{AccessError, ErrorFactory, Expected, Mismatch};
pub use iter::{ReflectIter, TypedIter};
pub use select::{KeySpec, Lookup, Selector};

use errors::raise;
use select::resolve;

/// Storage behind an accessor: the caller's map or one produced by [`Accessor::cast`].
#[derive(Debug)]
enum Backing<'a> {
    Borrowed(&'a mut Map),
    Owned(Map),
}

impl Deref for Backing<'_> {
    type Target = Map;

    fn deref(&self) -> &Map {
        match self {
            Backing::Borrowed(map) => map,
            Backing::Owned(map) => map,
        }
    }
}

impl DerefMut for Backing<'_> {
    fn deref_mut(&mut self) -> &mut Map {
        match self {
            Backing::Borrowed(map) => map,
            Backing::Owned(map) => map,
        }
    }
}

/// Typed accessor over one level of a nested structure.
///
/// Missing keys are never an error: lookups fall back to defaults and typed
/// getters return `Ok(None)`. Typed getters fail only when a value exists but
/// cannot be read losslessly as the requested type; the error raised is built
/// by the accessor's [`ErrorFactory`] when one is configured.
#[derive(Debug)]
pub struct Accessor<'a> {
    map: Backing<'a>,
    errors: Option<ErrorFactory>,
}

impl<'a> Accessor<'a> {
    /// Wraps the map stored in `value`.
    ///
    /// A value that is not a map is replaced by an empty map first, and the
    /// replacement is visible through `value` afterwards.
    ///
    /// ```
    /// # use nestkit::{Accessor, Value};
    /// let mut value = Value::from("scalar");
    /// Accessor::new(&mut value).set("a", 1);
    /// assert_eq!(value, Value::from(nestkit::map! { "a" => 1 }));
    /// ```
    pub fn new(value: &'a mut Value) -> Self {
        Self::over(value.ensure_map())
    }

    /// Wraps a caller-owned map
    pub fn over(map: &'a mut Map) -> Self {
        Self::borrowed(map, None)
    }

    pub(crate) fn borrowed(map: &'a mut Map, errors: Option<ErrorFactory>) -> Self {
        Self {
            map: Backing::Borrowed(map),
            errors,
        }
    }

    fn owned(map: Map) -> Self {
        Self {
            map: Backing::Owned(map),
            errors: None,
        }
    }

    /// Normalizes any supported input into an accessor.
    ///
    /// An accessor is returned unchanged. Anything else is materialized into
    /// a fresh map owned by the new accessor: null becomes an empty map, a
    /// scalar becomes a one-element list.
    ///
    /// ```
    /// # use nestkit::{list, Accessor, Value};
    /// assert_eq!(Accessor::cast(Value::from(5)).all(), &list![5]);
    /// assert!(Accessor::cast(Value::Null).is_empty());
    /// ```
    pub fn cast(input: impl IntoAccessor<'a>) -> Self {
        input.into_accessor()
    }

    // === Membership ===

    /// Returns true if every value is stored directly in this level.
    ///
    /// Comparison is strict: `1`, `1.0` and `"1"` are different values.
    pub fn has<I, V>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        values.into_iter().all(|value| {
            let value = value.into();
            self.map.values().any(|stored| *stored == value)
        })
    }

    /// Returns true if every key exists in this level, even with a null value
    pub fn has_key<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        keys.into_iter().all(|key| self.map.contains_key(key))
    }

    // === Lookup ===

    /// Returns the whole wrapped map
    pub fn all(&self) -> &Map {
        &self.map
    }

    /// Returns the value stored directly under `key`
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.map.get(key)
    }

    /// Returns the value under `key`, or `default` when the key is absent
    pub fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        match self.map.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Resolves a key spec against this level.
    ///
    /// A single key yields its value or `default`. A fan-out yields a list in
    /// selector order, with `default` standing in for every missing key.
    /// [`Lookup::found`] is true only if every key was present.
    pub fn select(&self, spec: &KeySpec, default: &Value) -> Lookup {
        resolve(&self.map, spec, default)
    }

    /// Fetches several keys at once, filling gaps from fallback sources.
    ///
    /// Each key is looked up in this level first, then in each map of
    /// `defaults` in order. The first non-map entry of `defaults` is used as
    /// the value of every key still unresolved, and the search stops there.
    /// Keys found nowhere map to null. Every requested key is present in the
    /// result.
    ///
    /// ```
    /// # use nestkit::{map, Accessor, Value};
    /// let mut data = map! { "a" => 1 };
    /// let reflect = Accessor::over(&mut data);
    /// assert_eq!(reflect.aget(["a", "b"], &[Value::from(0)]), map! { "a" => 1, "b" => 0 });
    /// ```
    pub fn aget<I, K>(&self, keys: I, defaults: &[Value]) -> Map
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        keys.into_iter()
            .map(|key| {
                let key = key.into();
                let value = self.fallback(&key, defaults).clone();
                (key, value)
            })
            .collect()
    }

    fn fallback<'s>(&'s self, key: &Key, defaults: &'s [Value]) -> &'s Value {
        if let Some(value) = self.map.get(key) {
            return value;
        }
        for source in defaults {
            match source {
                Value::Map(map) => {
                    if let Some(value) = map.get(key) {
                        return value;
                    }
                }
                uniform => return uniform,
            }
        }
        &NULL
    }

    /// Walks a path of nested levels and resolves the last segment there.
    ///
    /// Every segment but the last must be a single key addressing a nested
    /// map. When the walk breaks off, the result is null, or a list of nulls
    /// as long as the fan-out if the last segment is one. An empty path
    /// returns a copy of the whole map.
    ///
    /// ```
    /// # use nestkit::{list, map, Accessor, KeySpec, Value};
    /// let mut data = map! { "n1" => map! { "n2" => map! { "k1" => "x" } } };
    /// let reflect = Accessor::over(&mut data);
    ///
    /// let path = ["n1".into(), "n2".into(), KeySpec::many(["k1", "k2"])];
    /// assert_eq!(reflect.xget(&path), Value::from(list!["x", Value::Null]));
    ///
    /// let broken = ["n1".into(), "nope".into(), KeySpec::many(["k1", "k2"])];
    /// assert_eq!(reflect.xget(&broken), Value::from(list![Value::Null, Value::Null]));
    /// ```
    pub fn xget(&self, path: &[KeySpec]) -> Value {
        let Some((last, parents)) = path.split_last() else {
            return Value::Map(self.map.clone());
        };
        let mut level: &Map = &self.map;
        for segment in parents {
            let next = match segment {
                KeySpec::Key(key) => level.get(key).and_then(Value::as_map),
                KeySpec::Many(_) => None,
            };
            match next {
                Some(map) => level = map,
                None => return last.missing(),
            }
        }
        resolve(level, last, &Value::Null).value
    }

    // === References ===

    /// Returns a mutable reference to the value at `path`.
    ///
    /// Missing levels along the path are created as empty maps, and any
    /// non-map value in the way is replaced by one. The addressed entry is
    /// created as null if absent, so the whole path exists afterwards even
    /// if nothing is written through the reference.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidPath`] for an empty path.
    pub fn slot<I, K>(&mut self, path: I) -> Result<&mut Value>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let mut keys = path.into_iter().map(Into::into);
        let Some(first) = keys.next() else {
            return Err(AccessError::InvalidPath {
                path: "(empty path)".to_string(),
            }
            .into());
        };
        Ok(descend(&mut self.map, first, keys))
    }

    /// Returns an accessor over the map at `path`, creating it if needed.
    ///
    /// Uses the same auto-creation as [`Accessor::slot`]; the addressed
    /// value itself is replaced by an empty map unless it already is one.
    /// An empty path reborrows this accessor's own map. The child shares
    /// this accessor's error factory.
    pub fn iref<I, K>(&mut self, path: I) -> Accessor<'_>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let mut keys = path.into_iter().map(Into::into);
        let errors = self.errors.clone();
        match keys.next() {
            None => Accessor::borrowed(&mut self.map, errors),
            Some(first) => Accessor::borrowed(descend(&mut self.map, first, keys).ensure_map(), errors),
        }
    }

    // === Typed getters ===

    /// Returns the value under `key` if it is a scalar (or null).
    ///
    /// # Errors
    ///
    /// Fails if the value is a map.
    pub fn scalar(&self, key: impl Into<Key>) -> Result<Option<&Value>> {
        self.coerced(key.into(), coerce::scalar)
    }

    /// Returns the value under `key` as trimmed text.
    ///
    /// Integers and floats are rendered in their shortest exact form.
    ///
    /// # Errors
    ///
    /// Fails for booleans and maps.
    pub fn string(&self, key: impl Into<Key>) -> Result<Option<String>> {
        self.string_with(key, true)
    }

    /// Like [`Accessor::string`], with trimming optional
    pub fn string_with(&self, key: impl Into<Key>, trim: bool) -> Result<Option<String>> {
        self.coerced(key.into(), |value| coerce::string(value, trim))
    }

    /// Returns the value under `key` as an integer.
    ///
    /// Text must be plain ASCII digits without a leading zero; floats must
    /// be integral and non-negative.
    ///
    /// # Errors
    ///
    /// Fails for anything that does not convert exactly, including booleans.
    pub fn int(&self, key: impl Into<Key>) -> Result<Option<i64>> {
        self.coerced(key.into(), coerce::int)
    }

    /// Returns the value under `key` as a float.
    ///
    /// # Errors
    ///
    /// Fails unless the value is a number or text of the form `digits[.digits]`.
    pub fn float(&self, key: impl Into<Key>) -> Result<Option<f64>> {
        self.coerced(key.into(), coerce::float)
    }

    /// Returns the value under `key` as a boolean.
    ///
    /// Besides booleans, only values spelled `""`, `"0"` or `"1"` convert.
    ///
    /// # Errors
    ///
    /// Fails for any other value.
    pub fn bool(&self, key: impl Into<Key>) -> Result<Option<bool>> {
        self.coerced(key.into(), coerce::bool)
    }

    /// Returns the map under `key`.
    ///
    /// # Errors
    ///
    /// Fails if the value is a non-null scalar.
    pub fn array(&self, key: impl Into<Key>) -> Result<Option<&Map>> {
        self.coerced(key.into(), coerce::array)
    }

    /// Returns an accessor over the map under `key`.
    ///
    /// Null, absent and empty maps give `None`. The child borrows the sub-map
    /// and shares this accessor's error factory.
    ///
    /// # Errors
    ///
    /// Fails if the value is a non-null scalar.
    pub fn array_reflect(&mut self, key: impl Into<Key>) -> Result<Option<Accessor<'_>>> {
        let key = key.into();
        let errors = self.errors.clone();
        match self.map.get_mut(&key) {
            None => Ok(None),
            Some(value) => iter::child(value, errors.as_ref()).map_err(|actual| {
                let mismatch = Mismatch {
                    key,
                    expected: Expected::Array,
                    actual,
                };
                raise(errors.as_ref(), mismatch)
            }),
        }
    }

    fn coerced<'s, T>(
        &'s self,
        key: Key,
        convert: impl FnOnce(&'s Value) -> Coerced<T>,
    ) -> Result<Option<T>> {
        let value = self.map.get(&key).unwrap_or(&NULL);
        convert(value).map_err(|expected| raise(self.errors.as_ref(), Mismatch::new(key, expected, value)))
    }

    // === Typed iterators ===

    /// Iterates over a level as trimmed text.
    ///
    /// `None` walks this accessor's own map; `Some(key)` walks the map under
    /// that key, and yields nothing if it is null, absent or empty.
    ///
    /// ```
    /// # use nestkit::{list, map, Accessor, Key};
    /// let mut data = map! { "tags" => list![" a ", 2] };
    /// let reflect = Accessor::over(&mut data);
    /// let tags: Vec<_> = reflect
    ///     .string_iter(Some("tags".into()))
    ///     .collect::<nestkit::Result<_>>()?;
    /// assert_eq!(
    ///     tags,
    ///     [(Key::Int(0), Some("a".to_string())), (Key::Int(1), Some("2".to_string()))]
    /// );
    /// # Ok::<(), nestkit::Error>(())
    /// ```
    pub fn string_iter(&self, scope: Option<Key>) -> TypedIter<'_, String> {
        self.typed_iter(scope, coerce::trimmed_string)
    }

    /// Iterates over a level as integers
    pub fn int_iter(&self, scope: Option<Key>) -> TypedIter<'_, i64> {
        self.typed_iter(scope, coerce::int)
    }

    /// Iterates over a level as floats
    pub fn float_iter(&self, scope: Option<Key>) -> TypedIter<'_, f64> {
        self.typed_iter(scope, coerce::float)
    }

    /// Iterates over a level as booleans
    pub fn bool_iter(&self, scope: Option<Key>) -> TypedIter<'_, bool> {
        self.typed_iter(scope, coerce::bool)
    }

    /// Iterates over a level as scalars
    pub fn scalar_iter(&self, scope: Option<Key>) -> TypedIter<'_, &Value> {
        self.typed_iter(scope, coerce::scalar)
    }

    /// Iterates over a level as nested maps
    pub fn array_iter(&self, scope: Option<Key>) -> TypedIter<'_, &Map> {
        self.typed_iter(scope, coerce::array)
    }

    /// Iterates over a level as child accessors.
    ///
    /// Entries holding null or an empty map yield `None`. Children share
    /// this accessor's error factory.
    pub fn array_reflect_iter(&mut self, scope: Option<Key>) -> ReflectIter<'_> {
        let errors = self.errors.clone();
        let Some(key) = scope else {
            return ReflectIter::new(Some(self.map.iter_mut()), errors);
        };
        match self.map.get_mut(&key) {
            None | Some(Value::Null) => ReflectIter::new(None, errors),
            Some(Value::Map(level)) => ReflectIter::new(Some(level.iter_mut()), errors),
            Some(other) => {
                let error = raise(errors.as_ref(), Mismatch::new(key, Expected::Array, other));
                ReflectIter::failed(error, errors)
            }
        }
    }

    fn typed_iter<'s, T>(
        &'s self,
        scope: Option<Key>,
        convert: fn(&'s Value) -> Coerced<T>,
    ) -> TypedIter<'s, T> {
        let errors = self.errors.as_ref();
        let Some(key) = scope else {
            return TypedIter::new(Some(self.map.iter()), errors, convert);
        };
        match self.coerced(key, coerce::array) {
            Ok(level) => TypedIter::new(level.map(Map::iter), errors, convert),
            Err(error) => TypedIter::failed(error, errors, convert),
        }
    }

    // === Mutation ===

    /// Stores a value under `key`, keeping the key's position if it exists
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.map.insert(key, value);
        self
    }

    /// Replaces the whole wrapped map
    pub fn replace(&mut self, map: Map) -> &mut Self {
        *self.map = map;
        self
    }

    /// Appends each value under the next sequential integer key.
    ///
    /// Values are dropped with a warning once `i64::MAX` is in use as a key;
    /// see [`Map::push`].
    pub fn push<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            self.map.push(value);
        }
        self
    }

    /// Merges `other` into the wrapped map; see [`Map::merge`]
    pub fn merge(&mut self, other: Map, recursive: bool) -> &mut Self {
        self.map.merge(other, recursive);
        self
    }

    /// Removes the given keys; absent keys are ignored
    pub fn unset<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        for key in keys {
            self.map.remove(key);
        }
        self
    }

    /// Removes every entry
    pub fn clear(&mut self) -> &mut Self {
        self.map.clear();
        self
    }

    // === Introspection ===

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Iterates over the entries of this level in insertion order
    pub fn iter(&self) -> map::Iter<'_> {
        self.map.iter()
    }

    /// Returns a copy of the current contents
    pub fn to_map(&self) -> Map {
        self.map.clone()
    }

    /// Renders the current contents as compact JSON
    pub fn to_json_string(&self) -> Result<String> {
        self.map.to_json_string()
    }

    // === Error configuration ===

    /// Sets the factory used to build type-mismatch errors; `None` restores the default
    pub fn set_error_factory(&mut self, factory: Option<ErrorFactory>) -> &mut Self {
        self.errors = factory;
        self
    }

    /// Builder form of [`Accessor::set_error_factory`]
    pub fn with_error_factory(mut self, factory: ErrorFactory) -> Self {
        self.errors = Some(factory);
        self
    }

    pub fn error_factory(&self) -> Option<&ErrorFactory> {
        self.errors.as_ref()
    }
}

/// Follows a non-empty path from `map`, creating missing levels.
fn descend(map: &mut Map, first: Key, rest: impl Iterator<Item = Key>) -> &mut Value {
    let mut slot = map.get_or_insert(first, Value::Null);
    for key in rest {
        if !slot.is_map() {
            tracing::trace!(key = %key, found = slot.type_name(), "Creating intermediate level");
        }
        slot = slot.ensure_map().get_or_insert(key, Value::Null);
    }
    slot
}

impl Serialize for Accessor<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.all().serialize(serializer)
    }
}

impl<'s> IntoIterator for &'s Accessor<'_> {
    type Item = (&'s Key, &'s Value);
    type IntoIter = map::Iter<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Map> for Accessor<'_> {
    fn from(map: Map) -> Self {
        Accessor::owned(map)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Accessor<'_> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Accessor::owned(iter.into_iter().collect())
    }
}

/// Inputs accepted by [`Accessor::cast`].
pub trait IntoAccessor<'a> {
    fn into_accessor(self) -> Accessor<'a>;
}

impl<'a> IntoAccessor<'a> for Accessor<'a> {
    fn into_accessor(self) -> Accessor<'a> {
        self
    }
}

impl<'a> IntoAccessor<'a> for Value {
    fn into_accessor(self) -> Accessor<'a> {
        if !self.is_null() && self.is_scalar() {
            tracing::debug!(kind = self.type_name(), "Wrapping scalar in a one-element list");
        }
        Accessor::owned(self.into_map())
    }
}

impl<'a> IntoAccessor<'a> for Map {
    fn into_accessor(self) -> Accessor<'a> {
        Accessor::owned(self)
    }
}

impl<'a> IntoAccessor<'a> for &Map {
    fn into_accessor(self) -> Accessor<'a> {
        Accessor::owned(self.clone())
    }
}

impl<'a> IntoAccessor<'a> for serde_json::Value {
    fn into_accessor(self) -> Accessor<'a> {
        Value::from(self).into_accessor()
    }
}

impl<'a, T: Into<Value>> IntoAccessor<'a> for Vec<T> {
    fn into_accessor(self) -> Accessor<'a> {
        Accessor::owned(Map::list(self))
    }
}
