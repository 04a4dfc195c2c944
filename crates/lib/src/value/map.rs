//! Insertion-ordered mapping used for every level of a nested structure.
//!
//! A [`Map`] doubles as a list: entries appended with [`Map::push`] receive
//! sequential integer keys. The next sequential key is tracked separately
//! from the entries, so removing the last entry does not make its key
//! reusable until the map is cleared or renumbered.

use std::fmt;

use indexmap::IndexMap;

use super::{Key, Value};

/// Borrowing iterator over the entries of a [`Map`], in insertion order.
pub type Iter<'a> = indexmap::map::Iter<'a, Key, Value>;

/// Mutable iterator over the entries of a [`Map`], in insertion order.
pub type IterMut<'a> = indexmap::map::IterMut<'a, Key, Value>;

/// An ordered `Key -> Value` mapping.
///
/// Lookups ignore order; iteration, equality and serialization follow
/// insertion order. Updating an existing key keeps its position.
///
/// # Examples
///
/// ```
/// # use nestkit::{Key, Map, Value};
/// let mut map = Map::new();
/// map.insert("name", "Alice");
/// map.push("first");
/// map.push("second");
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get(1), Some(&Value::from("second")));
/// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [Key::from("name"), Key::Int(0), Key::Int(1)]);
/// ```
#[derive(Clone, Default)]
pub struct Map {
    entries: IndexMap<Key, Value>,
    // None once `i64::MAX` has been used as a key
    next_index: Option<i64>,
}

impl Map {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            next_index: Some(0),
        }
    }

    /// Creates a list: a map whose keys are `0..n` in order.
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut map = Map::new();
        for value in values {
            map.push(value);
        }
        map
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the map contains the given key
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Gets the value stored under a key
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    /// Gets a mutable reference to the value stored under a key
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.entries.get_mut(&key.into())
    }

    /// Inserts a value, returning the previous value under the same key.
    ///
    /// A new key is appended at the end; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        self.reserve_index(&key);
        self.entries.insert(key, value.into())
    }

    /// Appends a value under the next sequential integer key and returns that key.
    ///
    /// Returns `None` and leaves the map untouched once `i64::MAX` is taken,
    /// since there is no next key left to append under.
    pub fn push(&mut self, value: impl Into<Value>) -> Option<Key> {
        let Some(index) = self.next_index else {
            tracing::warn!(len = self.len(), "Cannot push: the next integer key is already occupied");
            return None;
        };
        let key = Key::Int(index);
        self.insert(key.clone(), value);
        Some(key)
    }

    /// Returns the value under `key`, inserting `default` first if the key is absent.
    pub fn get_or_insert(&mut self, key: impl Into<Key>, default: impl Into<Value>) -> &mut Value {
        let key = key.into();
        self.reserve_index(&key);
        self.entries.entry(key).or_insert_with(|| default.into())
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.shift_remove(&key.into())
    }

    /// Removes every entry and resets sequential numbering
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_index = Some(0);
    }

    /// Returns the key the next [`Map::push`] will use, if any is left
    pub fn next_index(&self) -> Option<i64> {
        self.next_index
    }

    /// Returns true if the keys are exactly `0..len` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, key)| i64::try_from(i).is_ok_and(|i| *key == Key::Int(i)))
    }

    /// Iterates over entries in insertion order
    pub fn iter(&self) -> Iter<'_> {
        self.entries.iter()
    }

    /// Iterates mutably over entries in insertion order
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        self.entries.iter_mut()
    }

    /// Iterates over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Iterates over values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Iterates mutably over values in insertion order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.values_mut()
    }

    /// Merges `other` into this map.
    ///
    /// Integer-keyed entries on both sides are renumbered from zero in order;
    /// string keys from `other` overwrite in place or are appended.
    ///
    /// With `recursive`, a string key present on both sides accumulates
    /// instead of overwriting: the existing value is turned into a map (any
    /// scalar, null included, becomes a one-element list), then a map from
    /// `other` is merged into it recursively while any other value is
    /// appended. Two scalars under the same key therefore end up as a list.
    ///
    /// ```
    /// # use nestkit::{list, map, Map};
    /// let mut left = map! { "a" => 1, "tags" => list!["x"] };
    /// left.merge(map! { "a" => 2, "tags" => list!["y"] }, true);
    /// assert_eq!(left, map! { "a" => list![1, 2], "tags" => list!["x", "y"] });
    /// ```
    pub fn merge(&mut self, other: Map, recursive: bool) {
        let mut merged = std::mem::take(self).renumbered();
        if recursive {
            merged.absorb(other);
        } else {
            for (key, value) in other {
                match key {
                    Key::Int(_) => {
                        merged.push(value);
                    }
                    Key::Str(_) => {
                        merged.insert(key, value);
                    }
                }
            }
        }
        *self = merged;
    }

    /// Returns a copy of this map with integer keys renumbered from zero.
    fn renumbered(self) -> Map {
        let mut map = Map::with_capacity(self.len());
        for (key, value) in self {
            match key {
                Key::Int(_) => {
                    map.push(value);
                }
                Key::Str(_) => {
                    map.insert(key, value);
                }
            }
        }
        map
    }

    /// Recursive merge step; keeps this map's own keys as they are.
    fn absorb(&mut self, other: Map) {
        for (key, value) in other {
            match key {
                Key::Int(_) => {
                    self.push(value);
                }
                Key::Str(_) => match self.entries.get_mut(&key) {
                    Some(existing) => {
                        tracing::trace!(key = %key, "Accumulating colliding values in recursive merge");
                        let was_null = existing.is_null();
                        let target = existing.make_map();
                        if was_null {
                            target.push(Value::Null);
                        }
                        match value {
                            Value::Map(incoming) => target.absorb(incoming),
                            other => {
                                target.push(other);
                            }
                        }
                    }
                    None => {
                        self.insert(key, value);
                    }
                },
            }
        }
    }

    fn reserve_index(&mut self, key: &Key) {
        match (key, self.next_index) {
            (Key::Int(n), Some(next)) if *n >= next => self.next_index = n.checked_add(1),
            _ => {}
        }
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Map {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Map {
    type Item = (&'a Key, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
