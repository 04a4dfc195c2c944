//! Value types for nested structures.
//!
//! This module provides the [`Value`] enum that represents every node of a
//! nested structure, the [`Map`] container used for each level, and the
//! [`Key`] type addressing entries within a level. Values are either scalars
//! (null, booleans, integers, floats, text) or nested maps; a map with keys
//! `0..n` plays the role of a list.

use std::fmt;

use crate::accessor::AccessError;

pub mod json;
pub mod key;
pub mod map;

pub use key::Key;
pub use map::Map;

/// Shared null used where an absent entry reads as null.
pub(crate) static NULL: Value = Value::Null;

/// A node in a nested structure.
///
/// # Direct Comparisons
///
/// `Value` implements `PartialEq` with primitive types for ergonomic comparisons.
/// Comparisons are strict: the variant must match as well as the contents.
///
/// ```
/// # use nestkit::Value;
/// let text = Value::from("hello");
/// let number = Value::from(42);
/// let ratio = Value::from(0.5);
///
/// assert!(text == "hello");
/// assert!(number == 42);
/// assert!(ratio == 0.5);
///
/// // No cross-type equality
/// assert!(!(number == 42.0));
/// assert!(!(Value::from("42") == 42));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    // Scalars
    /// Null/empty value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),

    /// Nested level of the structure
    Map(Map),
}

impl Value {
    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value is not a map (null counts as scalar here)
    pub fn is_scalar(&self) -> bool {
        !self.is_map()
    }

    /// Returns true if this value is a nested map
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Map(_) => "map",
        }
    }

    /// Returns the boolean if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a `Float`
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text if this is a `Text`
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested map if this is a `Map`
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the nested map mutably if this is a `Map`
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Normalizes this value into a map.
    ///
    /// Null becomes an empty map, a map is returned as is, and any other
    /// scalar becomes a one-element list.
    ///
    /// ```
    /// # use nestkit::{list, Map, Value};
    /// assert_eq!(Value::Null.into_map(), Map::new());
    /// assert_eq!(Value::from("x").into_map(), list!["x"]);
    /// ```
    pub fn into_map(self) -> Map {
        match self {
            Value::Null => Map::new(),
            Value::Map(map) => map,
            scalar => Map::list([scalar]),
        }
    }

    /// In-place [`Value::into_map`]; returns the resulting map.
    pub(crate) fn make_map(&mut self) -> &mut Map {
        match self {
            Value::Map(map) => map,
            other => {
                *other = Value::Map(std::mem::take(other).into_map());
                other.ensure_map()
            }
        }
    }

    /// Returns the nested map, first replacing any non-map value with an empty map.
    pub fn ensure_map(&mut self) -> &mut Map {
        match self {
            Value::Map(map) => map,
            other => {
                *other = Value::Map(Map::new());
                other.ensure_map()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Map(map) => write!(f, "{map}"),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        // Beyond i64 the value is kept as a float, the way JSON numbers are
        match i64::try_from(value) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Float(value as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Map(Map::list(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// TryFrom implementations for exact variant extraction
impl TryFrom<&Value> for String {
    type Error = AccessError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(AccessError::type_mismatch("String", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = AccessError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(AccessError::type_mismatch("&str", value)),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = AccessError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            _ => Err(AccessError::type_mismatch("i64", value)),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = AccessError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(x) => Ok(*x),
            _ => Err(AccessError::type_mismatch("f64", value)),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = AccessError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(AccessError::type_mismatch("bool", value)),
        }
    }
}

impl TryFrom<&Value> for Map {
    type Error = AccessError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Map(map) => Ok(map.clone()),
            _ => Err(AccessError::type_mismatch("Map", value)),
        }
    }
}

// PartialEq implementations for comparing Value with other types
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        *self == *other as i64
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(x) if x == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for f64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
