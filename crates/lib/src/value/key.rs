//! Keys addressing a single entry of a [`Map`](super::Map) level.
//!
//! A key is either an integer or a string. Strings that spell a canonical
//! decimal integer are normalized to integer keys on conversion, so `"7"`
//! and `7` address the same entry. Non-canonical spellings such as `"07"`,
//! `"-0"`, `"+7"` or `" 7"` stay strings.

use std::fmt;

/// A key within one level of a nested mapping.
///
/// # Examples
///
/// ```
/// # use nestkit::Key;
/// assert_eq!(Key::from("42"), Key::Int(42));
/// assert_eq!(Key::from("-7"), Key::Int(-7));
/// assert_eq!(Key::from("042"), Key::Str("042".to_string()));
/// assert_eq!(Key::from("name").to_string(), "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key, also used for sequential (list) entries
    Int(i64),
    /// Any key that is not a canonical decimal integer
    Str(String),
}

impl Key {
    /// Parses a key from text, normalizing canonical integers to [`Key::Int`].
    pub fn parse(text: &str) -> Self {
        match canonical_int(text) {
            Some(n) => Key::Int(n),
            None => Key::Str(text.to_string()),
        }
    }

    /// Returns true if this is an integer key
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Returns the integer value of an integer key
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    /// Returns the text of a string key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }
}

/// Returns the integer spelled by `text` if it is in canonical decimal form.
fn canonical_int(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.starts_with('0') && (digits.len() > 1 || text.starts_with('-')) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::parse(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        match canonical_int(&value) {
            Some(n) => Key::Int(n),
            None => Key::Str(value),
        }
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::parse(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(n) => Key::Int(n),
            Err(_) => Key::Str(value.to_string()),
        }
    }
}

impl serde::Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(n) => serializer.serialize_i64(*n),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}
