//!
//! Nestkit: typed access to nested, ordered key-value structures.
//!
//! This library wraps loosely typed nested data (decoded request payloads,
//! configuration trees, JSON documents) in an accessor that fetches values by
//! path, converts them to the expected scalar type without silent loss and
//! writes through to the caller's storage.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: A node of the structure: null, a boolean, an integer, a float, text, or a nested map.
//! * **Maps (`value::Map`)**: An insertion-ordered level of the structure. A map whose keys are `0..n` doubles as a list.
//! * **Keys (`value::Key`)**: Integer or string keys; text spelling a canonical integer addresses the integer key.
//! * **Accessors (`accessor::Accessor`)**: A view over one map level with path lookups, typed getters, write-through references and typed iterators.
//! * **Key specs (`accessor::KeySpec`)**: Single keys or fan-out selectors that fetch several values, possibly from nested levels, in one call.
//! * **Error factories (`accessor::ErrorFactory`)**: Per-accessor hooks that turn type mismatches into the caller's own error types.
//!
//! ```
//! use nestkit::{map, Accessor};
//!
//! let mut payload = map! {
//!     "page" => "2",
//!     "filters" => map! { "active" => "1" },
//! };
//! let mut request = Accessor::over(&mut payload);
//!
//! assert_eq!(request.int("page")?, Some(2));
//! assert_eq!(request.iref(["filters"]).bool("active")?, Some(true));
//! assert_eq!(request.int("missing")?, None);
//! assert!(request.bool("page").is_err());
//! # Ok::<(), nestkit::Error>(())
//! ```

pub mod accessor;
mod macros;
pub mod value;

pub use accessor::{AccessError, Accessor, ErrorFactory, IntoAccessor, KeySpec, Lookup, Selector};
pub use value::{Key, Map, Value};

/// Result type used throughout the Nestkit library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Nestkit library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured errors from the accessor module
    #[error(transparent)]
    Access(accessor::AccessError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Access(_) => "accessor",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error reports a value of the wrong type.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Access(access_err) => access_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is about an unusable path.
    pub fn is_invalid_path(&self) -> bool {
        match self {
            Error::Access(access_err) => access_err.is_invalid_path(),
            _ => false,
        }
    }

    /// Check if this error is a serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }

    /// Returns the accessor error, if this is one.
    pub fn as_access_error(&self) -> Option<&AccessError> {
        match self {
            Error::Access(access_err) => Some(access_err),
            _ => None,
        }
    }
}
