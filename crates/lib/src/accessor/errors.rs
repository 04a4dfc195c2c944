//! Error types for accessor operations.
//!
//! Typed getters fail with a type mismatch when a value cannot be read
//! losslessly as the requested type. The error raised for a mismatch is
//! configurable per accessor through an [`ErrorFactory`], which lets callers
//! map mismatches into their own error taxonomy. A missing key is never an
//! error.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::value::{Key, Value};

/// Structured error types for accessor operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AccessError {
    /// A typed getter found a value it cannot interpret as the requested type
    #[error("Field \"{key}\" is not {expected}")]
    UnexpectedValue {
        key: Key,
        expected: Expected,
        actual: &'static str,
    },

    /// Error built by a caller-supplied [`ErrorFactory`]
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),

    /// A value conversion found a different variant than requested
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The path cannot address a value
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

impl AccessError {
    pub(crate) fn type_mismatch(expected: &str, value: &Value) -> Self {
        AccessError::TypeMismatch {
            expected: expected.to_string(),
            actual: value.type_name().to_string(),
        }
    }

    /// Check if this error reports a value of the wrong type.
    ///
    /// Errors built by an [`ErrorFactory`] count as type errors, since
    /// factories are only consulted for mismatches.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            AccessError::UnexpectedValue { .. }
                | AccessError::Custom(_)
                | AccessError::TypeMismatch { .. }
        )
    }

    /// Check if this error was built by an [`ErrorFactory`]
    pub fn is_custom(&self) -> bool {
        matches!(self, AccessError::Custom(_))
    }

    /// Check if this error is about an unusable path
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, AccessError::InvalidPath { .. })
    }

    /// Get the key if this is a default mismatch error
    pub fn key(&self) -> Option<&Key> {
        match self {
            AccessError::UnexpectedValue { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Downcasts a factory-built error to its concrete type.
    pub fn custom<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            AccessError::Custom(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}

// Conversion from AccessError to the main Error type
impl From<AccessError> for crate::Error {
    fn from(err: AccessError) -> Self {
        crate::Error::Access(err)
    }
}

/// The type a typed getter was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    Scalar,
    String,
    Int,
    Float,
    Bool,
    Array,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expected::Scalar => "scalar",
            Expected::String => "string-convertible",
            Expected::Int => "int-convertible",
            Expected::Float => "float-convertible",
            Expected::Bool => "bool-convertible",
            Expected::Array => "array",
        })
    }
}

/// Details of a failed coercion, handed to an [`ErrorFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Key of the offending entry
    pub key: Key,
    /// Requested type
    pub expected: Expected,
    /// Type name of the value found
    pub actual: &'static str,
}

impl Mismatch {
    pub(crate) fn new(key: Key, expected: Expected, found: &Value) -> Self {
        Self {
            key,
            expected,
            actual: found.type_name(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field \"{}\" is not {}", self.key, self.expected)
    }
}

impl From<Mismatch> for AccessError {
    fn from(m: Mismatch) -> Self {
        AccessError::UnexpectedValue {
            key: m.key,
            expected: m.expected,
            actual: m.actual,
        }
    }
}

/// Builds the error an accessor raises on a type mismatch.
///
/// Accessors without a factory raise [`AccessError::UnexpectedValue`].
/// The factory is cloned into every child accessor.
///
/// # Examples
///
/// ```
/// # use nestkit::{map, Accessor, ErrorFactory};
/// #[derive(Debug, thiserror::Error)]
/// #[error("bad request: {0}")]
/// struct BadRequest(String);
///
/// let mut data = map! { "age" => "old" };
/// let reflect = Accessor::over(&mut data)
///     .with_error_factory(ErrorFactory::custom(|m| BadRequest(m.to_string())));
///
/// let err = reflect.int("age").unwrap_err();
/// assert_eq!(err.to_string(), "bad request: Field \"age\" is not int-convertible");
/// ```
#[derive(Clone)]
pub struct ErrorFactory(Arc<dyn Fn(Mismatch) -> AccessError + Send + Sync>);

impl ErrorFactory {
    /// Creates a factory from a function producing an [`AccessError`]
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(Mismatch) -> AccessError + Send + Sync + 'static,
    {
        Self(Arc::new(build))
    }

    /// Creates a factory producing a caller-defined error, wrapped as [`AccessError::Custom`]
    pub fn custom<E, F>(build: F) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(Mismatch) -> E + Send + Sync + 'static,
    {
        Self::new(move |mismatch| AccessError::Custom(Box::new(build(mismatch))))
    }

    pub(crate) fn build(&self, mismatch: Mismatch) -> AccessError {
        (self.0)(mismatch)
    }
}

impl fmt::Debug for ErrorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorFactory(..)")
    }
}

/// Turns a mismatch into the error configured by `factory`.
pub(crate) fn raise(factory: Option<&ErrorFactory>, mismatch: Mismatch) -> crate::Error {
    tracing::debug!(
        key = %mismatch.key,
        expected = %mismatch.expected,
        actual = mismatch.actual,
        "Typed access rejected value"
    );
    match factory {
        Some(factory) => factory.build(mismatch).into(),
        None => AccessError::from(mismatch).into(),
    }
}
