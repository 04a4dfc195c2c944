//! Typed iterator adapters.
//!
//! Each adapter walks one map level in insertion order and coerces every
//! value the same way the matching typed getter does. The first coercion
//! failure is yielded as an error and ends the iteration. Adapters borrow
//! the structure, so calling the producing method again starts a fresh pass.

use std::iter::FusedIterator;

use super::{
    Accessor,
    coerce::Coerced,
    errors::{ErrorFactory, Expected, Mismatch, raise},
};
use crate::{
    Result,
    value::{Key, Value, map},
};

/// Iterator over `(key, coerced value)` pairs of one map level.
///
/// Produced by [`Accessor::string_iter`], [`Accessor::int_iter`] and the
/// other typed iterator methods.
pub struct TypedIter<'a, T> {
    entries: Option<map::Iter<'a>>,
    pending: Option<crate::Error>,
    errors: Option<&'a ErrorFactory>,
    coerce: fn(&'a Value) -> Coerced<T>,
}

impl<'a, T> TypedIter<'a, T> {
    pub(crate) fn new(
        entries: Option<map::Iter<'a>>,
        errors: Option<&'a ErrorFactory>,
        coerce: fn(&'a Value) -> Coerced<T>,
    ) -> Self {
        Self {
            entries,
            pending: None,
            errors,
            coerce,
        }
    }

    /// An iterator that yields `error` once and then ends
    pub(crate) fn failed(
        error: crate::Error,
        errors: Option<&'a ErrorFactory>,
        coerce: fn(&'a Value) -> Coerced<T>,
    ) -> Self {
        Self {
            entries: None,
            pending: Some(error),
            errors,
            coerce,
        }
    }
}

impl<'a, T> Iterator for TypedIter<'a, T> {
    type Item = Result<(Key, Option<T>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending.take() {
            return Some(Err(error));
        }
        let (key, value) = self.entries.as_mut()?.next()?;
        match (self.coerce)(value) {
            Ok(coerced) => Some(Ok((key.clone(), coerced))),
            Err(expected) => {
                self.entries = None;
                Some(Err(raise(self.errors, Mismatch::new(key.clone(), expected, value))))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let remaining = self.entries.as_ref().map_or(0, |entries| entries.len());
        // A coercion failure ends the pass early
        (usize::from(pending + remaining > 0), Some(pending + remaining))
    }
}

impl<T> FusedIterator for TypedIter<'_, T> {}

/// Iterator over child accessors of one map level.
///
/// Produced by [`Accessor::array_reflect_iter`]. Every yielded accessor
/// borrows its sub-map from the parent, so writes through it land in the
/// parent structure.
pub struct ReflectIter<'a> {
    entries: Option<map::IterMut<'a>>,
    pending: Option<crate::Error>,
    errors: Option<ErrorFactory>,
}

impl<'a> ReflectIter<'a> {
    pub(crate) fn new(entries: Option<map::IterMut<'a>>, errors: Option<ErrorFactory>) -> Self {
        Self {
            entries,
            pending: None,
            errors,
        }
    }

    pub(crate) fn failed(error: crate::Error, errors: Option<ErrorFactory>) -> Self {
        Self {
            entries: None,
            pending: Some(error),
            errors,
        }
    }
}

impl<'a> Iterator for ReflectIter<'a> {
    type Item = Result<(Key, Option<Accessor<'a>>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending.take() {
            return Some(Err(error));
        }
        let (key, value) = self.entries.as_mut()?.next()?;
        match child(value, self.errors.as_ref()) {
            Ok(accessor) => Some(Ok((key.clone(), accessor))),
            Err(actual) => {
                self.entries = None;
                let mismatch = Mismatch {
                    key: key.clone(),
                    expected: Expected::Array,
                    actual,
                };
                Some(Err(raise(self.errors.as_ref(), mismatch)))
            }
        }
    }
}

impl FusedIterator for ReflectIter<'_> {}

/// Wraps a non-empty sub-map in an accessor sharing the parent's error factory.
///
/// Fails with the type name of any value that is neither null nor a map.
pub(crate) fn child<'m>(
    value: &'m mut Value,
    errors: Option<&ErrorFactory>,
) -> std::result::Result<Option<Accessor<'m>>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::Map(map) if map.is_empty() => Ok(None),
        Value::Map(map) => Ok(Some(Accessor::borrowed(map, errors.cloned()))),
        other => Err(other.type_name()),
    }
}
