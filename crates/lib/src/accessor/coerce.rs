//! Lossless coercion of stored values to the types typed getters return.
//!
//! Each function returns `Ok(None)` for null, `Ok(Some(_))` for an accepted
//! value and `Err(expected)` for a rejected one; the accessor attaches the key
//! and raises the configured error. Booleans never coerce to text or numbers,
//! and numeric text must spell the number exactly.

use std::borrow::Cow;

use super::errors::Expected;
use crate::value::{Map, Value};

pub(crate) type Coerced<T> = Result<Option<T>, Expected>;

/// Characters stripped by trimming
const TRIMMED: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

pub(crate) fn scalar(value: &Value) -> Coerced<&Value> {
    match value {
        Value::Null => Ok(None),
        Value::Map(_) => Err(Expected::Scalar),
        other => Ok(Some(other)),
    }
}

pub(crate) fn string(value: &Value, trim: bool) -> Coerced<String> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::Text(s) => s.clone(),
        Value::Int(n) => n.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Bool(_) | Value::Map(_) => return Err(Expected::String),
    };
    Ok(Some(if trim {
        text.trim_matches(TRIMMED.as_slice()).to_string()
    } else {
        text
    }))
}

pub(crate) fn trimmed_string(value: &Value) -> Coerced<String> {
    string(value, true)
}

pub(crate) fn int(value: &Value) -> Coerced<i64> {
    match value {
        Value::Int(n) => Ok(Some(*n)),
        other => match numeric_text(other, Expected::Int)? {
            None => Ok(None),
            Some(text) => parse_digits(&text).map(Some).ok_or(Expected::Int),
        },
    }
}

pub(crate) fn float(value: &Value) -> Coerced<f64> {
    match value {
        Value::Float(x) => Ok(Some(*x)),
        Value::Int(n) if *n >= 0 => exact_whole(i128::from(*n)).map(Some),
        other => match numeric_text(other, Expected::Float)? {
            None => Ok(None),
            Some(text) if !is_decimal(&text) => Err(Expected::Float),
            Some(text) if !text.contains('.') => match text.parse::<u128>() {
                Ok(n) => i128::try_from(n).map_err(|_| Expected::Float).and_then(exact_whole).map(Some),
                Err(_) => Err(Expected::Float),
            },
            Some(text) => text.parse().map(Some).map_err(|_| Expected::Float),
        },
    }
}

/// Converts a whole number that `f64` represents exactly.
fn exact_whole(n: i128) -> Result<f64, Expected> {
    let x = n as f64;
    if x as i128 == n { Ok(x) } else { Err(Expected::Float) }
}

pub(crate) fn bool(value: &Value) -> Coerced<bool> {
    match value {
        Value::Bool(b) => Ok(Some(*b)),
        other => match numeric_text(other, Expected::Bool)?.as_deref() {
            None => Ok(None),
            Some("" | "0") => Ok(Some(false)),
            Some("1") => Ok(Some(true)),
            Some(_) => Err(Expected::Bool),
        },
    }
}

pub(crate) fn array(value: &Value) -> Coerced<&Map> {
    match value {
        Value::Null => Ok(None),
        Value::Map(map) => Ok(Some(map)),
        _ => Err(Expected::Array),
    }
}

/// Textual form of a non-boolean scalar; `None` for null.
fn numeric_text(value: &Value, expected: Expected) -> Result<Option<Cow<'_, str>>, Expected> {
    match value {
        Value::Null => Ok(None),
        Value::Text(s) => Ok(Some(Cow::Borrowed(s))),
        Value::Int(n) => Ok(Some(Cow::Owned(n.to_string()))),
        Value::Float(x) => Ok(Some(Cow::Owned(x.to_string()))),
        Value::Bool(_) | Value::Map(_) => Err(expected),
    }
}

/// Parses ASCII digits without a redundant leading zero.
fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

/// Matches `digits[.digits]`.
fn is_decimal(text: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match text.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(text),
    }
}
