//! Sequence functions over strings and arrays
//!
//! Strings are byte sequences here: `len` counts bytes and `first`, `last`,
//! `rest` work on bytes. An empty input yields `nil` rather than an error,
//! so scripts can tell "no more elements" apart from a type mistake.
//!
//! `rest` and `push` always build a new container; the argument is never
//! mutated.

use super::{expect_args, BuiltinError};
use crate::value::{Value, ValueArray};

/// Length of a string (bytes) or array (elements)
pub fn len(args: &[Value]) -> Result<Value, BuiltinError> {
    let [arg] = expect_args::<1>(args)?;
    let length = match arg {
        Value::String(s) => s.len(),
        Value::Array(arr) => arr.len(),
        other => return Err(BuiltinError::unsupported("len", other)),
    };
    // A Vec or byte slice never holds more than isize::MAX entries.
    Ok(Value::Integer(length as i64))
}

/// First byte of a string or first element of an array
pub fn first(args: &[Value]) -> Result<Value, BuiltinError> {
    let [arg] = expect_args::<1>(args)?;
    match arg {
        Value::String(s) => Ok(s.first().map_or(Value::Nil, |b| Value::string([*b]))),
        Value::Array(arr) => Ok(arr.first().unwrap_or(Value::Nil)),
        other => Err(BuiltinError::unsupported("first", other)),
    }
}

/// Last byte of a string or last element of an array
pub fn last(args: &[Value]) -> Result<Value, BuiltinError> {
    let [arg] = expect_args::<1>(args)?;
    match arg {
        Value::String(s) => Ok(s.last().map_or(Value::Nil, |b| Value::string([*b]))),
        Value::Array(arr) => Ok(arr.last().unwrap_or(Value::Nil)),
        other => Err(BuiltinError::unsupported("last", other)),
    }
}

/// Everything but the first byte/element, as a new container
pub fn rest(args: &[Value]) -> Result<Value, BuiltinError> {
    let [arg] = expect_args::<1>(args)?;
    match arg {
        Value::String(s) => match s.split_first() {
            Some((_, tail)) => Ok(Value::string(tail)),
            None => Ok(Value::Nil),
        },
        Value::Array(arr) => {
            let elements = arr.elements();
            match elements.split_first() {
                Some((_, tail)) => Ok(Value::Array(tail.iter().cloned().collect())),
                None => Ok(Value::Nil),
            }
        }
        other => Err(BuiltinError::unsupported("rest", other)),
    }
}

/// Append to a string (string values only) or array (any value)
pub fn push(args: &[Value]) -> Result<Value, BuiltinError> {
    let [container, value] = expect_args::<2>(args)?;
    match container {
        Value::String(s) => match value {
            Value::String(tail) => {
                let mut bytes = Vec::with_capacity(s.len() + tail.len());
                bytes.extend_from_slice(s);
                bytes.extend_from_slice(tail);
                Ok(Value::string(bytes))
            }
            other => Err(BuiltinError::PushToString {
                type_name: other.type_name(),
            }),
        },
        Value::Array(arr) => {
            let mut elements = Vec::with_capacity(arr.len() + 1);
            elements.extend(arr.elements().iter().cloned());
            elements.push(value.clone());
            Ok(Value::Array(ValueArray::from_vec(elements)))
        }
        other => Err(BuiltinError::unsupported("push", other)),
    }
}
