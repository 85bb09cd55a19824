//! Builtin failures
//!
//! Builtins report problems through [`BuiltinError`]; the registry turns it
//! into a [`Value::Error`] at the evaluator boundary, so scripts see an
//! ordinary error value and never a host panic.

use crate::position::Position;
use crate::value::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuiltinError {
    /// Argument count does not match the builtin's arity
    #[error("wrong number of arguments. got '{got}', expected '{expected}'")]
    WrongArgumentCount { got: usize, expected: usize },

    /// First argument has a kind the builtin does not handle
    #[error("argument to '{function}' not supported, got '{type_name}'")]
    Unsupported {
        function: &'static str,
        type_name: &'static str,
    },

    /// Second argument has a kind the builtin does not handle
    #[error("second argument to '{function}' not supported, got '{type_name}'")]
    UnsupportedSecond {
        function: &'static str,
        type_name: &'static str,
    },

    #[error("cannot push '{type_name}' to string")]
    PushToString { type_name: &'static str },

    #[error("index out of range. got '{index}', length '{len}'")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("cannot allocate array of '{count}' elements")]
    AllocationTooLarge { count: i64 },
}

impl BuiltinError {
    pub(crate) fn unsupported(function: &'static str, arg: &Value) -> Self {
        BuiltinError::Unsupported {
            function,
            type_name: arg.type_name(),
        }
    }
}

impl From<BuiltinError> for Value {
    /// Builtins have no source location, so the error carries the zero position.
    fn from(err: BuiltinError) -> Self {
        Value::error(Position::none(), err.to_string())
    }
}
