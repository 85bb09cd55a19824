//! Array allocation and in-place mutation
//!
//! `alloc` is the only way to make an array of a chosen size from a script,
//! and `set` is the only builtin that mutates an existing array.

use super::{expect_args, BuiltinError};
use crate::value::{Value, ValueArray};

/// `alloc(count, fill)`: new array of `count` slots, each holding `fill`
///
/// Every slot holds the same `fill` value. When `fill` is itself an array,
/// all slots alias that one array. A negative count yields nil.
pub fn alloc(args: &[Value]) -> Result<Value, BuiltinError> {
    let [count, fill] = expect_args::<2>(args)?;
    let count = match count {
        Value::Integer(n) => *n,
        other => return Err(BuiltinError::unsupported("alloc", other)),
    };
    if count < 0 {
        return Ok(Value::Nil);
    }

    let too_large = BuiltinError::AllocationTooLarge { count };
    let slots = usize::try_from(count).map_err(|_| too_large.clone())?;
    let mut elements = Vec::new();
    elements.try_reserve_exact(slots).map_err(|_| too_large)?;
    elements.resize(slots, fill.clone());
    Ok(Value::Array(ValueArray::from_vec(elements)))
}

/// `set(array, index, value)`: overwrite one slot in place, return nil
///
/// The write is visible through every reference to the array. An index
/// outside `0..len` is an error and leaves the array untouched.
pub fn set(args: &[Value]) -> Result<Value, BuiltinError> {
    let [target, index, value] = expect_args::<3>(args)?;
    let arr = match target {
        Value::Array(arr) => arr,
        other => return Err(BuiltinError::unsupported("set", other)),
    };
    let index = match index {
        Value::Integer(i) => *i,
        other => {
            return Err(BuiltinError::UnsupportedSecond {
                function: "set",
                type_name: other.type_name(),
            })
        }
    };

    let stored = usize::try_from(index)
        .map(|slot| arr.set(slot, value.clone()))
        .unwrap_or(false);
    if !stored {
        return Err(BuiltinError::IndexOutOfRange {
            index,
            len: arr.len(),
        });
    }
    Ok(Value::Nil)
}
