//! Runtime value representation
//!
//! - Integer, Boolean, Nil: immediate values
//! - String: reference-counted, immutable byte sequence
//! - Array: shared handle to a fixed-length element vector; clones alias it
//! - Error: message plus source position, returned like any other value
//! - Builtin: reference into the static builtin table

use crate::position::Position;
use crate::stdlib::Builtin;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared array handle.
///
/// Cloning bumps the refcount; every clone sees the same elements. Length is
/// fixed at construction and the only mutation is [`ValueArray::set`], so
/// operations that "change" an array (push, rest) build a new one instead.
#[derive(Clone)]
pub struct ValueArray(Rc<RefCell<Vec<Value>>>);

impl ValueArray {
    pub fn new() -> Self {
        ValueArray::from_vec(Vec::new())
    }

    pub fn from_vec(v: Vec<Value>) -> Self {
        ValueArray(Rc::new(RefCell::new(v)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Get element by index. Returns the stored handle, not a copy.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn first(&self) -> Option<Value> {
        self.0.borrow().first().cloned()
    }

    pub fn last(&self) -> Option<Value> {
        self.0.borrow().last().cloned()
    }

    /// Borrow the elements for reading.
    pub fn elements(&self) -> Ref<'_, [Value]> {
        Ref::map(self.0.borrow(), |v| v.as_slice())
    }

    /// Shallow copy of the elements into a fresh Vec.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Overwrite a slot in place. Visible through every alias.
    ///
    /// Returns false (and changes nothing) if `index` is out of range.
    pub fn set(&self, index: usize, value: Value) -> bool {
        let mut inner = self.0.borrow_mut();
        if index < inner.len() {
            inner[index] = value;
            true
        } else {
            false
        }
    }

    /// True if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &ValueArray) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn as_ptr(&self) -> *const RefCell<Vec<Value>> {
        Rc::as_ptr(&self.0)
    }
}

impl Default for ValueArray {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    // Array pairs currently being compared; meeting a pair again counts as equal.
    static COMPARING: RefCell<Vec<(*const RefCell<Vec<Value>>, *const RefCell<Vec<Value>>)>> =
        const { RefCell::new(Vec::new()) };
}

impl PartialEq for ValueArray {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let pair = (self.as_ptr(), other.as_ptr());
        if COMPARING.with(|stack| stack.borrow().contains(&pair)) {
            return true;
        }
        COMPARING.with(|stack| stack.borrow_mut().push(pair));
        let equal = *self.elements() == *other.elements();
        COMPARING.with(|stack| stack.borrow_mut().pop());
        equal
    }
}

impl From<Vec<Value>> for ValueArray {
    fn from(v: Vec<Value>) -> Self {
        ValueArray::from_vec(v)
    }
}

impl FromIterator<Value> for ValueArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueArray::from_vec(iter.into_iter().collect())
    }
}

impl fmt::Debug for ValueArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_cycle_guard(self, f, |f| f.debug_list().entries(self.elements().iter()).finish())
    }
}

/// Error payload: a message and where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub message: String,
    pub position: Position,
}

impl ErrorValue {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        ErrorValue {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.position.is_none() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.position, self.message)
        }
    }
}

/// Runtime value type
#[derive(Clone)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// Boolean
    Boolean(bool),
    /// Immutable byte string
    String(Rc<[u8]>),
    /// Shared, fixed-length array
    Array(ValueArray),
    /// The nil sentinel. Means "nothing here", not failure.
    Nil,
    /// Recoverable failure, propagated by return
    Error(ErrorValue),
    /// Native function from the builtin table
    Builtin(&'static Builtin),
}

impl Value {
    /// Create a new string value from text or raw bytes
    pub fn string(s: impl AsRef<[u8]>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Create a new array value
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(ValueArray::from_vec(values))
    }

    /// Create an error value
    pub fn error(position: Position, message: impl Into<String>) -> Self {
        Value::Error(ErrorValue::new(position, message))
    }

    /// Get the type tag of this value, as shown in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Nil => "NIL",
            Value::Error(_) => "ERROR",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ValueArray> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<ValueArray> for Value {
    fn from(arr: ValueArray) -> Self {
        Value::Array(arr)
    }
}

impl PartialEq for Value {
    /// Scalars and strings compare by content. Arrays compare by identity
    /// first, then element-wise. Builtins compare by name.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

thread_local! {
    // Arrays currently being formatted; lets `set(a, 0, a)` print without recursing forever.
    static FORMATTING: RefCell<Vec<*const RefCell<Vec<Value>>>> = const { RefCell::new(Vec::new()) };
}

fn with_cycle_guard(
    arr: &ValueArray,
    f: &mut fmt::Formatter<'_>,
    body: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    let ptr = arr.as_ptr();
    if FORMATTING.with(|stack| stack.borrow().contains(&ptr)) {
        return write!(f, "[...]");
    }
    FORMATTING.with(|stack| stack.borrow_mut().push(ptr));
    let result = body(f);
    FORMATTING.with(|stack| stack.borrow_mut().pop());
    result
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", String::from_utf8_lossy(s)),
            Value::Array(arr) => with_cycle_guard(arr, f, |f| {
                write!(f, "[")?;
                for (i, elem) in arr.elements().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, "]")
            }),
            Value::Nil => write!(f, "nil"),
            Value::Error(err) => write!(f, "{}", err),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({})", n),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::String(s) => write!(f, "String({:?})", String::from_utf8_lossy(s)),
            Value::Array(arr) => write!(f, "Array({:?})", arr),
            Value::Nil => write!(f, "Nil"),
            Value::Error(err) => write!(f, "Error({:?})", err.message),
            Value::Builtin(builtin) => write!(f, "Builtin({:?})", builtin.name),
        }
    }
}
