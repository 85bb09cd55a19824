//! Shared test utilities for builtin tests

#![allow(dead_code)]

use dusk_runtime::stdlib::io::{install_console, Console};
use dusk_runtime::{call_builtin, Value};
use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

// Re-export testing utilities
pub use pretty_assertions::assert_eq;

/// Array of integers
pub fn ints(values: &[i64]) -> Value {
    Value::array(values.iter().map(|n| Value::Integer(*n)).collect())
}

/// Call a builtin that must exist
pub fn call(name: &str, args: &[Value]) -> Value {
    call_builtin(name, args).unwrap_or_else(|| panic!("no builtin named {name}"))
}

/// Assert that a value is an error with exactly this message and no position
pub fn assert_error(value: &Value, expected: &str) {
    match value {
        Value::Error(err) => {
            assert_eq!(err.message, expected);
            assert!(err.position.is_none(), "builtin error carried {:?}", err.position);
        }
        other => panic!("Expected Error({:?}), got {:?}", expected, other),
    }
}

/// Integer length through the `len` builtin
pub fn len_of(value: &Value) -> i64 {
    match call("len", &[value.clone()]) {
        Value::Integer(n) => n,
        other => panic!("Expected Integer length, got {:?}", other),
    }
}

/// Writer whose bytes stay readable after it is boxed into a console
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console fed from a fixed input, capturing output; restores the previous
/// console when dropped.
pub struct CapturedConsole {
    output: SharedBuffer,
    previous: Option<Console>,
}

impl CapturedConsole {
    pub fn new(input: &str) -> Self {
        Self::from_bytes(input.as_bytes().to_vec())
    }

    pub fn from_bytes(input: Vec<u8>) -> Self {
        let output = SharedBuffer::default();
        let previous = install_console(Console::new(Cursor::new(input), output.clone()));
        CapturedConsole {
            output,
            previous: Some(previous),
        }
    }

    pub fn output(&self) -> String {
        self.output.contents()
    }
}

impl Drop for CapturedConsole {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            install_console(previous);
        }
    }
}
