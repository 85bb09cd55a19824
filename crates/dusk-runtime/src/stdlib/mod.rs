//! Standard library functions
//!
//! A fixed table of native functions callable from scripts. The table is a
//! compile-time constant: there is no registration API, and an unknown name
//! is simply absent (the evaluator decides how to report it).

pub mod array;
pub mod error;
pub mod io;
pub mod sequence;

pub use error::BuiltinError;

use crate::value::Value;
use std::fmt;

/// Native function signature
///
/// Failures are typed here and become error values in [`Builtin::call`].
pub type BuiltinFn = fn(&[Value]) -> Result<Value, BuiltinError>;

/// A named native function
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    const fn new(name: &'static str, func: BuiltinFn) -> Self {
        Builtin { name, func }
    }

    /// Invoke with already-evaluated arguments.
    ///
    /// Always yields exactly one value; a failure comes back as
    /// [`Value::Error`] with no source position.
    pub fn call(&self, args: &[Value]) -> Value {
        tracing::trace!(builtin = self.name, argc = args.len(), "calling builtin");
        match (self.func)(args) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(builtin = self.name, error = %err, "builtin returned error");
                err.into()
            }
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

/// Every builtin, in registration order
pub static BUILTINS: &[Builtin] = &[
    Builtin::new("len", sequence::len),
    Builtin::new("first", sequence::first),
    Builtin::new("last", sequence::last),
    Builtin::new("rest", sequence::rest),
    Builtin::new("push", sequence::push),
    Builtin::new("alloc", array::alloc),
    Builtin::new("set", array::set),
    Builtin::new("println", io::println),
    Builtin::new("print", io::print),
    Builtin::new("readln", io::readln),
    Builtin::new("read", io::read),
    Builtin::new("readc", io::readc),
    Builtin::new("readall", io::readall),
];

/// Find a builtin by exact name
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

/// Check if a function name is a builtin
pub fn is_builtin(name: &str) -> bool {
    lookup(name).is_some()
}

/// Resolve a name to a first-class builtin value
pub fn builtin_value(name: &str) -> Option<Value> {
    lookup(name).map(Value::Builtin)
}

/// Call a builtin by name. `None` if no builtin has that name.
pub fn call_builtin(name: &str, args: &[Value]) -> Option<Value> {
    lookup(name).map(|builtin| builtin.call(args))
}

/// Validate the argument count and hand back the arguments as a fixed-size array.
///
/// Runs before any dispatch on argument kinds.
pub(crate) fn expect_args<const N: usize>(args: &[Value]) -> Result<&[Value; N], BuiltinError> {
    args.try_into().map_err(|_| BuiltinError::WrongArgumentCount {
        got: args.len(),
        expected: N,
    })
}
