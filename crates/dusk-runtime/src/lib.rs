//! Dusk Runtime - builtin function layer
//!
//! This library provides the runtime pieces the Dusk evaluator calls into:
//! - The value model (integers, strings, shared arrays, nil, error values)
//! - The fixed builtin registry and its native functions
//! - Console I/O builtins over swappable streams

/// Dusk runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod position;
pub mod stdlib;
pub mod value;

// Re-export commonly used types
pub use position::Position;
pub use stdlib::io::Console;
pub use stdlib::{builtin_value, call_builtin, is_builtin, lookup, Builtin, BuiltinError};
pub use value::{ErrorValue, Value, ValueArray};
