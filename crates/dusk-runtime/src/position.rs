//! Source positions attached to error values

use std::fmt;

/// Line/column location in a source file (1-based when present)
///
/// The zero position means "no location". Builtins have no syntactic
/// location, so every error they produce carries it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// The zero position used for errors without a source location
    pub fn none() -> Self {
        Position::default()
    }

    pub fn is_none(&self) -> bool {
        self.line == 0 && self.column == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
