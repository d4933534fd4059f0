//! Source positions attached to events and diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an event was found in the source text.
///
/// Events coming from a scripted source carry their sequence number as the
/// offset and no meaningful line/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from start of source (0-based)
    pub offset: usize,

    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based, in characters not bytes)
    pub col: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        Self { offset, line, col }
    }

    /// Create a Position from a yaml-rust2::Marker.
    pub fn from_marker(marker: &yaml_rust2::scanner::Marker) -> Self {
        Self {
            offset: marker.index(),
            line: marker.line() + 1, // yaml-rust2 uses 0-based, we use 1-based
            col: marker.col() + 1,   // yaml-rust2 uses 0-based, we use 1-based
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            col: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} (offset {})", self.line, self.col, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let position = Position::default();
        assert_eq!(position.offset, 0);
        assert_eq!(position.line, 1);
        assert_eq!(position.col, 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(12, 3, 4).to_string(), "3:4 (offset 12)");
    }
}
