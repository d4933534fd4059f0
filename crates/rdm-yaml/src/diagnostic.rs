//! Soft failures observed while building a tree.

use crate::Position;
use std::fmt;

/// A structural oddity in the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyKind {
    /// A mapping opened in value position with no key captured before it.
    MissingMappingKey,

    /// An event that has no meaning where it appeared.
    UnexpectedEvent { event: &'static str },

    /// A key whose mapping closed before a value was seen. The key is
    /// dropped.
    UnpairedKey { key: String },

    /// An alias; its anchor is not resolved and no record is produced.
    UnsupportedAlias { anchor: usize },
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::MissingMappingKey => write!(f, "block mapping without key"),
            AnomalyKind::UnexpectedEvent { event } => {
                write!(f, "{} event should not happen here", event)
            }
            AnomalyKind::UnpairedKey { key } => write!(f, "key {:?} has no value", key),
            AnomalyKind::UnsupportedAlias { anchor } => {
                write!(f, "alias to anchor {} is not supported", anchor)
            }
        }
    }
}

/// An anomaly together with the position of the event that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: AnomalyKind,
    pub position: Position,
}

impl Diagnostic {
    /// Whether this diagnostic came from an alias rather than from a
    /// malformed structure.
    pub fn is_alias(&self) -> bool {
        matches!(self.kind, AnomalyKind::UnsupportedAlias { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}
