//! Error types for building record trees from YAML events.

use crate::{AnomalyKind, Position};
use rdm_records::RecordError;
use thiserror::Error;

/// Result type alias for rdm-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort the construction of a record tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The event source reported malformed input.
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        position: Option<Position>,
    },

    /// The event source ran dry before the stream ended.
    #[error("Unexpected end of event stream")]
    UnexpectedEof,

    /// A structural anomaly under [`crate::AnomalyPolicy::Abort`].
    #[error("Structural anomaly at {position}: {kind}")]
    StructuralAnomaly {
        kind: AnomalyKind,
        position: Position,
    },

    /// The document nests deeper than [`crate::BuildOptions::max_depth`].
    #[error("Document nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    /// String or record allocation failed.
    #[error(transparent)]
    Records(#[from] RecordError),
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::Parse {
            message: err.to_string(),
            position: Some(Position::from_marker(err.marker())),
        }
    }
}
