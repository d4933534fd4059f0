/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for the record substrate.

use crate::RecordId;
use thiserror::Error;

/// Errors raised by string and record operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A buffer or record slot could not be obtained.
    #[error("Unable to allocate {what}")]
    AllocationFailure { what: &'static str },

    /// A zero-length buffer was requested.
    #[error("Invalid length requested: {0}")]
    InvalidLength(usize),

    /// The handle refers to a record that has been released.
    #[error("Stale record handle: {0}")]
    StaleRecord(RecordId),

    /// The record already has a predecessor in some list.
    #[error("Record {0} is already linked into a list")]
    AlreadyLinked(RecordId),

    /// The record is not a member of the list it was removed from.
    #[error("Record {0} is not a member of this list")]
    NotInList(RecordId),
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
