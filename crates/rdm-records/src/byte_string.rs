/*
 * byte_string.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Owned, length-tracked byte buffers used for record keys and values.

use crate::{RecordError, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;

/// An owned byte buffer with an explicit length.
///
/// Keys and scalar text are stored as raw bytes; no encoding is enforced,
/// although [`ByteString::as_str`] gives a UTF-8 view when the content allows
/// it. The buffer is wiped with zeroes when the string is dropped, so the
/// released memory does not keep copies of the text.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteString {
    bytes: Box<[u8]>,
}

fn reserve(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| RecordError::AllocationFailure { what: "byte string" })?;
    Ok(buf)
}

impl ByteString {
    /// A string of length zero.
    pub fn empty() -> Self {
        Self {
            bytes: Box::default(),
        }
    }

    /// Allocate a zero-filled string of `len` bytes.
    ///
    /// # Errors
    ///
    /// `InvalidLength` when `len` is zero, `AllocationFailure` when the buffer
    /// cannot be reserved.
    pub fn zeroed(len: usize) -> Result<Self> {
        if len == 0 {
            tracing::warn!("Invalid length requested for byte string: 0");
            return Err(RecordError::InvalidLength(len));
        }
        let mut buf = reserve(len)?;
        buf.resize(len, 0);
        Ok(Self {
            bytes: buf.into_boxed_slice(),
        })
    }

    /// Copy `bytes` into a new string.
    ///
    /// An empty input yields a zero-length string rather than an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self::empty());
        }
        let mut buf = reserve(bytes.len())?;
        buf.extend_from_slice(bytes);
        Ok(Self {
            bytes: buf.into_boxed_slice(),
        })
    }

    /// The current local date and time, as `Tue Mar  5 09:07:02 2024`.
    pub fn timestamp() -> Result<Self> {
        Self::timestamp_at(&Local::now())
    }

    /// [`ByteString::timestamp`] for a given instant.
    pub fn timestamp_at<Tz: TimeZone>(at: &DateTime<Tz>) -> Result<Self>
    where
        Tz::Offset: fmt::Display,
    {
        let text = at.format("%a %b %e %H:%M:%S %Y").to_string();
        Self::from_bytes(text.as_bytes())
    }

    /// Join two optional strings with an optional separator byte.
    ///
    /// If one side is absent the other one is handed back unchanged: it is
    /// moved, not copied. Only when both are present is a new buffer of
    /// `left [separator] right` allocated.
    pub fn concat(
        left: Option<ByteString>,
        right: Option<ByteString>,
        separator: Option<u8>,
    ) -> Result<Option<ByteString>> {
        let (left, right) = match (left, right) {
            (None, other) | (other, None) => return Ok(other),
            (Some(left), Some(right)) => (left, right),
        };

        let len = left.len() + right.len() + usize::from(separator.is_some());
        let mut buf = reserve(len)?;
        buf.extend_from_slice(left.as_bytes());
        if let Some(sep) = separator {
            buf.push(sep);
        }
        buf.extend_from_slice(right.as_bytes());

        Ok(Some(Self {
            bytes: buf.into_boxed_slice(),
        }))
    }

    /// Replace every occurrence of `from` with `to`, in place.
    pub fn replace_byte(&mut self, from: u8, to: u8) {
        if from == to {
            return;
        }
        for byte in self.bytes.iter_mut().filter(|b| **b == from) {
            *byte = to;
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The content as `&str`, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl Drop for ByteString {
    fn drop(&mut self) {
        self.bytes.fill(0);
        // Keep the wipe from being optimized away as a dead store.
        std::hint::black_box(&self.bytes);
    }
}

impl From<&str> for ByteString {
    fn from(text: &str) -> Self {
        Self {
            bytes: Box::from(text.as_bytes()),
        }
    }
}

impl PartialEq<str> for ByteString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for ByteString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteString({:?})", String::from_utf8_lossy(&self.bytes))
    }
}
