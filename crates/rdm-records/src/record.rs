/*
 * record.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Records: the nodes of a record list.

use crate::{ByteString, List};
use std::fmt;

/// Index of a record slot in a [`crate::RecordArena`].
///
/// The generation is bumped every time the slot is released, so an id that
/// outlived its record never resolves to whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    index: u32,
    generation: u32,
}

impl RecordId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        RecordId { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// What a record's value holds, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Empty,
    SingleLineText,
    MultilineText,
    ChildList,
}

/// The value carried by a record.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Value {
    /// No payload yet. Only seen while a record is under construction.
    #[default]
    Empty,
    /// Text that was written on a single line.
    SingleLineText(ByteString),
    /// Text from a literal or folded block.
    MultilineText(ByteString),
    /// A nested list, owned by this record.
    ChildList(List),
}

impl Value {
    /// Leaf text, tagged by whether it came from a block presentation.
    pub fn text(text: ByteString, multiline: bool) -> Self {
        if multiline {
            Value::MultilineText(text)
        } else {
            Value::SingleLineText(text)
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Value::Empty => RecordKind::Empty,
            Value::SingleLineText(_) => RecordKind::SingleLineText,
            Value::MultilineText(_) => RecordKind::MultilineText,
            Value::ChildList(_) => RecordKind::ChildList,
        }
    }

    /// The text payload of a single-line or multiline value.
    pub fn as_text(&self) -> Option<&ByteString> {
        match self {
            Value::SingleLineText(text) | Value::MultilineText(text) => Some(text),
            Value::Empty | Value::ChildList(_) => None,
        }
    }

    pub fn as_child_list(&self) -> Option<&List> {
        match self {
            Value::ChildList(list) => Some(list),
            _ => None,
        }
    }
}

/// A node with an optional key and a value, linked to its neighbors.
///
/// Records live in a [`crate::RecordArena`]; the links are ids of other
/// records in the same arena.
#[derive(Debug, Default)]
pub struct Record {
    pub(crate) key: Option<ByteString>,
    pub(crate) value: Value,
    pub(crate) prev: Option<RecordId>,
    pub(crate) next: Option<RecordId>,
}

impl Record {
    pub fn key(&self) -> Option<&ByteString> {
        self.key.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> RecordKind {
        self.value.kind()
    }

    pub fn prev(&self) -> Option<RecordId> {
        self.prev
    }

    pub fn next(&self) -> Option<RecordId> {
        self.next
    }

    /// Whether the key equals `key`, byte for byte.
    pub fn has_key(&self, key: &[u8]) -> bool {
        self.key.as_ref().is_some_and(|k| k.as_bytes() == key)
    }
}
