/*
 * list.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Owning list handles and list iteration.

use crate::{Record, RecordArena, RecordId};

/// An owning handle to a chain of records in a [`RecordArena`].
///
/// The handle points at one member of the chain (the most recently pushed
/// record when built with [`RecordArena::push`]); every other member is
/// reachable through the `prev`/`next` links. A `List` is not
/// `Clone`: whoever holds it owns the records, and giving it to
/// [`RecordArena::destroy_list`] releases them all.
#[derive(Debug, Default, PartialEq, Eq)]
#[must_use = "dropping a List without destroying it leaves its records in the arena"]
pub struct List {
    pub(crate) handle: Option<RecordId>,
}

impl List {
    pub const fn new() -> Self {
        List { handle: None }
    }

    /// Take ownership of the chain that `handle` is a member of.
    pub fn adopt(handle: Option<RecordId>) -> Self {
        List { handle }
    }

    pub fn handle(&self) -> Option<RecordId> {
        self.handle
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    /// Give up ownership, returning the raw handle.
    pub fn into_handle(self) -> Option<RecordId> {
        self.handle
    }
}

/// Iterator over the records of a chain, head first.
pub struct Iter<'a> {
    pub(crate) arena: &'a RecordArena,
    pub(crate) next: Option<RecordId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (RecordId, &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let record = self.arena.get(id)?;
        self.next = record.next;
        Some((id, record))
    }
}
