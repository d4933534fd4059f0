/*
 * arena.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Slot storage for records and the list operations built on it.
//!
//! Every record lives in one slot of a [`RecordArena`]; lists are chains of
//! slots linked through `prev`/`next` ids. There is no sentinel node, so any
//! member of a chain can be used to reach the whole chain: the head is found
//! by following `prev` links, the tail by following `next` links.

use crate::list::Iter;
use crate::{ByteString, List, Record, RecordError, RecordId, Result, Value};
use tracing::{trace, warn};

#[derive(Debug)]
struct Slot {
    generation: u32,
    record: Option<Record>,
}

/// Owner of all records of one or more record trees.
#[derive(Debug, Default)]
pub struct RecordArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    limit: Option<usize>,
}

impl RecordArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// An arena that refuses to hold more than `limit` live records.
    ///
    /// Allocations beyond the limit fail with `AllocationFailure`, the same
    /// way an exhausted allocator would.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Number of records currently allocated.
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    // ------------------------------------------------------------------
    // Record lifecycle
    // ------------------------------------------------------------------

    /// Allocate an empty, unlinked record.
    pub fn new_record(&mut self) -> Result<RecordId> {
        if self.limit.is_some_and(|limit| self.live >= limit) {
            warn!(live = self.live, "Record limit reached");
            return Err(RecordError::AllocationFailure { what: "record" });
        }

        let id = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.record = Some(Record::default());
            RecordId::new(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len())
                .map_err(|_| RecordError::AllocationFailure { what: "record" })?;
            self.slots
                .try_reserve(1)
                .map_err(|_| RecordError::AllocationFailure { what: "record" })?;
            self.slots.push(Slot {
                generation: 0,
                record: Some(Record::default()),
            });
            RecordId::new(index, 0)
        };

        self.live += 1;
        trace!(record = %id, "Allocated record");
        Ok(id)
    }

    /// Release the record's key and value and unlink it from its list.
    ///
    /// A child list held by the record is destroyed recursively. The record
    /// itself stays allocated, empty and unlinked.
    pub fn clear(&mut self, id: RecordId) -> Result<()> {
        let record = self.record_mut(id)?;
        let key = record.key.take();
        let value = std::mem::take(&mut record.value);
        let prev = record.prev.take();
        let next = record.next.take();

        drop(key);
        self.release_value(value);
        self.close_gap(prev, next);
        Ok(())
    }

    /// Clear the record and release its slot.
    pub fn destroy(&mut self, id: RecordId) -> Result<()> {
        let record = self.take_slot(id).ok_or(RecordError::StaleRecord(id))?;
        let Record {
            key,
            value,
            prev,
            next,
        } = record;

        drop(key);
        self.release_value(value);
        self.close_gap(prev, next);
        Ok(())
    }

    /// Destroy every record of the list, and every list nested under them.
    pub fn destroy_list(&mut self, list: List) {
        let mut current = self.first(list.into_handle());
        while let Some(id) = current {
            current = self.get(id).and_then(Record::next);
            if self.destroy(id).is_err() {
                break;
            }
        }
    }

    fn take_slot(&mut self, id: RecordId) -> Option<Record> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let record = slot.record.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index() as u32);
        self.live -= 1;
        trace!(record = %id, "Released record");
        Some(record)
    }

    fn release_value(&mut self, value: Value) {
        if let Value::ChildList(list) = value {
            self.destroy_list(list);
        }
    }

    // Re-link the neighbors of a record that left the chain.
    fn close_gap(&mut self, prev: Option<RecordId>, next: Option<RecordId>) {
        if let Some(record) = next.and_then(|id| self.get_mut(id)) {
            record.prev = prev;
        }
        if let Some(record) = prev.and_then(|id| self.get_mut(id)) {
            record.next = next;
        }
    }

    // ------------------------------------------------------------------
    // Field access
    // ------------------------------------------------------------------

    /// The record behind `id`, or `None` if the id is stale.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.record.as_ref())
    }

    fn get_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.record.as_mut())
    }

    fn record_mut(&mut self, id: RecordId) -> Result<&mut Record> {
        self.get_mut(id).ok_or(RecordError::StaleRecord(id))
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn set_key(&mut self, id: RecordId, key: Option<ByteString>) -> Result<()> {
        self.record_mut(id)?.key = key;
        Ok(())
    }

    pub fn take_key(&mut self, id: RecordId) -> Result<Option<ByteString>> {
        Ok(self.record_mut(id)?.key.take())
    }

    /// Replace the record's value, releasing the previous one.
    ///
    /// If `id` is stale the new value is released instead, so a child list
    /// handed in here is never lost.
    pub fn set_value(&mut self, id: RecordId, value: Value) -> Result<()> {
        let Some(record) = self.get_mut(id) else {
            self.release_value(value);
            return Err(RecordError::StaleRecord(id));
        };
        let previous = std::mem::replace(&mut record.value, value);
        self.release_value(previous);
        Ok(())
    }

    /// The nested list of a `ChildList` record.
    pub fn child_list(&self, id: RecordId) -> Option<&List> {
        self.get(id)?.value.as_child_list()
    }

    // ------------------------------------------------------------------
    // List operations
    // ------------------------------------------------------------------

    /// Walk `prev` links to the head of the chain.
    pub fn first(&self, handle: Option<RecordId>) -> Option<RecordId> {
        let mut current = handle?;
        while let Some(prev) = self.get(current)?.prev {
            current = prev;
        }
        Some(current)
    }

    /// Walk `next` links to the tail of the chain.
    pub fn last(&self, handle: Option<RecordId>) -> Option<RecordId> {
        let mut current = handle?;
        while let Some(next) = self.get(current)?.next {
            current = next;
        }
        Some(current)
    }

    /// Link `record` after the last element of the chain `list` belongs to.
    ///
    /// With no `list` the record simply becomes a list of its own. Returns
    /// the id of the appended record, which is itself a valid handle to the
    /// extended list. If `record` heads a chain of its own, the whole chain
    /// is spliced in.
    pub fn append(&mut self, list: Option<RecordId>, record: RecordId) -> Result<RecordId> {
        let incoming = self.get(record).ok_or(RecordError::StaleRecord(record))?;
        if incoming.prev.is_some() {
            return Err(RecordError::AlreadyLinked(record));
        }
        let Some(handle) = list else {
            return Ok(record);
        };

        let last = self.last(Some(handle)).ok_or(RecordError::StaleRecord(handle))?;
        if self.first(Some(handle)) == Some(record) {
            return Err(RecordError::AlreadyLinked(record));
        }

        self.record_mut(last)?.next = Some(record);
        self.record_mut(record)?.prev = Some(last);
        Ok(record)
    }

    /// Append `record` to an owned list.
    ///
    /// The list handle moves to the appended record, so the next push finds
    /// the tail without walking the chain.
    pub fn push(&mut self, list: &mut List, record: RecordId) -> Result<()> {
        list.handle = Some(self.append(list.handle, record)?);
        Ok(())
    }

    /// Destroy one member of an owned list, keeping the handle valid.
    pub fn remove(&mut self, list: &mut List, id: RecordId) -> Result<()> {
        let record = self.get(id).ok_or(RecordError::StaleRecord(id))?;
        if self.first(list.handle) != self.first(Some(id)) {
            return Err(RecordError::NotInList(id));
        }
        if list.handle == Some(id) {
            list.handle = record.prev.or(record.next);
        }
        self.destroy(id)
    }

    /// Number of records in the chain.
    pub fn len(&self, handle: Option<RecordId>) -> usize {
        self.iter(handle).count()
    }

    /// Zero-based index of `id` within its chain.
    pub fn position(&self, id: RecordId) -> Option<usize> {
        let mut record = self.get(id)?;
        let mut index = 0;
        while let Some(prev) = record.prev {
            record = self.get(prev)?;
            index += 1;
        }
        Some(index)
    }

    /// Iterate the whole chain, starting at its head.
    pub fn iter(&self, handle: Option<RecordId>) -> Iter<'_> {
        Iter {
            arena: self,
            next: self.first(handle),
        }
    }

    /// Find the first record with the given key, scanning forward from
    /// `start`.
    ///
    /// The scan does not rewind to the head: starting from the record after
    /// a previous hit finds the next record with the same key.
    pub fn find(&self, start: Option<RecordId>, key: &[u8]) -> Option<RecordId> {
        let mut current = start;
        while let Some(id) = current {
            let record = self.get(id)?;
            if record.has_key(key) {
                return Some(id);
            }
            current = record.next;
        }
        None
    }

    /// [`RecordArena::find`] with a text key. An empty key matches nothing.
    pub fn find_str(&self, start: Option<RecordId>, key: &str) -> Option<RecordId> {
        if key.is_empty() {
            warn!("Searching for an empty key");
            return None;
        }
        self.find(start, key.as_bytes())
    }

    /// The ids of the chain's records, in order.
    pub fn to_vec(&self, handle: Option<RecordId>) -> Vec<RecordId> {
        self.iter(handle).map(|(id, _)| id).collect()
    }

    /// The keys of the chain's records, in order.
    pub fn keys(&self, handle: Option<RecordId>) -> Vec<Option<&ByteString>> {
        self.iter(handle).map(|(_, record)| record.key()).collect()
    }

    /// The text values of the chain's records, in order.
    ///
    /// Child lists and empty records show up as `None`.
    pub fn values(&self, handle: Option<RecordId>) -> Vec<Option<&ByteString>> {
        self.iter(handle)
            .map(|(_, record)| record.value().as_text())
            .collect()
    }
}
