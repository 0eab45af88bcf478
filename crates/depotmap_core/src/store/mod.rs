//! Fixed-record stores.
//!
//! A record file is a flat array of equally sized slots over a
//! [`StorageBackend`]. Deleting an entity only sets the tombstone byte of its
//! slot; the next insert reuses the first tombstoned slot before growing the
//! file.

mod house;
mod path;

pub use house::HouseStore;
pub use path::PathStore;

use crate::error::{CoreError, CoreResult};
use crate::record::RecordFlags;
use crate::working_set::{Slotted, WorkingSet};
use depotmap_storage::StorageBackend;

/// Slot arithmetic over one storage backend.
pub struct RecordFile {
    backend: Box<dyn StorageBackend>,
    record_size: usize,
    label: &'static str,
}

impl RecordFile {
    /// Creates a record file of `record_size`-byte slots.
    pub fn new(backend: Box<dyn StorageBackend>, record_size: usize, label: &'static str) -> Self {
        Self {
            backend,
            record_size,
            label,
        }
    }

    /// Name used in log lines and errors.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Number of slots in the file, live or tombstoned.
    pub fn total_slots(&self) -> CoreResult<u32> {
        let size = self.backend.size()?;
        Ok((size / self.record_size as u64) as u32)
    }

    /// Returns true if `slot` lies within the file.
    pub fn is_valid_slot(&self, slot: u32) -> CoreResult<bool> {
        Ok(slot < self.total_slots()?)
    }

    fn offset(&self, slot: u32) -> u64 {
        u64::from(slot) * self.record_size as u64
    }

    /// Reads every slot in order.
    ///
    /// An absent file loads as empty.
    pub fn load(&self) -> CoreResult<Vec<Vec<u8>>> {
        let data = match self.backend.read_all() {
            Ok(data) => data,
            Err(e) if e.is_not_found() => {
                tracing::debug!(file = self.label, "record file absent, loading empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let chunks = data.chunks_exact(self.record_size);
        if !chunks.remainder().is_empty() {
            let slot = (data.len() / self.record_size) as u32;
            return Err(CoreError::corrupt_record(
                self.label,
                slot,
                format!("truncated record of {} bytes", chunks.remainder().len()),
            ));
        }

        Ok(chunks.map(<[u8]>::to_vec).collect())
    }

    /// Finds the slot for a new record: the first tombstone, else the end.
    ///
    /// Only the flag byte of each slot is read.
    pub fn allocate_slot(&self) -> CoreResult<u32> {
        let total = self.total_slots()?;
        for slot in 0..total {
            let flag = self.backend.read_at(self.offset(slot), 1)?;
            let deleted = flag
                .first()
                .is_some_and(|&b| RecordFlags::from_byte(b).is_tombstone());
            if deleted {
                tracing::debug!(file = self.label, slot, "reusing tombstoned slot");
                return Ok(slot);
            }
        }
        Ok(total)
    }

    /// Writes an encoded record into `slot`.
    pub fn write_slot(&mut self, slot: u32, record: &[u8]) -> CoreResult<()> {
        debug_assert_eq!(record.len(), self.record_size);
        let offset = self.offset(slot);
        self.backend.write_at(offset, record)?;
        Ok(())
    }

    /// Sets the tombstone byte of `slot`.
    ///
    /// Returns false without writing if the slot is outside the file.
    pub fn tombstone(&mut self, slot: u32) -> CoreResult<bool> {
        if !self.is_valid_slot(slot)? {
            return Ok(false);
        }
        let offset = self.offset(slot);
        self.backend
            .write_at(offset, &[RecordFlags::TOMBSTONE.as_byte()])?;
        Ok(true)
    }

    /// Discards every record.
    pub fn reset(&mut self) -> CoreResult<()> {
        self.backend.truncate(0)?;
        Ok(())
    }
}

/// Operations shared by the house and path stores.
///
/// Implementors supply the duplicate predicate and the record encoding; the
/// provided methods handle slot allocation and keep the working set in step
/// with the file.
pub trait RecordStore {
    /// The entity kept in this store.
    type Entity: Slotted;

    /// The backing record file.
    fn records(&self) -> &RecordFile;

    /// The backing record file, mutably.
    fn records_mut(&mut self) -> &mut RecordFile;

    /// Loaded entities.
    fn working_set(&self) -> &WorkingSet<Self::Entity>;

    /// Loaded entities, mutably.
    fn working_set_mut(&mut self) -> &mut WorkingSet<Self::Entity>;

    /// Store-specific duplicate predicate.
    fn contains(&self, entity: &Self::Entity) -> bool;

    /// Encodes a live record for `entity`.
    fn encode(entity: &Self::Entity) -> Vec<u8>;

    /// The entity as it will live in `slot`: that identifier and no links.
    ///
    /// Any identifier `entity` already carries, such as one copied from a
    /// removed entity, is discarded.
    fn stored_at(entity: &Self::Entity, slot: u32) -> Self::Entity;

    /// Number of slots in the file, including tombstones.
    fn total_slots(&self) -> CoreResult<u32> {
        self.records().total_slots()
    }

    /// Returns true if `id` addresses a slot in the file.
    fn is_valid_id(&self, id: u32) -> CoreResult<bool> {
        self.records().is_valid_slot(id)
    }

    /// Number of live entities.
    fn len(&self) -> usize {
        self.working_set().len()
    }

    /// Returns true if there are no live entities.
    fn is_empty(&self) -> bool {
        self.working_set().is_empty()
    }

    /// Persists a new entity and adds it to the working set.
    ///
    /// Returns `None` for a duplicate, leaving the file untouched.
    ///
    /// # Errors
    ///
    /// Besides storage failures, fails with [`CoreError::CorruptRecord`] if
    /// the file offers a slot that is still live in memory; nothing is
    /// written in that case.
    fn insert(&mut self, entity: Self::Entity) -> CoreResult<Option<u32>> {
        if self.contains(&entity) {
            return Ok(None);
        }

        let label = self.records().label();
        let slot = self.records().allocate_slot()?;
        if self.working_set().contains(slot) {
            return Err(CoreError::corrupt_record(label, slot, "free slot is live in memory"));
        }

        let stored = Self::stored_at(&entity, slot);
        self.records_mut().write_slot(slot, &Self::encode(&stored))?;
        if !self.working_set_mut().add(stored) {
            return Err(CoreError::corrupt_record(label, slot, "stored record not loaded"));
        }

        tracing::debug!(file = label, slot, "record stored");
        Ok(Some(slot))
    }

    /// Tombstones a live entity and drops it from the working set.
    fn delete(&mut self, slot: u32) -> CoreResult<Option<Self::Entity>> {
        if !self.working_set().contains(slot) {
            return Ok(None);
        }
        self.records_mut().tombstone(slot)?;
        tracing::debug!(file = self.records().label(), slot, "record tombstoned");
        Ok(self.working_set_mut().remove(slot))
    }
}
