//! House store.

use super::{PathStore, RecordFile, RecordStore};
use crate::entity::House;
use crate::error::CoreResult;
use crate::record::{HouseRecord, HOUSE_RECORD_SIZE};
use crate::types::HouseId;
use crate::working_set::WorkingSet;
use depotmap_storage::StorageBackend;

/// Houses persisted in a house file.
pub struct HouseStore {
    records: RecordFile,
    houses: WorkingSet<House>,
}

impl HouseStore {
    /// Opens the store.
    ///
    /// With `create`, any existing content is discarded. Otherwise every live
    /// slot is loaded; an absent file loads as empty.
    pub fn open(backend: Box<dyn StorageBackend>, create: bool) -> CoreResult<Self> {
        let mut records = RecordFile::new(backend, HOUSE_RECORD_SIZE, "house");
        let mut houses = WorkingSet::new();

        if create {
            records.reset()?;
        } else {
            for (slot, bytes) in records.load()?.into_iter().enumerate() {
                let slot = slot as u32;
                let record = HouseRecord::decode(slot, &bytes)?;
                if record.is_tombstone() {
                    continue;
                }
                houses.add(House::from_record(HouseId::new(slot), record));
            }
        }

        tracing::debug!(houses = houses.len(), create, "house store opened");
        Ok(Self { records, houses })
    }

    /// Stores a new house and returns its identifier.
    ///
    /// Returns `None` if the house already carries the identifier of a live
    /// house. A copy of a removed house is stored as a new house, with a new
    /// identifier and no paths.
    pub fn add(&mut self, house: House) -> CoreResult<Option<HouseId>> {
        Ok(self.insert(house)?.map(HouseId::new))
    }

    /// Removes a house after removing every path that touches it.
    ///
    /// Returns `None` if no live house has this identifier.
    pub fn remove(&mut self, id: HouseId, paths: &mut PathStore) -> CoreResult<Option<House>> {
        if !self.houses.contains(id.as_u32()) {
            return Ok(None);
        }

        let removed = paths.remove_touching(id, self)?;
        if removed > 0 {
            tracing::debug!(house = %id, paths = removed, "cascaded path removal");
        }

        self.delete(id.as_u32())
    }

    /// Rewrites the name and position of a live house in place.
    ///
    /// The identifier and outgoing paths are unchanged. Returns false if no
    /// live house has this identifier.
    pub fn overwrite(&mut self, id: HouseId, house: &House) -> CoreResult<bool> {
        if !self.houses.contains(id.as_u32()) {
            return Ok(false);
        }

        let record = house.to_record();
        self.records.write_slot(id.as_u32(), &record.encode())?;

        if let Some(stored) = self.houses.get_mut(id.as_u32()) {
            stored.set_name(&record.name);
            stored.set_position(record.x, record.y);
        }
        Ok(true)
    }

    /// Looks up a live house.
    #[must_use]
    pub fn get(&self, id: HouseId) -> Option<&House> {
        self.houses.get(id.as_u32())
    }

    pub(crate) fn get_mut(&mut self, id: HouseId) -> Option<&mut House> {
        self.houses.get_mut(id.as_u32())
    }

    /// Iterates over live houses in load/insert order.
    pub fn iter(&self) -> impl Iterator<Item = &House> + '_ {
        self.houses.iter()
    }
}

impl RecordStore for HouseStore {
    type Entity = House;

    fn records(&self) -> &RecordFile {
        &self.records
    }

    fn records_mut(&mut self) -> &mut RecordFile {
        &mut self.records
    }

    fn working_set(&self) -> &WorkingSet<House> {
        &self.houses
    }

    fn working_set_mut(&mut self) -> &mut WorkingSet<House> {
        &mut self.houses
    }

    fn contains(&self, house: &House) -> bool {
        house
            .id()
            .is_some_and(|id| self.houses.contains(id.as_u32()))
    }

    fn encode(house: &House) -> Vec<u8> {
        house.to_record().encode()
    }

    fn stored_at(house: &House, slot: u32) -> House {
        House::from_record(HouseId::new(slot), house.to_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::record::{RecordFlags, HOUSE_RECORD_SIZE};
    use depotmap_storage::{InMemoryBackend, StorageBackend};

    fn empty_store() -> (HouseStore, InMemoryBackend) {
        let backend = InMemoryBackend::new();
        let store = HouseStore::open(Box::new(backend.clone()), true).unwrap();
        (store, backend)
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let (mut store, raw) = empty_store();

        let a = store.add(House::new("a", 1, 1)).unwrap();
        let b = store.add(House::new("b", 2, 2)).unwrap();

        assert_eq!(a, Some(HouseId::new(0)));
        assert_eq!(b, Some(HouseId::new(1)));
        assert_eq!(store.len(), 2);
        assert_eq!(raw.data().len(), 2 * HOUSE_RECORD_SIZE);
    }

    #[test]
    fn stored_house_is_duplicate() {
        let (mut store, _) = empty_store();
        let id = store.add(House::new("a", 0, 0)).unwrap().unwrap();

        let copy = store.get(id).unwrap().clone();
        assert!(store.contains(&copy));
        assert_eq!(store.add(copy).unwrap(), None);
        assert_eq!(store.total_slots().unwrap(), 1);
    }

    #[test]
    fn reopen_skips_tombstones() {
        let (mut store, raw) = empty_store();
        let mut paths = PathStore::open(Box::new(InMemoryBackend::new()), &mut store, true).unwrap();

        store.add(House::new("keep", 1, 2)).unwrap();
        let gone = store.add(House::new("gone", 3, 4)).unwrap().unwrap();
        store.remove(gone, &mut paths).unwrap();

        let reopened = HouseStore::open(Box::new(raw), false).unwrap();
        let names: Vec<_> = reopened.iter().map(House::name).collect();
        assert_eq!(names, vec!["keep"]);
        assert_eq!(reopened.total_slots().unwrap(), 2);
    }

    #[test]
    fn live_slot_is_never_reallocated() {
        let (mut store, raw) = empty_store();
        let id = store.add(House::new("a", 0, 0)).unwrap().unwrap();

        // The file claims the live slot is free.
        let mut outside = raw.clone();
        outside.write_at(0, &[RecordFlags::TOMBSTONE.as_byte()]).unwrap();
        let before = raw.data();

        let err = store.add(House::new("b", 0, 0)).unwrap_err();
        assert!(matches!(err, CoreError::CorruptRecord { slot: 0, .. }));
        assert_eq!(raw.data(), before);
        assert_eq!(store.get(id).unwrap().name(), "a");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn overwrite_requires_live_house() {
        let (mut store, _) = empty_store();
        let id = store.add(House::new("old", 0, 0)).unwrap().unwrap();

        assert!(store.overwrite(id, &House::new("new", 5, 6)).unwrap());
        let house = store.get(id).unwrap();
        assert_eq!(house.name(), "new");
        assert_eq!(house.position(), (5, 6));
        assert_eq!(house.id(), Some(id));

        assert!(!store.overwrite(HouseId::new(9), &House::new("x", 0, 0)).unwrap());
    }
}
