//! Path store.

use super::{HouseStore, RecordFile, RecordStore};
use crate::entity::Path;
use crate::error::{CoreError, CoreResult};
use crate::record::{PathRecord, PATH_RECORD_SIZE};
use crate::types::{HouseId, PathId};
use crate::working_set::WorkingSet;
use depotmap_storage::StorageBackend;

/// Paths persisted in a path file.
///
/// Every live path is also listed in the outgoing list of its source house.
pub struct PathStore {
    records: RecordFile,
    paths: WorkingSet<Path>,
}

impl PathStore {
    /// Opens the store against already loaded houses.
    ///
    /// # Errors
    ///
    /// Fails with [`CoreError::CorruptRecord`] if a live path refers to a house
    /// that is not live; such data is never silently dropped.
    pub fn open(
        backend: Box<dyn StorageBackend>,
        houses: &mut HouseStore,
        create: bool,
    ) -> CoreResult<Self> {
        let mut records = RecordFile::new(backend, PATH_RECORD_SIZE, "path");
        let mut paths = WorkingSet::new();

        if create {
            records.reset()?;
        } else {
            for (slot, bytes) in records.load()?.into_iter().enumerate() {
                let slot = slot as u32;
                let record = PathRecord::decode(slot, &bytes)?;
                if record.is_tombstone() {
                    continue;
                }

                let path = Path::from_record(PathId::new(slot), record);
                if houses.get(path.start()).is_none() {
                    return Err(CoreError::corrupt_record(
                        "path",
                        slot,
                        "starting house unavailable",
                    ));
                }
                if houses.get(path.end()).is_none() {
                    return Err(CoreError::corrupt_record(
                        "path",
                        slot,
                        "ending house unavailable",
                    ));
                }

                if let Some(start) = houses.get_mut(path.start()) {
                    start.attach(PathId::new(slot));
                }
                paths.add(path);
            }
        }

        tracing::debug!(paths = paths.len(), create, "path store opened");
        Ok(Self { records, paths })
    }

    /// Stores a new path and attaches it to its source house.
    ///
    /// Returns `None` if a path between the same ordered pair already exists.
    ///
    /// # Errors
    ///
    /// Fails with [`CoreError::UnknownHouse`] if either endpoint is not live.
    pub fn add(&mut self, path: Path, houses: &mut HouseStore) -> CoreResult<Option<PathId>> {
        Self::check_endpoints(&path, houses)?;

        let start = path.start();
        let Some(slot) = self.insert(path)? else {
            return Ok(None);
        };

        let id = PathId::new(slot);
        if let Some(house) = houses.get_mut(start) {
            house.attach(id);
        }
        Ok(Some(id))
    }

    /// Removes a path and detaches it from its source house.
    ///
    /// Houses are never removed.
    pub fn remove(&mut self, id: PathId, houses: &mut HouseStore) -> CoreResult<Option<Path>> {
        let removed = self.delete(id.as_u32())?;
        if let Some(path) = &removed {
            if let Some(house) = houses.get_mut(path.start()) {
                house.detach(id);
            }
        }
        Ok(removed)
    }

    /// Removes every path with `house` as either endpoint.
    ///
    /// Returns the number of paths removed.
    pub fn remove_touching(&mut self, house: HouseId, houses: &mut HouseStore) -> CoreResult<usize> {
        let mut removed = 0;
        let mut cursor = self.paths.cursor_mut();

        while let Some(current) = cursor.current() {
            if !current.touches(house) {
                cursor.move_next();
                continue;
            }
            let (id, start) = (current.id(), current.start());

            // Memory changes only once the tombstone is on disk.
            if let Some(id) = id {
                self.records.tombstone(id.as_u32())?;
            }
            cursor.remove_current();
            if let (Some(id), Some(source)) = (id, houses.get_mut(start)) {
                source.detach(id);
            }
            removed += 1;
        }

        Ok(removed)
    }

    /// Rewrites a live path in place, keeping its identifier.
    ///
    /// Changing the endpoints moves the path to the new source house's
    /// outgoing list. Returns false if no live path has this identifier or if
    /// the new endpoints would duplicate another path.
    pub fn overwrite(&mut self, id: PathId, path: &Path, houses: &mut HouseStore) -> CoreResult<bool> {
        let Some(old) = self.paths.get(id.as_u32()) else {
            return Ok(false);
        };
        let old_start = old.start();

        if !old.same_endpoints(path) {
            Self::check_endpoints(path, houses)?;
            let duplicate = self
                .paths
                .iter()
                .any(|p| p.id() != Some(id) && p.same_endpoints(path));
            if duplicate {
                return Ok(false);
            }
        }

        self.records
            .write_slot(id.as_u32(), &path.to_record().encode())?;

        if let Some(stored) = self.paths.get_mut(id.as_u32()) {
            stored.set_endpoints(path.start(), path.end());
            stored.set_weight(path.weight());
        }
        if old_start != path.start() {
            if let Some(house) = houses.get_mut(old_start) {
                house.detach(id);
            }
            if let Some(house) = houses.get_mut(path.start()) {
                house.attach(id);
            }
        }
        Ok(true)
    }

    /// Looks up a live path.
    #[must_use]
    pub fn get(&self, id: PathId) -> Option<&Path> {
        self.paths.get(id.as_u32())
    }

    /// Iterates over live paths in load/insert order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> + '_ {
        self.paths.iter()
    }

    fn check_endpoints(path: &Path, houses: &HouseStore) -> CoreResult<()> {
        for id in [path.start(), path.end()] {
            if houses.get(id).is_none() {
                return Err(CoreError::unknown_house(id));
            }
        }
        Ok(())
    }
}

impl RecordStore for PathStore {
    type Entity = Path;

    fn records(&self) -> &RecordFile {
        &self.records
    }

    fn records_mut(&mut self) -> &mut RecordFile {
        &mut self.records
    }

    fn working_set(&self) -> &WorkingSet<Path> {
        &self.paths
    }

    fn working_set_mut(&mut self) -> &mut WorkingSet<Path> {
        &mut self.paths
    }

    fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p.same_endpoints(path))
    }

    fn encode(path: &Path) -> Vec<u8> {
        path.to_record().encode()
    }

    fn stored_at(path: &Path, slot: u32) -> Path {
        Path::from_record(PathId::new(slot), path.to_record())
    }
}
