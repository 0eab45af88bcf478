//! Shadow-model harness for map edits.
//!
//! [`MapHarness`] applies [`MapOperation`]s to a real map and to a plain
//! in-memory model at the same time, and checks that the two agree,
//! including which slot each new entity lands in.

use crate::generators::MapOperation;
use depotmap_core::{GraphRepository, House, HouseId, Path, PathId};
use std::collections::BTreeMap;

/// Expected state of one house.
pub type HouseModel = (String, (i32, i32));

/// Expected state of one path: `(start, end, weight)`.
pub type PathModel = (HouseId, HouseId, i32);

/// Tracks what a map should contain.
#[derive(Debug, Clone, Default)]
pub struct MapHarness {
    houses: BTreeMap<HouseId, HouseModel>,
    paths: BTreeMap<PathId, PathModel>,
    house_slots: u32,
    path_slots: u32,
}

impl MapHarness {
    /// Creates a harness mirroring `repo` as it is now.
    pub fn new(repo: &GraphRepository) -> Self {
        let mut harness = Self {
            house_slots: repo.house_capacity().expect("Failed to read house capacity"),
            path_slots: repo.path_capacity().expect("Failed to read path capacity"),
            ..Self::default()
        };
        for house in repo.all_houses() {
            harness.houses.insert(
                house.id().expect("Loaded house without id"),
                (house.name().to_string(), house.position()),
            );
        }
        for path in repo.all_paths() {
            harness.paths.insert(
                path.id().expect("Loaded path without id"),
                (path.start(), path.end(), path.weight()),
            );
        }
        harness
    }

    /// Expected live houses.
    pub fn houses(&self) -> &BTreeMap<HouseId, HouseModel> {
        &self.houses
    }

    /// Expected live paths.
    pub fn paths(&self) -> &BTreeMap<PathId, PathModel> {
        &self.paths
    }

    fn first_free(slots: u32, live: impl Fn(u32) -> bool) -> u32 {
        (0..slots).find(|&s| !live(s)).unwrap_or(slots)
    }

    fn pick<K: Copy>(keys: impl Iterator<Item = K>, index: usize) -> Option<K> {
        let keys: Vec<K> = keys.collect();
        if keys.is_empty() {
            None
        } else {
            Some(keys[index % keys.len()])
        }
    }

    /// Applies `op` to both `repo` and the model, asserting matching outcomes.
    pub fn apply(&mut self, repo: &mut GraphRepository, op: &MapOperation) {
        match op {
            MapOperation::AddHouse { name, position } => {
                let expected =
                    Self::first_free(self.house_slots, |s| self.houses.contains_key(&HouseId::new(s)));
                let house = House::new(name, position.0, position.1);
                let stored_name = house.name().to_string();

                let id = repo
                    .add_house(house)
                    .expect("Failed to add house")
                    .expect("New house rejected");
                assert_eq!(id, HouseId::new(expected), "house did not reuse the first free slot");

                self.house_slots = self.house_slots.max(expected + 1);
                self.houses.insert(id, (stored_name, *position));
            }
            MapOperation::RemoveHouse { index } => {
                let candidates = self.houses.keys().copied().filter(|id| !id.is_depot());
                let Some(id) = Self::pick(candidates, *index) else {
                    return;
                };

                assert!(repo.remove_house(id).expect("Failed to remove house"));
                self.houses.remove(&id);
                self.paths
                    .retain(|_, (start, end, _)| *start != id && *end != id);
            }
            MapOperation::MoveHouse { index, position } => {
                let Some(id) = Self::pick(self.houses.keys().copied(), *index) else {
                    return;
                };

                assert!(repo
                    .move_house(id, position.0, position.1)
                    .expect("Failed to move house"));
                if let Some(house) = self.houses.get_mut(&id) {
                    house.1 = *position;
                }
            }
            MapOperation::AddPath { from, to, weight } => {
                let (Some(start), Some(end)) = (
                    Self::pick(self.houses.keys().copied(), *from),
                    Self::pick(self.houses.keys().copied(), *to),
                ) else {
                    return;
                };

                let duplicate = self
                    .paths
                    .values()
                    .any(|(s, e, _)| *s == start && *e == end);
                let expected =
                    Self::first_free(self.path_slots, |s| self.paths.contains_key(&PathId::new(s)));

                let added = repo
                    .add_path(Path::new(start, end, *weight))
                    .expect("Failed to add path");

                if duplicate {
                    assert_eq!(added, None, "duplicate path was stored");
                } else {
                    assert_eq!(added, Some(PathId::new(expected)));
                    self.path_slots = self.path_slots.max(expected + 1);
                    self.paths.insert(PathId::new(expected), (start, end, *weight));
                }
            }
            MapOperation::RemovePath { index } => {
                let Some(id) = Self::pick(self.paths.keys().copied(), *index) else {
                    return;
                };

                assert!(repo.remove_path(id).expect("Failed to remove path"));
                self.paths.remove(&id);
            }
            MapOperation::SetWeight { index, weight } => {
                let Some(id) = Self::pick(self.paths.keys().copied(), *index) else {
                    return;
                };

                assert!(repo
                    .set_path_weight(id, *weight)
                    .expect("Failed to set weight"));
                if let Some(path) = self.paths.get_mut(&id) {
                    path.2 = *weight;
                }
            }
        }
    }

    /// Asserts that `repo` holds exactly the modelled houses and paths, and
    /// that every path is listed under its source house.
    pub fn verify(&self, repo: &GraphRepository) {
        let houses: BTreeMap<HouseId, HouseModel> = repo
            .all_houses()
            .map(|h| {
                (
                    h.id().expect("Live house without id"),
                    (h.name().to_string(), h.position()),
                )
            })
            .collect();
        assert_eq!(houses, self.houses, "house mismatch");

        let paths: BTreeMap<PathId, PathModel> = repo
            .all_paths()
            .map(|p| {
                (
                    p.id().expect("Live path without id"),
                    (p.start(), p.end(), p.weight()),
                )
            })
            .collect();
        assert_eq!(paths, self.paths, "path mismatch");

        for (&id, &(start, _, _)) in &self.paths {
            let outgoing = repo
                .house_by_id(start)
                .expect("Path source missing")
                .outgoing();
            assert!(outgoing.contains(&id), "{id} not listed under {start}");
        }
        let listed: usize = repo.all_houses().map(|h| h.outgoing().len()).sum();
        assert_eq!(listed, self.paths.len(), "stale outgoing entries");

        assert_eq!(
            repo.house_capacity().expect("Failed to read house capacity"),
            self.house_slots
        );
        assert_eq!(
            repo.path_capacity().expect("Failed to read path capacity"),
            self.path_slots
        );
    }
}
