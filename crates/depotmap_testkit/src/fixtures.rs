//! Test fixtures and map helpers.
//!
//! Provides convenience functions for setting up test maps
//! and common graph shapes.

use depotmap_core::{Config, CoreResult, GraphRepository, MapFiles};
use depotmap_storage::InMemoryBackend;
use tempfile::TempDir;

/// A test map with automatic cleanup.
pub struct TestMap {
    /// The map.
    pub repo: GraphRepository,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestMap {
    /// Creates a new in-memory map with the default depot.
    pub fn memory() -> Self {
        Self {
            repo: GraphRepository::in_memory(Config::default())
                .expect("Failed to create in-memory map"),
            _temp_dir: None,
        }
    }

    /// Creates a new map in a temporary directory.
    pub fn file() -> Self {
        Self::file_with_config(Config::default())
    }

    /// Creates a new map in a temporary directory with a custom configuration.
    pub fn file_with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let files = MapFiles::from_base(&temp_dir.path().join("test"));
        let repo = GraphRepository::create(files, config).expect("Failed to create map files");

        Self {
            repo,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the map files if file-based, None if in-memory.
    pub fn files(&self) -> Option<&MapFiles> {
        self.repo.files()
    }

    /// Drops the open map and loads it again from its files.
    ///
    /// # Panics
    ///
    /// Panics for an in-memory map or if the files fail to load.
    #[must_use]
    pub fn reopen(self) -> Self {
        let files = self
            .files()
            .cloned()
            .expect("Only file-based maps can be reopened");
        let config = self.repo.config().clone();
        let temp_dir = self._temp_dir;
        drop(self.repo);

        Self {
            repo: GraphRepository::open(files, config).expect("Failed to reopen map"),
            _temp_dir: temp_dir,
        }
    }
}

impl std::ops::Deref for TestMap {
    type Target = GraphRepository;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}

impl std::ops::DerefMut for TestMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.repo
    }
}

/// Loads a map from raw house and path file contents.
///
/// Useful for checking how hand-built or damaged files are handled.
pub fn load_raw(houses: Vec<u8>, paths: Vec<u8>) -> CoreResult<GraphRepository> {
    GraphRepository::open_with_backends(
        Config::default(),
        Box::new(InMemoryBackend::with_data(houses)),
        Box::new(InMemoryBackend::with_data(paths)),
        false,
    )
}

/// Runs a test with a temporary in-memory map.
pub fn with_temp_map<F, R>(f: F) -> R
where
    F: FnOnce(&mut GraphRepository) -> R,
{
    let mut test_map = TestMap::memory();
    f(&mut test_map.repo)
}

/// Runs a test with a map in a temporary directory.
pub fn with_file_map<F, R>(f: F) -> R
where
    F: FnOnce(&mut GraphRepository, &MapFiles) -> R,
{
    let mut test_map = TestMap::file();
    let files = test_map
        .files()
        .cloned()
        .expect("File map should have files");
    f(&mut test_map.repo, &files)
}

/// Common graph shapes.
pub mod scenarios {
    use super::*;
    use depotmap_core::{House, HouseId, Path, PathId};

    fn add_houses(map: &mut TestMap, count: u32) -> Vec<HouseId> {
        (1..=count)
            .map(|i| {
                map.add_house(House::new(&format!("House {i}"), i as i32 * 10, 0))
                    .expect("Failed to add house")
                    .expect("House rejected as duplicate")
            })
            .collect()
    }

    fn add_path(map: &mut TestMap, start: HouseId, end: HouseId, weight: i32) -> PathId {
        map.add_path(Path::new(start, end, weight))
            .expect("Failed to add path")
            .expect("Path rejected as duplicate")
    }

    /// The depot followed by `len` houses in a line, each hop costing `weight`.
    pub fn chain(len: u32, weight: i32) -> TestMap {
        let mut map = TestMap::memory();
        let mut previous = HouseId::DEPOT;
        for house in add_houses(&mut map, len) {
            add_path(&mut map, previous, house, weight);
            previous = house;
        }
        map
    }

    /// The depot with a direct path to each of `spokes` houses.
    pub fn star(spokes: u32) -> TestMap {
        let mut map = TestMap::memory();
        for (i, house) in add_houses(&mut map, spokes).into_iter().enumerate() {
            add_path(&mut map, HouseId::DEPOT, house, i as i32 + 1);
        }
        map
    }

    /// Depot to house 1 directly (4) or through house 2 (1 + 1).
    ///
    /// Returns the map and its paths in the order
    /// `[depot->1, depot->2, 2->1]`.
    pub fn detour() -> (TestMap, [PathId; 3]) {
        let mut map = TestMap::memory();
        let houses = add_houses(&mut map, 2);
        let direct = add_path(&mut map, HouseId::DEPOT, houses[0], 4);
        let first = add_path(&mut map, HouseId::DEPOT, houses[1], 1);
        let second = add_path(&mut map, houses[1], houses[0], 1);
        (map, [direct, first, second])
    }
}
