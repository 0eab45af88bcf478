//! The map facade.

use crate::config::Config;
use crate::entity::{House, Path};
use crate::error::{CoreError, CoreResult};
use crate::files::{FileResolver, MapFiles};
use crate::store::{HouseStore, PathStore, RecordStore};
use crate::types::{HouseId, PathId};
use depotmap_storage::{FileBackend, InMemoryBackend, StorageBackend};
use serde::Serialize;
use std::collections::HashSet;

/// Live entity counts of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapStats {
    /// Live houses.
    pub houses: usize,
    /// Live paths.
    pub paths: usize,
}

/// A house store and a path store opened against one map file pair.
///
/// All mutations go through here so the two files stay consistent: removing
/// a house removes its paths first, and a path is only stored between live
/// houses.
///
/// # Example
///
/// ```rust
/// use depotmap_core::{Config, GraphRepository, House, HouseId};
///
/// let mut map = GraphRepository::in_memory(Config::default()).unwrap();
/// let shop = map.add_house(House::new("Corner Shop", 80, 20)).unwrap().unwrap();
/// map.connect(HouseId::DEPOT, shop).unwrap();
///
/// let stats = map.stats();
/// assert_eq!((stats.houses, stats.paths), (2, 1));
/// ```
pub struct GraphRepository {
    config: Config,
    files: Option<MapFiles>,
    houses: HouseStore,
    paths: PathStore,
}

impl GraphRepository {
    /// Creates a new map, discarding any existing content of the pair.
    ///
    /// The depot is written at identifier 0 unless
    /// [`Config::seed_depot`] is off.
    pub fn create(files: MapFiles, config: Config) -> CoreResult<Self> {
        let houses = FileBackend::with_create_dirs(&files.houses)?;
        let paths = FileBackend::with_create_dirs(&files.paths)?;
        let mut repo = Self::open_with_backends(config, Box::new(houses), Box::new(paths), true)?;
        tracing::info!(houses = %files.houses.display(), "map created");
        repo.files = Some(files);
        Ok(repo)
    }

    /// Opens an existing map.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and on inconsistent data, such as a path that
    /// refers to a missing house.
    pub fn open(files: MapFiles, config: Config) -> CoreResult<Self> {
        let houses = FileBackend::new(&files.houses);
        let paths = FileBackend::new(&files.paths);
        let mut repo = Self::open_with_backends(config, Box::new(houses), Box::new(paths), false)?;
        tracing::info!(
            houses = repo.houses.len(),
            paths = repo.paths.len(),
            "map opened"
        );
        repo.files = Some(files);
        Ok(repo)
    }

    /// Asks `resolver` for a map file, then creates or opens it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoFileSelected`] when the resolver has no
    /// selection. Callers usually abandon the operation quietly in that case.
    pub fn open_with_resolver<R: FileResolver + ?Sized>(
        resolver: &mut R,
        create: bool,
        config: Config,
    ) -> CoreResult<Self> {
        let selection = resolver.select(create).ok_or(CoreError::NoFileSelected)?;
        let files = MapFiles::from_selection(&selection, create)?;
        if create {
            Self::create(files, config)
        } else {
            Self::open(files, config)
        }
    }

    /// Opens a map over arbitrary backends.
    pub fn open_with_backends(
        config: Config,
        house_backend: Box<dyn StorageBackend>,
        path_backend: Box<dyn StorageBackend>,
        create: bool,
    ) -> CoreResult<Self> {
        let mut houses = HouseStore::open(house_backend, create)?;
        let paths = PathStore::open(path_backend, &mut houses, create)?;

        if create && config.seed_depot {
            let (x, y) = config.depot_position;
            houses.add(House::new(&config.depot_name, x, y))?;
        }

        Ok(Self {
            config,
            files: None,
            houses,
            paths,
        })
    }

    /// Creates an empty map that lives only in memory.
    pub fn in_memory(config: Config) -> CoreResult<Self> {
        Self::open_with_backends(
            config,
            Box::new(InMemoryBackend::new()),
            Box::new(InMemoryBackend::new()),
            true,
        )
    }

    /// The files backing this map, if any.
    #[must_use]
    pub fn files(&self) -> Option<&MapFiles> {
        self.files.as_ref()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stores a new house.
    ///
    /// Returns `None` if the house is already stored.
    pub fn add_house(&mut self, house: House) -> CoreResult<Option<HouseId>> {
        let id = self.houses.add(house)?;
        if let Some(id) = id {
            tracing::debug!(house = %id, "house added");
        }
        Ok(id)
    }

    /// Stores a new path.
    ///
    /// Returns `None` if a path already joins the same ordered pair.
    pub fn add_path(&mut self, path: Path) -> CoreResult<Option<PathId>> {
        let id = self.paths.add(path, &mut self.houses)?;
        if let Some(id) = id {
            tracing::debug!(path = %id, "path added");
        }
        Ok(id)
    }

    /// Stores a path with the configured default weight.
    pub fn connect(&mut self, start: HouseId, end: HouseId) -> CoreResult<Option<PathId>> {
        let weight = self.config.default_path_weight;
        self.add_path(Path::new(start, end, weight))
    }

    /// Removes a house and every path touching it.
    ///
    /// Returns false if no live house has this identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DepotRemoval`] for the depot.
    pub fn remove_house(&mut self, id: HouseId) -> CoreResult<bool> {
        if id.is_depot() {
            return Err(CoreError::DepotRemoval);
        }
        let removed = self.houses.remove(id, &mut self.paths)?.is_some();
        if removed {
            tracing::debug!(house = %id, "house removed");
        }
        Ok(removed)
    }

    /// Removes a path. Returns false if no live path has this identifier.
    pub fn remove_path(&mut self, id: PathId) -> CoreResult<bool> {
        let removed = self.paths.remove(id, &mut self.houses)?.is_some();
        if removed {
            tracing::debug!(path = %id, "path removed");
        }
        Ok(removed)
    }

    /// Rewrites a house's name and position in place.
    pub fn overwrite_house(&mut self, id: HouseId, house: &House) -> CoreResult<bool> {
        self.houses.overwrite(id, house)
    }

    /// Rewrites a path's endpoints and weight in place.
    pub fn overwrite_path(&mut self, id: PathId, path: &Path) -> CoreResult<bool> {
        self.paths.overwrite(id, path, &mut self.houses)
    }

    /// Renames a house.
    pub fn rename_house(&mut self, id: HouseId, name: &str) -> CoreResult<bool> {
        let Some(mut house) = self.houses.get(id).cloned() else {
            return Ok(false);
        };
        house.set_name(name);
        self.houses.overwrite(id, &house)
    }

    /// Moves a house to an absolute position.
    pub fn move_house(&mut self, id: HouseId, x: i32, y: i32) -> CoreResult<bool> {
        let Some(mut house) = self.houses.get(id).cloned() else {
            return Ok(false);
        };
        house.set_position(x, y);
        self.houses.overwrite(id, &house)
    }

    /// Changes the weight of a path.
    pub fn set_path_weight(&mut self, id: PathId, weight: i32) -> CoreResult<bool> {
        let Some(mut path) = self.paths.get(id).cloned() else {
            return Ok(false);
        };
        path.set_weight(weight);
        self.paths.overwrite(id, &path, &mut self.houses)
    }

    /// Looks up a live house.
    #[must_use]
    pub fn house_by_id(&self, id: HouseId) -> Option<&House> {
        self.houses.get(id)
    }

    /// Looks up a live path.
    #[must_use]
    pub fn path_by_id(&self, id: PathId) -> Option<&Path> {
        self.paths.get(id)
    }

    /// The depot, if the map has one.
    #[must_use]
    pub fn depot(&self) -> Option<&House> {
        self.houses.get(HouseId::DEPOT)
    }

    /// All live houses.
    pub fn all_houses(&self) -> impl Iterator<Item = &House> + '_ {
        self.houses.iter()
    }

    /// All live paths.
    pub fn all_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.paths.iter()
    }

    /// Paths leaving `house`, in attachment order.
    pub fn outgoing(&self, house: HouseId) -> impl Iterator<Item = &Path> + '_ {
        self.houses
            .get(house)
            .into_iter()
            .flat_map(House::outgoing)
            .filter_map(|&id| self.paths.get(id))
    }

    /// Live entity counts.
    #[must_use]
    pub fn stats(&self) -> MapStats {
        MapStats {
            houses: self.houses.len(),
            paths: self.paths.len(),
        }
    }

    /// Slots in the house file, including tombstones.
    ///
    /// This is an upper bound on house identifiers, not the live count.
    pub fn house_capacity(&self) -> CoreResult<u32> {
        self.houses.total_slots()
    }

    /// Slots in the path file, including tombstones.
    pub fn path_capacity(&self) -> CoreResult<u32> {
        self.paths.total_slots()
    }

    /// Live houses with no path in either direction.
    #[must_use]
    pub fn orphans(&self) -> Vec<HouseId> {
        let linked: HashSet<HouseId> = self
            .paths
            .iter()
            .flat_map(|p| [p.start(), p.end()])
            .collect();

        self.houses
            .iter()
            .filter_map(House::id)
            .filter(|id| !linked.contains(id))
            .collect()
    }
}
