//! Depth-first label-correcting route search.
//!
//! The search relaxes every outgoing path of a house, marks the house
//! visited, then descends into each unvisited neighbour in outgoing-list
//! order. A visited house is never descended into again, even if a cheaper
//! label reaches it later, so the result depends on edge order and is not
//! always minimal. The descent uses an explicit frame stack instead of
//! recursion; each frame is `(house, next outgoing index)`, which visits
//! houses in exactly the order the recursive formulation would.

use super::progress::{Meter, NoProgress, ProgressSink};
use crate::error::{CoreError, CoreResult};
use crate::repository::GraphRepository;
use crate::types::{HouseId, PathId};
use serde::Serialize;
use std::collections::HashSet;

/// The outcome of a successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Where the search started.
    pub origin: HouseId,
    /// The destination.
    pub target: HouseId,
    /// Label of the destination when the search finished.
    pub distance: i64,
    /// Paths from origin to target, in travel order.
    pub paths: Vec<PathId>,
}

/// Per-search scratch data, indexed by slot.
#[derive(Debug, Default)]
struct SearchState {
    distance: Vec<Option<i64>>,
    back: Vec<Option<PathId>>,
    visited: Vec<bool>,
    shortest: Vec<bool>,
    route: Vec<PathId>,
}

impl SearchState {
    fn reset(&mut self, houses: usize, paths: usize) {
        self.distance.clear();
        self.distance.resize(houses, None);
        self.back.clear();
        self.back.resize(houses, None);
        self.visited.clear();
        self.visited.resize(houses, false);
        self.shortest.clear();
        self.shortest.resize(paths, false);
        self.route.clear();
    }

    fn distance(&self, house: HouseId) -> Option<i64> {
        self.distance.get(house.as_u32() as usize).copied().flatten()
    }

    fn back_pointer(&self, house: HouseId) -> Option<PathId> {
        self.back.get(house.as_u32() as usize).copied().flatten()
    }

    fn is_visited(&self, house: HouseId) -> bool {
        self.visited
            .get(house.as_u32() as usize)
            .copied()
            .unwrap_or(false)
    }

    fn set_label(&mut self, house: HouseId, distance: i64, via: Option<PathId>) {
        let index = house.as_u32() as usize;
        if let (Some(d), Some(b)) = (self.distance.get_mut(index), self.back.get_mut(index)) {
            *d = Some(distance);
            *b = via;
        }
    }

    /// Relaxes every outgoing path of `house`, then marks it visited.
    fn expand(&mut self, repo: &GraphRepository, house: HouseId) {
        if let Some(base) = self.distance(house) {
            for path in repo.outgoing(house) {
                let candidate = base + i64::from(path.weight());
                let improves = self
                    .distance(path.end())
                    .map_or(true, |current| candidate < current);
                if improves {
                    self.set_label(path.end(), candidate, path.id());
                }
            }
        }
        if let Some(v) = self.visited.get_mut(house.as_u32() as usize) {
            *v = true;
        }
    }

    fn mark_shortest(&mut self, path: PathId) {
        if let Some(s) = self.shortest.get_mut(path.as_u32() as usize) {
            *s = true;
        }
        self.route.push(path);
    }
}

/// Finds delivery routes on a [`GraphRepository`].
///
/// The engine keeps the labels of its last search so callers can query them
/// afterwards; [`clear`](Self::clear) discards them.
///
/// # Example
///
/// ```rust
/// use depotmap_core::{Config, GraphRepository, House, HouseId, Path, ShortestPathEngine};
///
/// let mut map = GraphRepository::in_memory(Config::default()).unwrap();
/// let a = map.add_house(House::new("a", 0, 0)).unwrap().unwrap();
/// let hop = map.add_path(Path::new(HouseId::DEPOT, a, 3)).unwrap().unwrap();
///
/// let mut engine = ShortestPathEngine::new();
/// let route = engine.search(&map, HouseId::DEPOT, a).unwrap();
/// assert_eq!(route.paths, vec![hop]);
/// assert!(engine.is_shortest(hop));
/// ```
#[derive(Debug, Default)]
pub struct ShortestPathEngine<P: ProgressSink = NoProgress> {
    progress: P,
    state: SearchState,
}

impl ShortestPathEngine<NoProgress> {
    /// Creates an engine that reports no progress.
    #[must_use]
    pub fn new() -> Self {
        Self::with_progress(NoProgress)
    }
}

impl<P: ProgressSink> ShortestPathEngine<P> {
    /// Creates an engine that reports to `progress`.
    pub fn with_progress(progress: P) -> Self {
        Self {
            progress,
            state: SearchState::default(),
        }
    }

    /// Returns the progress sink.
    pub fn progress(&self) -> &P {
        &self.progress
    }

    /// Forgets every label and route marker from the last search.
    pub fn clear(&mut self) {
        self.state.reset(0, 0);
    }

    /// Searches for a route from `origin` to `target`.
    ///
    /// Progress runs over `[0, house capacity]`: one step per house once all
    /// its descendants are done, and one more when the route is marked.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnknownHouse`] if either house is not live.
    /// - [`CoreError::Unreachable`] if the target never received a label,
    ///   including when `origin == target`.
    /// - [`CoreError::BackPointerCycle`] if the back-pointers loop, which
    ///   only negative weights can cause.
    pub fn search(
        &mut self,
        repo: &GraphRepository,
        origin: HouseId,
        target: HouseId,
    ) -> CoreResult<Route> {
        for id in [origin, target] {
            if repo.house_by_id(id).is_none() {
                return Err(CoreError::unknown_house(id));
            }
        }

        let capacity = repo.house_capacity()?;
        let mut meter = Meter::start(&mut self.progress, capacity);

        let state = &mut self.state;
        state.reset(capacity as usize, repo.path_capacity()? as usize);
        state.set_label(origin, 0, None);

        state.expand(repo, origin);
        let mut frames: Vec<(HouseId, usize)> = vec![(origin, 0)];

        while let Some(&(house, next)) = frames.last() {
            let edge = repo
                .house_by_id(house)
                .and_then(|h| h.outgoing().get(next).copied());

            let Some(edge) = edge else {
                frames.pop();
                meter.step();
                continue;
            };

            if let Some(top) = frames.last_mut() {
                top.1 += 1;
            }
            if let Some(end) = repo.path_by_id(edge).map(|p| p.end()) {
                if !state.is_visited(end) {
                    state.expand(repo, end);
                    frames.push((end, 0));
                }
            }
        }

        if state.back_pointer(target).is_none() {
            tracing::debug!(%origin, %target, "destination unreachable");
            return Err(CoreError::Unreachable { origin, target });
        }

        let mut seen = HashSet::new();
        let mut house = target;
        while house != origin {
            if !seen.insert(house) {
                return Err(CoreError::BackPointerCycle { house });
            }
            let Some(via) = state.back_pointer(house) else {
                return Err(CoreError::Unreachable { origin, target });
            };
            let Some(path) = repo.path_by_id(via) else {
                return Err(CoreError::Unreachable { origin, target });
            };
            state.mark_shortest(via);
            house = path.start();
        }
        state.route.reverse();
        meter.step();

        let route = Route {
            origin,
            target,
            distance: state.distance(target).unwrap_or_default(),
            paths: state.route.clone(),
        };
        tracing::debug!(%origin, %target, distance = route.distance, hops = route.paths.len(), "route found");
        Ok(route)
    }

    /// Returns true if `path` is on the route of the last search.
    #[must_use]
    pub fn is_shortest(&self, path: PathId) -> bool {
        self.state
            .shortest
            .get(path.as_u32() as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Paths of the last route, origin first.
    #[must_use]
    pub fn shortest_paths(&self) -> &[PathId] {
        &self.state.route
    }

    /// Label of `house` after the last search, `None` if it was not reached.
    #[must_use]
    pub fn distance(&self, house: HouseId) -> Option<i64> {
        self.state.distance(house)
    }

    /// The path through which `house` received its label.
    #[must_use]
    pub fn back_pointer(&self, house: HouseId) -> Option<PathId> {
        self.state.back_pointer(house)
    }

    /// Returns true if the last search descended into `house`.
    #[must_use]
    pub fn is_visited(&self, house: HouseId) -> bool {
        self.state.is_visited(house)
    }

    /// Sum of the current weights along the last route.
    ///
    /// This can be lower than the target's label, since a house on the route
    /// may have been relabelled after its successor was labelled.
    #[must_use]
    pub fn route_cost(&self, repo: &GraphRepository) -> i64 {
        self.state
            .route
            .iter()
            .filter_map(|&id| repo.path_by_id(id))
            .map(|p| i64::from(p.weight()))
            .sum()
    }
}
