//! End-to-end tests over real map files.

use depotmap_core::record::{HouseRecord, PathRecord, HOUSE_RECORD_SIZE, PATH_RECORD_SIZE};
use depotmap_core::{
    Config, CoreError, ErrorKind, GraphRepository, House, HouseId, MapFiles, Path, PathId,
    ShortestPathEngine,
};
use depotmap_testkit::prelude::*;
use proptest::prelude::*;
use std::fs;

#[test]
fn files_have_fixed_record_layout() {
    let mut map = TestMap::file();
    let a = map.add_house(House::new("Baker Street", -7, 300)).unwrap().unwrap();
    map.add_path(Path::new(HouseId::DEPOT, a, 12)).unwrap();

    let files = map.files().cloned().unwrap();
    let houses = fs::read(&files.houses).unwrap();
    let paths = fs::read(&files.paths).unwrap();

    assert_eq!(houses.len(), 2 * HOUSE_RECORD_SIZE);
    assert_eq!(paths.len(), PATH_RECORD_SIZE);

    let depot = HouseRecord::decode(0, &houses[..HOUSE_RECORD_SIZE]).unwrap();
    assert_eq!((depot.name.as_str(), depot.x, depot.y), ("Pizzeria", 50, 50));
    assert_eq!(&houses[HOUSE_RECORD_SIZE + 1..HOUSE_RECORD_SIZE + 13], b"Baker Street");
    assert_eq!(paths, PathRecord::live(0, 1, 12).encode());
}

#[test]
fn slot_reuse_after_removal() {
    let mut map = TestMap::file();
    let ids: Vec<_> = (0..4)
        .map(|i| map.add_house(House::new(&format!("h{i}"), 0, 0)).unwrap().unwrap())
        .collect();

    map.remove_house(ids[1]).unwrap();
    let reused = map.add_house(House::new("new", 0, 0)).unwrap().unwrap();
    assert_eq!(reused, ids[1]);
    assert_eq!(map.house_capacity().unwrap(), 5);

    let map = map.reopen();
    assert_eq!(map.house_by_id(reused).unwrap().name(), "new");
}

#[test]
fn cascade_delete_survives_reopen() {
    let mut map = TestMap::file();
    let a = map.add_house(House::new("a", 0, 0)).unwrap().unwrap();
    let b = map.add_house(House::new("b", 0, 0)).unwrap().unwrap();
    map.connect(HouseId::DEPOT, a).unwrap();
    map.connect(a, b).unwrap();
    map.connect(b, a).unwrap();
    let kept = map.connect(HouseId::DEPOT, b).unwrap().unwrap();

    map.remove_house(a).unwrap();
    let map = map.reopen();

    let left: Vec<PathId> = map.all_paths().filter_map(Path::id).collect();
    assert_eq!(left, vec![kept]);
    assert_eq!(map.stats().houses, 2);
}

#[test]
fn removing_path_keeps_houses() {
    let mut map = scenarios::chain(2, 1);
    let first = map.outgoing(HouseId::DEPOT).next().and_then(Path::id).unwrap();

    assert!(map.remove_path(first).unwrap());
    assert_eq!(map.stats().houses, 3);
    assert_eq!(map.orphans(), vec![HouseId::DEPOT]);
}

#[test]
fn duplicate_path_does_not_touch_file() {
    let mut map = TestMap::file();
    let a = map.add_house(House::new("a", 0, 0)).unwrap().unwrap();
    map.add_path(Path::new(HouseId::DEPOT, a, 1)).unwrap();

    let files = map.files().cloned().unwrap();
    let before = fs::read(&files.paths).unwrap();
    assert_eq!(map.add_path(Path::new(HouseId::DEPOT, a, 9)).unwrap(), None);
    assert_eq!(fs::read(&files.paths).unwrap(), before);
}

#[test]
fn overwrite_keeps_identifier() {
    let mut map = TestMap::file();
    let a = map.add_house(House::new("a", 0, 0)).unwrap().unwrap();
    let b = map.add_house(House::new("b", 0, 0)).unwrap().unwrap();
    let p = map.add_path(Path::new(HouseId::DEPOT, a, 1)).unwrap().unwrap();

    assert!(map.overwrite_house(a, &House::new("renamed", 9, 9)).unwrap());
    assert!(map.overwrite_path(p, &Path::new(HouseId::DEPOT, b, 5)).unwrap());

    let map = map.reopen();
    assert_eq!(map.house_by_id(a).unwrap().name(), "renamed");
    let path = map.path_by_id(p).unwrap();
    assert_eq!((path.id(), path.end(), path.weight()), (Some(p), b, 5));
    assert_eq!(map.house_capacity().unwrap(), 3);
    assert_eq!(map.path_capacity().unwrap(), 1);
}

#[test]
fn dangling_path_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let files = MapFiles::from_base(&dir.path().join("broken"));
    fs::write(&files.houses, HouseRecord::live("Pizzeria", 0, 0).encode()).unwrap();
    fs::write(&files.paths, PathRecord::live(3, 0, 1).encode()).unwrap();

    let err = GraphRepository::open(files, Config::default()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert_eq!(
        err.to_string(),
        "inconsistent path data (id:0) - starting house unavailable"
    );
}

#[test]
fn search_on_tree_marks_unique_path() {
    let mut map = scenarios::star(3);
    let leaf = HouseId::new(2);
    let extra = map.add_house(House::new("leaf", 0, 0)).unwrap().unwrap();
    let last = map.connect(leaf, extra).unwrap().unwrap();

    let mut engine = ShortestPathEngine::new();
    let route = engine.search(&map, HouseId::DEPOT, extra).unwrap();

    let spoke = map
        .outgoing(HouseId::DEPOT)
        .find(|p| p.end() == leaf)
        .and_then(Path::id)
        .unwrap();
    assert_eq!(route.paths, vec![spoke, last]);

    let marked: Vec<PathId> = map
        .all_paths()
        .filter_map(Path::id)
        .filter(|&id| engine.is_shortest(id))
        .collect();
    assert_eq!(marked, vec![spoke, last]);
}

#[test]
fn unreachable_leaves_nothing_marked() {
    let mut map = scenarios::chain(2, 1);
    let island = map.add_house(House::new("island", 0, 0)).unwrap().unwrap();
    map.connect(island, HouseId::DEPOT).unwrap();

    let mut engine = ShortestPathEngine::new();
    let err = engine.search(&map, HouseId::DEPOT, island).unwrap_err();
    assert!(matches!(err, CoreError::Unreachable { .. }));
    assert_eq!(err.kind(), ErrorKind::GraphSearch);
    assert_eq!(err.code(), Some(depotmap_core::DESTINATION_UNREACHABLE));
    assert!(map.all_paths().filter_map(Path::id).all(|id| !engine.is_shortest(id)));
}

#[test]
fn detour_example_marks_cheaper_route() {
    let (map, [direct, first, second]) = scenarios::detour();
    let mut engine = ShortestPathEngine::new();

    engine.search(&map, HouseId::DEPOT, HouseId::new(1)).unwrap();

    assert!(!engine.is_shortest(direct));
    assert!(engine.is_shortest(first));
    assert!(engine.is_shortest(second));
    assert_eq!(engine.shortest_paths(), &[first, second]);
}

#[test]
fn progress_covers_house_capacity() {
    let mut map = scenarios::chain(3, 1);
    let gone = map.add_house(House::new("gone", 0, 0)).unwrap().unwrap();
    map.remove_house(gone).unwrap();

    let mut last = None;
    let mut engine = ShortestPathEngine::with_progress(|min: u32, max: u32, value: u32| {
        last = Some((min, max, value));
    });
    engine.search(&map, HouseId::DEPOT, HouseId::new(3)).unwrap();
    drop(engine);

    // 5 slots, 4 reachable houses plus the final step.
    assert_eq!(last, Some((0, 5, 5)));
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn edits_round_trip_through_files(ops in operation_sequence_strategy(1, 40)) {
        let mut map = TestMap::file();
        let mut harness = MapHarness::new(&map);

        for op in &ops {
            harness.apply(&mut map, op);
        }
        harness.verify(&map);

        let map = map.reopen();
        harness.verify(&map);
    }

    #[test]
    fn search_labels_are_route_bounds((count, edges) in graph_strategy(8)) {
        let mut map = GraphRepository::in_memory(Config::default()).unwrap();
        for i in 1..count {
            map.add_house(House::new(&format!("h{i}"), 0, 0)).unwrap();
        }
        for (s, e, w) in edges {
            map.add_path(Path::new(HouseId::new(s), HouseId::new(e), w)).unwrap();
        }

        let mut engine = ShortestPathEngine::new();
        for target in 1..count {
            match engine.search(&map, HouseId::DEPOT, HouseId::new(target)) {
                Ok(route) => {
                    prop_assert!(!route.paths.is_empty());
                    let first = map.path_by_id(route.paths[0]).unwrap();
                    prop_assert_eq!(first.start(), HouseId::DEPOT);
                    let last = map.path_by_id(*route.paths.last().unwrap()).unwrap();
                    prop_assert_eq!(last.end(), HouseId::new(target));
                    prop_assert!(engine.route_cost(&map) <= route.distance);
                }
                Err(CoreError::Unreachable { .. }) => {
                    prop_assert!(engine.shortest_paths().is_empty());
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
