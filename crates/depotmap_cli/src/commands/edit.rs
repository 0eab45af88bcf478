//! House and path editing commands.

use super::open_map;
use depotmap_core::{GraphRepository, House, HouseId, Path as MapPath, PathId};
use std::error::Error;
use std::path::Path;

/// Adds a house.
pub fn add_house(path: &Path, name: &str, x: i32, y: i32) -> Result<(), Box<dyn Error>> {
    let mut repo = open_map(path)?;
    let id = repo
        .add_house(House::new(name, x, y))?
        .ok_or("House already stored")?;
    println!("Added {id}");
    Ok(())
}

/// Renames and/or moves a house. Unset fields keep their current value.
pub fn edit_house(
    path: &Path,
    id: u32,
    name: Option<&str>,
    x: Option<i32>,
    y: Option<i32>,
) -> Result<(), Box<dyn Error>> {
    let mut repo = open_map(path)?;
    edit_house_in(&mut repo, HouseId::new(id), name, x, y)?;
    println!("Updated {}", HouseId::new(id));
    Ok(())
}

fn edit_house_in(
    repo: &mut GraphRepository,
    id: HouseId,
    name: Option<&str>,
    x: Option<i32>,
    y: Option<i32>,
) -> Result<(), Box<dyn Error>> {
    let current = repo
        .house_by_id(id)
        .ok_or_else(|| format!("No house with id {}", id.as_u32()))?;
    let (cur_x, cur_y) = current.position();

    if let Some(name) = name {
        repo.rename_house(id, name)?;
    }
    if x.is_some() || y.is_some() {
        repo.move_house(id, x.unwrap_or(cur_x), y.unwrap_or(cur_y))?;
    }
    Ok(())
}

/// Removes a house and its paths.
pub fn remove_house(path: &Path, id: u32) -> Result<(), Box<dyn Error>> {
    let mut repo = open_map(path)?;
    let before = repo.stats().paths;
    if !repo.remove_house(HouseId::new(id))? {
        return Err(format!("No house with id {id}").into());
    }
    let cascaded = before - repo.stats().paths;
    println!("Removed {} and {cascaded} path(s)", HouseId::new(id));
    Ok(())
}

/// Adds a path, using the configured default weight when none is given.
pub fn add_path(path: &Path, start: u32, end: u32, weight: Option<i32>) -> Result<(), Box<dyn Error>> {
    let mut repo = open_map(path)?;
    let (start, end) = (HouseId::new(start), HouseId::new(end));

    let added = match weight {
        Some(weight) => repo.add_path(MapPath::new(start, end, weight))?,
        None => repo.connect(start, end)?,
    };
    match added {
        Some(id) => println!("Added {id}"),
        None => println!("A path from {start} to {end} already exists"),
    }
    Ok(())
}

/// Changes a path's weight.
pub fn set_weight(path: &Path, id: u32, weight: i32) -> Result<(), Box<dyn Error>> {
    let mut repo = open_map(path)?;
    if !repo.set_path_weight(PathId::new(id), weight)? {
        return Err(format!("No path with id {id}").into());
    }
    println!("Updated {}", PathId::new(id));
    Ok(())
}

/// Removes a path.
pub fn remove_path(path: &Path, id: u32) -> Result<(), Box<dyn Error>> {
    let mut repo = open_map(path)?;
    if !repo.remove_path(PathId::new(id))? {
        return Err(format!("No path with id {id}").into());
    }
    println!("Removed {}", PathId::new(id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depotmap_core::{Config, MapFiles};
    use tempfile::tempdir;

    #[test]
    fn partial_move_keeps_other_axis() {
        let mut repo = GraphRepository::in_memory(Config::default()).unwrap();
        let a = repo.add_house(House::new("a", 10, 20)).unwrap().unwrap();

        edit_house_in(&mut repo, a, Some("b"), None, Some(-4)).unwrap();

        let house = repo.house_by_id(a).unwrap();
        assert_eq!((house.name(), house.position()), ("b", (10, -4)));
        assert!(edit_house_in(&mut repo, HouseId::new(9), None, Some(1), None).is_err());
    }

    #[test]
    fn edits_persist_between_commands() {
        let dir = tempdir().unwrap();
        let files = MapFiles::from_base(&dir.path().join("town"));
        GraphRepository::create(files.clone(), Config::default()).unwrap();

        add_house(&files.houses, "Shop", 5, 5).unwrap();
        add_path(&files.paths, 0, 1, None).unwrap();
        set_weight(&files.houses, 0, 3).unwrap();
        assert!(remove_path(&files.houses, 7).is_err());

        let repo = open_map(&files.houses).unwrap();
        let path = repo.path_by_id(PathId::new(0)).unwrap();
        assert_eq!((path.start(), path.end(), path.weight()), (HouseId::DEPOT, HouseId::new(1), 3));

        remove_house(&files.houses, 1).unwrap();
        assert_eq!(open_map(&files.paths).unwrap().stats().paths, 0);
        assert!(remove_house(&files.houses, 0).is_err());
    }
}
