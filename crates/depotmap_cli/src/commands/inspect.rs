//! Inspect command implementation.

use super::open_map;
use depotmap_core::{GraphRepository, House, HouseId, MapStats, Path as MapPath};
use depotmap_storage::{FileBackend, StorageBackend};
use serde::Serialize;
use std::path::Path;

/// Map inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// House file path.
    pub house_file: String,
    /// Path file path.
    pub path_file: String,
    /// Size of both files in bytes.
    pub total_size: u64,
    /// Live entity counts.
    pub stats: MapStats,
    /// Slots in the house file.
    pub house_slots: u32,
    /// Slots in the path file.
    pub path_slots: u32,
    /// Houses without any path.
    pub orphans: Vec<HouseId>,
    /// House listing (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub houses: Option<Vec<HouseView>>,
    /// Path listing (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<PathView>>,
}

/// A house as shown to the user.
#[derive(Debug, Serialize)]
pub struct HouseView {
    /// Identifier.
    pub id: u32,
    /// Name.
    pub name: String,
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl From<&House> for HouseView {
    fn from(house: &House) -> Self {
        let (x, y) = house.position();
        Self {
            id: house.id().map_or(0, HouseId::as_u32),
            name: house.name().to_string(),
            x,
            y,
        }
    }
}

/// A path as shown to the user.
#[derive(Debug, Serialize)]
pub struct PathView {
    /// Identifier.
    pub id: u32,
    /// Source house.
    pub start: u32,
    /// Destination house.
    pub end: u32,
    /// Travel cost.
    pub weight: i32,
}

impl From<&MapPath> for PathView {
    fn from(path: &MapPath) -> Self {
        Self {
            id: path.id().map_or(0, |id| id.as_u32()),
            start: path.start().as_u32(),
            end: path.end().as_u32(),
            weight: path.weight(),
        }
    }
}

/// Runs the inspect command.
pub fn run(
    path: &Path,
    show_houses: bool,
    show_paths: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = open_map(path)?;
    let result = inspect(&repo, show_houses, show_paths)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn inspect(
    repo: &GraphRepository,
    show_houses: bool,
    show_paths: bool,
) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let (house_file, path_file, total_size) = match repo.files() {
        Some(files) => (
            files.houses.display().to_string(),
            files.paths.display().to_string(),
            FileBackend::new(&files.houses).size()? + FileBackend::new(&files.paths).size()?,
        ),
        None => (String::from("<memory>"), String::from("<memory>"), 0),
    };

    Ok(InspectResult {
        house_file,
        path_file,
        total_size,
        stats: repo.stats(),
        house_slots: repo.house_capacity()?,
        path_slots: repo.path_capacity()?,
        orphans: repo.orphans(),
        houses: show_houses.then(|| repo.all_houses().map(HouseView::from).collect()),
        paths: show_paths.then(|| repo.all_paths().map(PathView::from).collect()),
    })
}

fn print_text_output(result: &InspectResult) {
    println!("depotmap Map Inspection");
    println!("=======================");
    println!();
    println!("Files:");
    println!("  Houses: {}", result.house_file);
    println!("  Paths:  {}", result.path_file);
    println!("  Size:   {} bytes", result.total_size);
    println!();
    println!("Records:");
    println!(
        "  Houses: {} live, {} slots",
        result.stats.houses, result.house_slots
    );
    println!(
        "  Paths:  {} live, {} slots",
        result.stats.paths, result.path_slots
    );

    if !result.orphans.is_empty() {
        let ids: Vec<String> = result.orphans.iter().map(|id| id.as_u32().to_string()).collect();
        println!();
        println!("Orphans: {}", ids.join(", "));
    }

    if let Some(houses) = &result.houses {
        println!();
        println!("Houses:");
        for house in houses {
            println!("  [{}] {} ({}, {})", house.id, house.name, house.x, house.y);
        }
    }

    if let Some(paths) = &result.paths {
        println!();
        println!("Paths:");
        for path in paths {
            println!(
                "  [{}] {} -> {} weight {}",
                path.id, path.start, path.end, path.weight
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depotmap_core::Config;

    #[test]
    fn inspect_counts_tombstoned_slots() {
        let mut repo = GraphRepository::in_memory(Config::default()).unwrap();
        let a = repo.add_house(House::new("a", 1, 2)).unwrap().unwrap();
        let b = repo.add_house(House::new("b", 3, 4)).unwrap().unwrap();
        repo.connect(HouseId::DEPOT, b).unwrap();
        repo.remove_house(a).unwrap();

        let result = inspect(&repo, true, true).unwrap();
        assert_eq!(result.stats, MapStats { houses: 2, paths: 1 });
        assert_eq!(result.house_slots, 3);
        assert!(result.orphans.is_empty());

        let names: Vec<_> = result.houses.unwrap().into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Pizzeria", "b"]);

        let json = serde_json::to_value(inspect(&repo, false, false).unwrap()).unwrap();
        assert!(json.get("houses").is_none());
        assert_eq!(json["stats"]["paths"], 1);
    }
}
