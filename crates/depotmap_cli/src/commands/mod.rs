//! CLI command implementations.

pub mod edit;
pub mod inspect;
pub mod new;
pub mod route;

use depotmap_core::{Config, GraphRepository, MapFiles};
use std::path::Path;

/// Opens the existing map that `path` belongs to.
pub fn open_map(path: &Path) -> Result<GraphRepository, Box<dyn std::error::Error>> {
    let files = MapFiles::from_selection(path, false)?;
    if !files.exist() {
        return Err(format!(
            "No map found at {} / {}",
            files.houses.display(),
            files.paths.display()
        )
        .into());
    }
    Ok(GraphRepository::open(files, Config::default())?)
}
