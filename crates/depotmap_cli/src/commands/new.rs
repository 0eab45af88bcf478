//! New command implementation.

use depotmap_core::{Config, CoreError, FixedSelection, GraphRepository};
use std::path::PathBuf;

/// Runs the new command.
///
/// A missing selection is reported and treated as a cancelled operation, not
/// a failure.
pub fn run(selection: Option<PathBuf>, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut resolver = FixedSelection(selection);

    let repo = match GraphRepository::open_with_resolver(&mut resolver, true, config) {
        Ok(repo) => repo,
        Err(CoreError::NoFileSelected) => {
            println!("No map selected, nothing created");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(files) = repo.files() {
        println!("Created map:");
        println!("  Houses: {}", files.houses.display());
        println!("  Paths:  {}", files.paths.display());
    }
    if let Some(depot) = repo.depot() {
        let (x, y) = depot.position();
        println!("  Depot:  {} at ({x}, {y})", depot.name());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depotmap_core::MapFiles;
    use tempfile::tempdir;

    #[test]
    fn creates_both_files() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("town");

        run(Some(base.clone()), Config::default()).unwrap();

        assert!(MapFiles::from_base(&base).exist());
    }

    #[test]
    fn no_selection_is_not_an_error() {
        run(None, Config::default()).unwrap();
    }
}
