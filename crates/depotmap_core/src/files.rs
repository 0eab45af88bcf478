//! Map file pairs.
//!
//! A map is stored as two sibling files sharing a base name: `<name>.mph`
//! holds houses and `<name>.mpp` holds paths. Selecting either one implies
//! the other.

use crate::error::{CoreError, CoreResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension of the house file.
pub const HOUSE_EXTENSION: &str = "mph";

/// Extension of the path file.
pub const PATH_EXTENSION: &str = "mpp";

/// The house and path files of one map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFiles {
    /// House file.
    pub houses: PathBuf,
    /// Path file.
    pub paths: PathBuf,
}

impl MapFiles {
    /// Builds the pair for the map with the given base path.
    #[must_use]
    pub fn from_base(base: &Path) -> Self {
        Self {
            houses: with_suffix(base, HOUSE_EXTENSION),
            paths: with_suffix(base, PATH_EXTENSION),
        }
    }

    /// Resolves a user selection to a file pair.
    ///
    /// The extension is matched case-insensitively. When creating, a
    /// selection that is not already a map file gets `.mph` appended, so
    /// `town` becomes `town.mph` and `town.mpp`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedExtension`] when opening a file that is
    /// neither `.mph` nor `.mpp`.
    pub fn from_selection(selection: &Path, create: bool) -> CoreResult<Self> {
        match map_extension(selection) {
            Some(_) => Ok(Self::from_base(&selection.with_extension(""))),
            None if create => Ok(Self::from_base(selection)),
            None => Err(CoreError::UnsupportedExtension {
                path: selection.to_path_buf(),
            }),
        }
    }

    /// Returns true if both files exist.
    #[must_use]
    pub fn exist(&self) -> bool {
        self.houses.exists() && self.paths.exists()
    }
}

fn map_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    [HOUSE_EXTENSION, PATH_EXTENSION]
        .into_iter()
        .find(|known| *known == ext)
}

fn with_suffix(base: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Asks the user which map to open or create.
pub trait FileResolver {
    /// Returns the selected file, or `None` if the user made no selection.
    fn select(&mut self, create: bool) -> Option<PathBuf>;
}

impl<F> FileResolver for F
where
    F: FnMut(bool) -> Option<PathBuf>,
{
    fn select(&mut self, create: bool) -> Option<PathBuf> {
        self(create)
    }
}

/// A resolver that always returns the same answer.
#[derive(Debug, Clone, Default)]
pub struct FixedSelection(pub Option<PathBuf>);

impl FileResolver for FixedSelection {
    fn select(&mut self, _create: bool) -> Option<PathBuf> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_file_implies_path_file() {
        let files = MapFiles::from_selection(Path::new("/maps/town.mph"), false).unwrap();
        assert_eq!(files.houses, PathBuf::from("/maps/town.mph"));
        assert_eq!(files.paths, PathBuf::from("/maps/town.mpp"));
    }

    #[test]
    fn path_file_implies_house_file() {
        let files = MapFiles::from_selection(Path::new("town.MPP"), false).unwrap();
        assert_eq!(files.houses, PathBuf::from("town.mph"));
        assert_eq!(files.paths, PathBuf::from("town.mpp"));
    }

    #[test]
    fn create_appends_extension() {
        let files = MapFiles::from_selection(Path::new("maps/new.town"), true).unwrap();
        assert_eq!(files.houses, PathBuf::from("maps/new.town.mph"));
        assert_eq!(files.paths, PathBuf::from("maps/new.town.mpp"));

        let files = MapFiles::from_selection(Path::new("maps/new.mph"), true).unwrap();
        assert_eq!(files.houses, PathBuf::from("maps/new.mph"));
    }

    #[test]
    fn open_rejects_other_extensions() {
        let err = MapFiles::from_selection(Path::new("notes.txt"), false).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedExtension { .. }));
        assert!(MapFiles::from_selection(Path::new("noext"), false).is_err());
    }

    #[test]
    fn resolvers() {
        let mut fixed = FixedSelection(Some(PathBuf::from("a.mph")));
        assert_eq!(fixed.select(false), Some(PathBuf::from("a.mph")));

        let mut cancelled = |_create: bool| -> Option<PathBuf> { None };
        assert_eq!(cancelled.select(true), None);
    }
}
