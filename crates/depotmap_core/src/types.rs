//! Core type definitions for depotmap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a house.
///
/// A house identifier is the index of its slot in the house file and never
/// changes once assigned. Identifier 0 is the depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseId(pub u32);

impl HouseId {
    /// The fixed origin of every search. Never removable.
    pub const DEPOT: Self = Self(0);

    /// Creates a new house ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns true for the depot.
    #[must_use]
    pub const fn is_depot(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for HouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "house:{}", self.0)
    }
}

/// Identifier of a path.
///
/// Like houses, a path identifier is its slot index in the path file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(pub u32);

impl PathId {
    /// Creates a new path ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depot_is_zero() {
        assert!(HouseId::DEPOT.is_depot());
        assert!(!HouseId::new(3).is_depot());
        assert_eq!(HouseId::DEPOT.as_u32(), 0);
    }

    #[test]
    fn ids_display() {
        assert_eq!(format!("{}", HouseId::new(7)), "house:7");
        assert_eq!(format!("{}", PathId::new(42)), "path:42");
    }

    #[test]
    fn ids_serialize_as_numbers() {
        let json = serde_json::to_string(&(HouseId::new(2), PathId::new(5))).unwrap();
        assert_eq!(json, "[2,5]");
    }
}
