//! Path entity.

use crate::record::PathRecord;
use crate::types::{HouseId, PathId};
use crate::working_set::Slotted;

/// A directed, weighted link between two houses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    id: Option<PathId>,
    start: HouseId,
    end: HouseId,
    weight: i32,
}

impl Path {
    /// Creates an unstored path.
    #[must_use]
    pub const fn new(start: HouseId, end: HouseId, weight: i32) -> Self {
        Self {
            id: None,
            start,
            end,
            weight,
        }
    }

    pub(crate) fn from_record(id: PathId, record: PathRecord) -> Self {
        Self {
            id: Some(id),
            start: HouseId::new(record.start),
            end: HouseId::new(record.end),
            weight: record.weight,
        }
    }

    pub(crate) fn to_record(&self) -> PathRecord {
        PathRecord::live(self.start.as_u32(), self.end.as_u32(), self.weight)
    }

    /// The identifier, once stored.
    #[must_use]
    pub const fn id(&self) -> Option<PathId> {
        self.id
    }

    /// Assigns the identifier. A second call is ignored.
    pub fn set_id(&mut self, id: PathId) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// Source house.
    #[must_use]
    pub const fn start(&self) -> HouseId {
        self.start
    }

    /// Destination house.
    #[must_use]
    pub const fn end(&self) -> HouseId {
        self.end
    }

    /// Travel cost.
    #[must_use]
    pub const fn weight(&self) -> i32 {
        self.weight
    }

    /// Replaces the travel cost.
    pub fn set_weight(&mut self, weight: i32) {
        self.weight = weight;
    }

    pub(crate) fn set_endpoints(&mut self, start: HouseId, end: HouseId) {
        self.start = start;
        self.end = end;
    }

    /// Returns true if `house` is either endpoint.
    #[must_use]
    pub fn touches(&self, house: HouseId) -> bool {
        self.start == house || self.end == house
    }

    /// Returns true if both paths join the same ordered pair of houses.
    #[must_use]
    pub fn same_endpoints(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Slotted for Path {
    fn slot(&self) -> Option<u32> {
        self.id.map(PathId::as_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_set_once() {
        let mut path = Path::new(HouseId::new(0), HouseId::new(1), 4);
        path.set_id(PathId::new(2));
        path.set_id(PathId::new(5));
        assert_eq!(path.id(), Some(PathId::new(2)));
    }

    #[test]
    fn endpoints_are_ordered() {
        let a = Path::new(HouseId::new(0), HouseId::new(1), 1);
        let b = Path::new(HouseId::new(0), HouseId::new(1), 9);
        let reverse = Path::new(HouseId::new(1), HouseId::new(0), 1);

        assert!(a.same_endpoints(&b));
        assert!(!a.same_endpoints(&reverse));
        assert!(a.touches(HouseId::new(1)));
        assert!(!a.touches(HouseId::new(2)));
    }

    #[test]
    fn record_conversion() {
        let record = PathRecord::live(3, 4, -2);
        let path = Path::from_record(PathId::new(7), record);
        assert_eq!(path.id(), Some(PathId::new(7)));
        assert_eq!(path.to_record(), record);
    }
}
