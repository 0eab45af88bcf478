//! House entity.

use crate::record::{fit_name, HouseRecord};
use crate::types::{HouseId, PathId};
use crate::working_set::Slotted;

/// A delivery location.
///
/// A house created with [`House::new`] has no identifier until it is stored;
/// the store assigns one exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    id: Option<HouseId>,
    name: String,
    x: i32,
    y: i32,
    outgoing: Vec<PathId>,
}

impl House {
    /// Creates an unstored house.
    ///
    /// Names longer than the record field are truncated, and trailing spaces
    /// are dropped since the file cannot keep them.
    #[must_use]
    pub fn new(name: &str, x: i32, y: i32) -> Self {
        Self {
            id: None,
            name: stored_name(name),
            x,
            y,
            outgoing: Vec::new(),
        }
    }

    pub(crate) fn from_record(id: HouseId, record: HouseRecord) -> Self {
        Self {
            id: Some(id),
            name: record.name,
            x: record.x,
            y: record.y,
            outgoing: Vec::new(),
        }
    }

    pub(crate) fn to_record(&self) -> HouseRecord {
        HouseRecord::live(&self.name, self.x, self.y)
    }

    /// The identifier, once stored.
    #[must_use]
    pub const fn id(&self) -> Option<HouseId> {
        self.id
    }

    /// Assigns the identifier. A second call is ignored.
    pub fn set_id(&mut self, id: HouseId) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position as `(x, y)`.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Replaces the name.
    pub fn set_name(&mut self, name: &str) {
        self.name = stored_name(name);
    }

    /// Replaces the position.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Paths leaving this house, in the order they were attached.
    #[must_use]
    pub fn outgoing(&self) -> &[PathId] {
        &self.outgoing
    }

    pub(crate) fn attach(&mut self, path: PathId) {
        if !self.outgoing.contains(&path) {
            self.outgoing.push(path);
        }
    }

    pub(crate) fn detach(&mut self, path: PathId) {
        self.outgoing.retain(|&p| p != path);
    }
}

fn stored_name(name: &str) -> String {
    fit_name(name).trim_end().to_string()
}

impl Slotted for House {
    fn slot(&self) -> Option<u32> {
        self.id.map(HouseId::as_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_set_once() {
        let mut house = House::new("Mill Lane 4", 10, 20);
        assert_eq!(house.id(), None);

        house.set_id(HouseId::new(3));
        house.set_id(HouseId::new(9));
        assert_eq!(house.id(), Some(HouseId::new(3)));
        assert_eq!(house.slot(), Some(3));
    }

    #[test]
    fn name_is_truncated() {
        let mut house = House::new("x".repeat(40).as_str(), 0, 0);
        assert_eq!(house.name().len(), 24);

        house.set_name("Short   ");
        assert_eq!(house.name(), "Short");

        house.set_name(&format!("{}  tail", "y".repeat(23)));
        assert_eq!(house.name(), "y".repeat(23));
    }

    #[test]
    fn attach_ignores_duplicates() {
        let mut house = House::new("a", 0, 0);
        house.attach(PathId::new(1));
        house.attach(PathId::new(2));
        house.attach(PathId::new(1));
        assert_eq!(house.outgoing(), &[PathId::new(1), PathId::new(2)]);

        house.detach(PathId::new(1));
        assert_eq!(house.outgoing(), &[PathId::new(2)]);
    }
}
