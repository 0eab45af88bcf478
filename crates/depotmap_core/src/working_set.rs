//! In-memory working set of loaded entities.
//!
//! Entities live in a slot-indexed arena so lookup by identifier is O(1),
//! while a separate order list preserves insertion order for traversal.

/// An entity that occupies a record slot once persisted.
pub trait Slotted {
    /// The assigned slot, or `None` before the entity has been stored.
    fn slot(&self) -> Option<u32>;
}

/// Entities loaded from one record file.
#[derive(Debug, Clone)]
pub struct WorkingSet<T> {
    slots: Vec<Option<T>>,
    order: Vec<u32>,
}

impl<T> Default for WorkingSet<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Slotted> WorkingSet<T> {
    /// Creates an empty working set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entity at the end of the traversal order.
    ///
    /// Returns false if the entity has no slot yet or its slot is taken.
    pub fn add(&mut self, item: T) -> bool {
        let Some(slot) = item.slot() else {
            return false;
        };
        let index = slot as usize;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        if self.slots[index].is_some() {
            return false;
        }
        self.slots[index] = Some(item);
        self.order.push(slot);
        true
    }

    /// Removes the entity in `slot`.
    pub fn remove(&mut self, slot: u32) -> Option<T> {
        let item = self.slots.get_mut(slot as usize)?.take()?;
        if let Some(pos) = self.order.iter().position(|&s| s == slot) {
            self.order.remove(pos);
        }
        Some(item)
    }

    /// Returns the entity in `slot`.
    #[must_use]
    pub fn get(&self, slot: u32) -> Option<&T> {
        self.slots.get(slot as usize)?.as_ref()
    }

    /// Returns the entity in `slot` mutably.
    pub fn get_mut(&mut self, slot: u32) -> Option<&mut T> {
        self.slots.get_mut(slot as usize)?.as_mut()
    }

    /// Returns true if `slot` holds an entity.
    #[must_use]
    pub fn contains(&self, slot: u32) -> bool {
        self.get(slot).is_some()
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if there are no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Length of the arena, including empty slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order
            .iter()
            .filter_map(move |&slot| self.slots[slot as usize].as_ref())
    }

    /// Returns a cursor positioned at the first entity.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut { set: self, pos: 0 }
    }
}

/// A restartable forward cursor that may remove the current entity.
pub struct CursorMut<'a, T> {
    set: &'a mut WorkingSet<T>,
    pos: usize,
}

impl<T: Slotted> CursorMut<'_, T> {
    /// The entity under the cursor, or `None` past the end.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        let slot = *self.set.order.get(self.pos)?;
        self.set.get(slot)
    }

    /// The entity under the cursor, mutably.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let slot = *self.set.order.get(self.pos)?;
        self.set.get_mut(slot)
    }

    /// Advances to the next entity.
    pub fn move_next(&mut self) {
        if self.pos < self.set.order.len() {
            self.pos += 1;
        }
    }

    /// Removes the entity under the cursor; the following entity becomes current.
    pub fn remove_current(&mut self) -> Option<T> {
        let slot = *self.set.order.get(self.pos)?;
        self.set.order.remove(self.pos);
        self.set.slots.get_mut(slot as usize)?.take()
    }

    /// Moves back to the first entity.
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(Option<u32>);

    impl Slotted for Item {
        fn slot(&self) -> Option<u32> {
            self.0
        }
    }

    fn slots(set: &WorkingSet<Item>) -> Vec<u32> {
        set.iter().filter_map(|i| i.0).collect()
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut set = WorkingSet::new();
        assert!(set.add(Item(Some(3))));
        assert!(set.add(Item(Some(0))));
        assert!(set.add(Item(Some(7))));

        assert_eq!(slots(&set), vec![3, 0, 7]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.capacity(), 8);
    }

    #[test]
    fn add_rejects_unassigned_and_taken() {
        let mut set = WorkingSet::new();
        assert!(!set.add(Item(None)));
        assert!(set.add(Item(Some(1))));
        assert!(!set.add(Item(Some(1))));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_by_slot() {
        let mut set = WorkingSet::new();
        set.add(Item(Some(0)));
        set.add(Item(Some(1)));

        assert_eq!(set.remove(0), Some(Item(Some(0))));
        assert_eq!(set.remove(0), None);
        assert_eq!(set.remove(42), None);
        assert!(!set.contains(0));
        assert_eq!(slots(&set), vec![1]);
    }

    #[test]
    fn removed_slot_can_be_refilled() {
        let mut set = WorkingSet::new();
        set.add(Item(Some(0)));
        set.add(Item(Some(1)));
        set.remove(0);
        assert!(set.add(Item(Some(0))));
        assert_eq!(slots(&set), vec![1, 0]);
    }

    #[test]
    fn cursor_removes_mid_traversal() {
        let mut set = WorkingSet::new();
        for s in 0..5 {
            set.add(Item(Some(s)));
        }

        let mut cursor = set.cursor_mut();
        while let Some(item) = cursor.current() {
            if item.0.is_some_and(|s| s % 2 == 1) {
                cursor.remove_current();
            } else {
                cursor.move_next();
            }
        }

        assert_eq!(slots(&set), vec![0, 2, 4]);
    }

    #[test]
    fn cursor_reset_restarts() {
        let mut set = WorkingSet::new();
        set.add(Item(Some(4)));
        set.add(Item(Some(5)));

        let mut cursor = set.cursor_mut();
        cursor.move_next();
        cursor.move_next();
        cursor.move_next();
        assert!(cursor.current().is_none());

        cursor.reset();
        assert_eq!(cursor.current(), Some(&Item(Some(4))));
        cursor.current_mut().unwrap().0 = Some(4);
        assert!(cursor.remove_current().is_some());
        assert_eq!(cursor.current(), Some(&Item(Some(5))));
    }
}
