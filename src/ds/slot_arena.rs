//! Index-addressed node storage for the linked structures in this module.
//!
//! Nodes live in one `Vec` and refer to each other by [`SlotId`]. Vacated
//! slots form a free chain threaded through the vector itself, so a cache
//! that evicts one entry per insert reuses the same slot instead of growing.
//!
//! ```text
//!   slots:  [ Occupied(a) | Vacant(→3) | Occupied(c) | Vacant(end) ]
//!   free_head ─► 1 ─► 3 ─► end
//! ```

/// Handle to a node stored in a [`SlotArena`].
///
/// Ids are reused after removal; holders must drop an id once its node is
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            occupied: 0,
        }
    }

    /// Stores `value`, reusing the most recently vacated slot if any.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.occupied += 1;
        match self.free_head {
            Some(index) => {
                if let Slot::Vacant { next_free } = self.slots[index] {
                    self.free_head = next_free;
                }
                self.slots[index] = Slot::Occupied(value);
                SlotId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(value));
                SlotId(self.slots.len() - 1)
            }
        }
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacated = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.0);
        self.occupied -= 1;
        match vacated {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Drops every node; all issued ids become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.occupied = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacated_slot_is_reused() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        assert_eq!(arena.remove(a), Some('a'));
        assert_eq!(arena.get(a), None);

        let c = arena.insert('c');
        assert_eq!(c.index(), a.index());
        assert_eq!(arena.get(b), Some(&'b'));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn free_chain_is_lifo() {
        let mut arena = SlotArena::with_capacity(4);
        let ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        arena.remove(ids[1]);
        arena.remove(ids[3]);

        assert_eq!(arena.insert(10).index(), 3);
        assert_eq!(arena.insert(11).index(), 1);
        assert_eq!(arena.insert(12).index(), 4);
    }

    #[test]
    fn removing_twice_is_harmless() {
        let mut arena = SlotArena::new();
        let id = arena.insert(1u8);
        assert_eq!(arena.remove(id), Some(1));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
        assert_eq!(arena.remove(SlotId(99)), None);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(vec![1]);
        if let Some(v) = arena.get_mut(id) {
            v.push(2);
        }
        assert_eq!(arena.get(id), Some(&vec![1, 2]));
    }

    #[test]
    fn clear_restarts_indexing() {
        let mut arena = SlotArena::new();
        arena.insert(1);
        let id = arena.insert(2);
        arena.remove(id);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.insert(3).index(), 0);
    }
}
