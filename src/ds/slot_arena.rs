//! Slab storage with stable handles.
//!
//! [`SlotArena`] owns values in a `Vec<Option<T>>` and hands out [`SlotId`]
//! handles. A handle stays valid until its slot is removed; freed slots are
//! recycled through a free list, so a removed id may later name a different
//! value. Structures that share nodes through ids (the tree and the hash index
//! of [`FrequencyIndex`](crate::index::FrequencyIndex)) must drop every copy
//! of an id in the same operation that removes its slot.
//!
//! ```text
//!   slots:     [ Some(a) | None | Some(c) | Some(d) ]
//!                  id_0    id_1    id_2      id_3
//!   free_list: [ 1 ]            next insert reuses id_1
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use countkit::ds::SlotArena;
//!
//! let mut arena = SlotArena::new();
//! let a = arena.insert("a");
//! let b = arena.insert("b");
//! assert_eq!(arena.get(a), Some(&"a"));
//!
//! arena.remove(a);
//! let c = arena.insert("c");
//! assert_eq!(c.index(), a.index()); // slot reused
//! assert_eq!(arena.get(b), Some(&"b"));
//! ```

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vector-backed slab with free-list reuse.
#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a freed slot if any.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(value);
            idx
        } else {
            self.slots.push(Some(value));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Removes and returns the value at `id`; `None` if the slot is empty.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let value = slot.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops every value; handles issued before the call are invalidated.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    /// Like [`clear`](Self::clear), and also releases the backing allocation.
    pub fn clear_shrink(&mut self) {
        self.clear();
        self.slots.shrink_to_fit();
        self.free_list.shrink_to_fit();
    }

    /// Iterates occupied slots in slot-index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
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
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(id1));

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
    }

    #[test]
    fn slot_arena_double_remove_is_none() {
        let mut arena = SlotArena::new();
        let id = arena.insert(7u32);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn slot_arena_get_mut_writes_through() {
        let mut arena = SlotArena::new();
        let id = arena.insert(10);
        if let Some(value) = arena.get_mut(id) {
            *value = 20;
        }
        assert_eq!(arena.get(id), Some(&20));
    }

    #[test]
    fn slot_arena_iter_skips_holes() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);

        let seen: Vec<_> = arena.iter().collect();
        assert_eq!(seen, vec![(a, &'a'), (c, &'c')]);
    }

    #[test]
    fn slot_arena_clear_shrink_resets() {
        let mut arena = SlotArena::with_capacity(16);
        for i in 0..8 {
            arena.insert(i);
        }
        arena.clear_shrink();
        assert!(arena.is_empty());
        assert_eq!(arena.iter().count(), 0);
        let id = arena.insert(99);
        assert_eq!(id.index(), 0);
    }
}
