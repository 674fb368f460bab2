//! Duplicate-aware ordered tree.
//!
//! An unbalanced binary search tree where each distinct key occupies exactly
//! one node and repeated insertions bump that node's duplicate count instead
//! of adding nodes. Nodes live in a [`SlotArena`] and link to each other by
//! [`SlotId`], so a node's id is a stable handle other structures can hold
//! (see [`FrequencyIndex`](crate::index::FrequencyIndex)).
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                      DuplicateTree<K, D> Layout                       │
//! │                                                                       │
//! │   root ──► id_0 { key: 5, count: 3 }                                  │
//! │              ├── left ──► id_2 { key: 2, count: 1 }                   │
//! │              └── right ─► id_1 { key: 8, count: 2 }                   │
//! │                             └── left ──► id_3 { key: 7, count: 1 }    │
//! │                                                                       │
//! │   nodes:       SlotArena<TreeNode<K, D>>  (id_0 .. id_3)              │
//! │   total_count: 7        (3 + 1 + 2 + 1)                               │
//! │   unique:      { id_2, id_3 }   (nodes whose count == 1)              │
//! └───────────────────────────────────────────────────────────────────────┘
//!
//! Multiset iteration: 2, 5, 5, 5, 7, 8, 8
//! ```
//!
//! Structural deletion of a node with two children splices in its in-order
//! successor by relinking; keys and payloads never move between slots, so
//! ids held elsewhere keep naming the same key.
//!
//! ## Operations
//!
//! | Operation          | Time      | Notes                                  |
//! |--------------------|-----------|----------------------------------------|
//! | `insert`           | O(h)      | New node or count += n                 |
//! | `insert_duplicate` | O(h)      | Existing keys only                     |
//! | `lookup` / `get`   | O(h)      | Exact match                            |
//! | `update_data`      | O(h)      | Payload only, count untouched          |
//! | `remove`           | O(h)      | count -= n, deletes node at <= 0       |
//! | `remove_node`      | O(h)      | Structural deletion, ignores count     |
//! | `find_extreme`     | O(h)      | Leftmost / rightmost node              |
//! | `iter`             | O(n + m)  | Each key repeated `count` times        |
//! | `iter_nodes_after` | O(h + k)  | Distinct nodes above a bound           |
//!
//! `h` is the tree height, `k` the number of nodes yielded. No rebalancing is performed: sorted insertion
//! order degrades `h` to `n`. [`DuplicateTree::height`] reports it.
//!
//! ## Example Usage
//!
//! ```
//! use countkit::ds::DuplicateTree;
//!
//! let mut tree = DuplicateTree::new();
//! tree.insert(5, "five", 3).unwrap();
//! tree.insert(2, "two", 1).unwrap();
//! tree.insert(8, "eight", 2).unwrap();
//!
//! assert_eq!(tree.total_count(), 6);
//! assert_eq!(tree.get(&5).map(|n| n.count()), Some(3));
//! assert!(tree.is_unique(&2));
//!
//! let keys: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(keys, vec![2, 5, 5, 5, 8, 8]);
//!
//! // Removing past zero deletes the node
//! assert_eq!(tree.remove(&8, 5).unwrap(), Some(0));
//! assert!(!tree.contains(&8));
//! assert_eq!(tree.total_count(), 4);
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. Iterators borrow the tree, so mutation while an
//! iteration is in progress does not compile.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::iter::FusedIterator;

use rustc_hash::FxHashSet;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{CopyCountError, InvariantError};

const DANGLING_LINK: &str = "tree link points at an empty slot";

/// A single key of the tree with its payload and duplicate count.
#[derive(Debug, Clone)]
pub struct TreeNode<K, D> {
    key: K,
    data: D,
    count: u64,
    left: Option<SlotId>,
    right: Option<SlotId>,
}

impl<K, D> TreeNode<K, D> {
    fn new(key: K, data: D, count: u64) -> Self {
        Self {
            key,
            data,
            count,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    /// Number of logical copies of the key. Always at least 1.
    pub fn count(&self) -> u64 {
        self.count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Result of a descent: the matching node, if any, and the link that points
/// (or would point) at it.
#[derive(Debug, Clone, Copy)]
struct Location {
    found: Option<SlotId>,
    parent: Option<(SlotId, Side)>,
}

/// Unbalanced BST keyed by `K` with per-key duplicate counts.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Ord`
/// - `D`: Payload stored once per distinct key
///
/// # Example
///
/// ```
/// use countkit::ds::DuplicateTree;
///
/// let mut tree = DuplicateTree::new();
/// tree.insert("b", 2, 1).unwrap();
/// tree.insert("a", 1, 2).unwrap();
///
/// assert_eq!(tree.min_key(), Some(&"a"));
/// assert_eq!(tree.max_key(), Some(&"b"));
/// assert_eq!(tree.unique_len(), 1); // only "b" has count 1
/// ```
#[derive(Debug, Clone)]
pub struct DuplicateTree<K, D> {
    nodes: SlotArena<TreeNode<K, D>>,
    root: Option<SlotId>,
    total_count: u64,
    unique: FxHashSet<SlotId>,
}

impl<K, D> DuplicateTree<K, D> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
            root: None,
            total_count: 0,
            unique: FxHashSet::default(),
        }
    }

    /// Creates an empty tree with room for `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            root: None,
            total_count: 0,
            unique: FxHashSet::default(),
        }
    }

    /// Sum of duplicate counts over all keys.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of distinct keys (nodes).
    pub fn distinct_len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of keys whose count is exactly 1.
    pub fn unique_len(&self) -> usize {
        self.unique.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the node behind `id`, if it is still live.
    pub fn node(&self, id: SlotId) -> Option<&TreeNode<K, D>> {
        self.nodes.get(id)
    }

    /// Keys whose count is exactly 1, in no particular order.
    pub fn unique_keys(&self) -> impl Iterator<Item = &K> {
        self.unique
            .iter()
            .filter_map(|id| self.nodes.get(*id))
            .map(|node| &node.key)
    }

    /// Replaces the payload of the node behind `id`, returning the old one.
    ///
    /// Returns `None` (dropping `new_data`) if `id` is not live.
    pub fn update_data_at(&mut self, id: SlotId, new_data: D) -> Option<D> {
        let node = self.nodes.get_mut(id)?;
        Some(std::mem::replace(&mut node.data, new_data))
    }

    /// Returns the node with the largest key when `is_max`, otherwise the
    /// smallest. `None` on an empty tree.
    pub fn find_extreme(&self, is_max: bool) -> Option<&TreeNode<K, D>> {
        let mut node = self.nodes.get(self.root?)?;
        loop {
            let next = if is_max { node.right } else { node.left };
            match next {
                Some(id) => node = self.node_at(id),
                None => return Some(node),
            }
        }
    }

    pub fn min_key(&self) -> Option<&K> {
        self.find_extreme(false).map(|node| &node.key)
    }

    pub fn max_key(&self) -> Option<&K> {
        self.find_extreme(true).map(|node| &node.key)
    }

    /// Length of the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(SlotId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.node_at(id);
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Returns an iterator over keys in ascending order, repeating each key
    /// `count` times.
    ///
    /// # Example
    ///
    /// ```
    /// use countkit::ds::DuplicateTree;
    ///
    /// let mut tree = DuplicateTree::new();
    /// tree.insert('b', (), 2).unwrap();
    /// tree.insert('a', (), 1).unwrap();
    ///
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.len(), 3);
    /// assert_eq!(iter.collect::<String>(), "abb");
    /// ```
    pub fn iter(&self) -> Iter<'_, K, D> {
        Iter::new(self)
    }

    /// Returns an iterator over distinct nodes in ascending key order.
    pub fn iter_nodes(&self) -> NodeIter<'_, K, D> {
        NodeIter::new(self)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.unique.clear();
        self.root = None;
        self.total_count = 0;
    }

    fn node_at(&self, id: SlotId) -> &TreeNode<K, D> {
        self.nodes.get(id).expect(DANGLING_LINK)
    }

    fn set_link(&mut self, parent: Option<(SlotId, Side)>, child: Option<SlotId>) {
        match parent {
            None => self.root = child,
            Some((id, side)) => {
                let node = self.nodes.get_mut(id).expect(DANGLING_LINK);
                match side {
                    Side::Left => node.left = child,
                    Side::Right => node.right = child,
                }
            },
        }
    }

    /// Unlinks the node at `id` (reachable through `parent`) and frees its slot.
    ///
    /// Subtracts the node's full count from `total_count` and drops it from
    /// the unique set.
    fn detach(&mut self, id: SlotId, parent: Option<(SlotId, Side)>) -> TreeNode<K, D> {
        let (left, right) = {
            let node = self.node_at(id);
            (node.left, node.right)
        };

        let replacement = match (left, right) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let mut successor_parent = id;
                let mut successor = right;
                while let Some(next) = self.node_at(successor).left {
                    successor_parent = successor;
                    successor = next;
                }
                if successor_parent != id {
                    let successor_right = self.node_at(successor).right;
                    self.nodes.get_mut(successor_parent).expect(DANGLING_LINK).left =
                        successor_right;
                    self.nodes.get_mut(successor).expect(DANGLING_LINK).right = Some(right);
                }
                self.nodes.get_mut(successor).expect(DANGLING_LINK).left = Some(left);
                Some(successor)
            },
        };

        self.set_link(parent, replacement);
        let node = self.nodes.remove(id).expect(DANGLING_LINK);
        self.unique.remove(&id);
        self.total_count -= node.count;
        node
    }
}

impl<K, D> DuplicateTree<K, D>
where
    K: Ord,
{
    fn locate<Q>(&self, key: &Q) -> Location
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        let mut parent = None;
        while let Some(id) = current {
            let node = self.node_at(id);
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => {
                    return Location {
                        found: Some(id),
                        parent,
                    };
                },
                Ordering::Less => {
                    parent = Some((id, Side::Left));
                    current = node.left;
                },
                Ordering::Greater => {
                    parent = Some((id, Side::Right));
                    current = node.right;
                },
            }
        }
        Location {
            found: None,
            parent,
        }
    }

    /// Adds `n_copy` copies of `key`, creating its node if needed.
    ///
    /// When the key already exists only its count changes; `data` is dropped
    /// and the stored payload is kept. Returns the id of the key's node.
    ///
    /// # Errors
    ///
    /// Returns [`CopyCountError`] if `n_copy` is zero, or if adding it would
    /// overflow the key's count or the total count. The tree is unchanged
    /// on error.
    ///
    /// # Example
    ///
    /// ```
    /// use countkit::ds::DuplicateTree;
    ///
    /// let mut tree = DuplicateTree::new();
    /// let first = tree.insert(1, "one", 1).unwrap();
    /// let again = tree.insert(1, "ignored", 2).unwrap();
    ///
    /// assert_eq!(first, again);
    /// assert_eq!(tree.node(first).map(|n| (n.count(), *n.data())), Some((3, "one")));
    /// assert!(tree.insert(2, "two", 0).is_err());
    /// ```
    pub fn insert(&mut self, key: K, data: D, n_copy: u64) -> Result<SlotId, CopyCountError> {
        CopyCountError::check("insert", n_copy)?;

        let location = self.locate(&key);
        if let Some(id) = location.found {
            self.add_copies("insert", id, n_copy)?;
            return Ok(id);
        }

        let total_count = self
            .total_count
            .checked_add(n_copy)
            .ok_or(CopyCountError::overflow("insert"))?;
        let id = self.nodes.insert(TreeNode::new(key, data, n_copy));
        self.set_link(location.parent, Some(id));
        if n_copy == 1 {
            self.unique.insert(id);
        }
        self.total_count = total_count;
        Ok(id)
    }

    /// Adds `n_copy` copies of a key that is already present.
    ///
    /// Returns `Ok(None)` without mutating anything when the key is absent,
    /// including on an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`CopyCountError`] if `n_copy` is zero or would overflow.
    pub fn insert_duplicate<Q>(
        &mut self,
        key: &Q,
        n_copy: u64,
    ) -> Result<Option<SlotId>, CopyCountError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        CopyCountError::check("insert_duplicate", n_copy)?;

        let Some(id) = self.locate(key).found else {
            return Ok(None);
        };
        self.add_copies("insert_duplicate", id, n_copy)?;
        Ok(Some(id))
    }

    fn add_copies(
        &mut self,
        operation: &'static str,
        id: SlotId,
        n_copy: u64,
    ) -> Result<(), CopyCountError> {
        let total_count = self
            .total_count
            .checked_add(n_copy)
            .ok_or(CopyCountError::overflow(operation))?;
        let node = self.nodes.get_mut(id).expect(DANGLING_LINK);
        // node counts are bounded by the total, but check both
        let count = node
            .count
            .checked_add(n_copy)
            .ok_or(CopyCountError::overflow(operation))?;

        if node.count == 1 {
            self.unique.remove(&id);
        }
        node.count = count;
        self.total_count = total_count;
        Ok(())
    }

    /// Returns the id of the node holding `key`.
    pub fn lookup<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).found
    }

    /// Returns the node holding `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&TreeNode<K, D>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lookup(key).map(|id| self.node_at(id))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lookup(key).is_some()
    }

    /// Returns `true` if `key` is present with a count of exactly 1.
    pub fn is_unique<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lookup(key)
            .map(|id| self.unique.contains(&id))
            .unwrap_or(false)
    }

    /// Replaces the payload stored for `key` without touching its count.
    ///
    /// Returns the node id, or `None` if the key is absent.
    pub fn update_data<Q>(&mut self, key: &Q, new_data: D) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.lookup(key)?;
        self.update_data_at(id, new_data)?;
        Some(id)
    }

    /// Removes `n_copy` copies of `key`.
    ///
    /// Returns the remaining count: `Some(0)` means the node was structurally
    /// deleted (a removal larger than the count only subtracts what was there
    /// from [`total_count`](Self::total_count)). Returns `None` if the key
    /// was not present.
    ///
    /// # Errors
    ///
    /// Returns [`CopyCountError`] if `n_copy` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use countkit::ds::DuplicateTree;
    ///
    /// let mut tree = DuplicateTree::new();
    /// tree.insert("k", (), 3).unwrap();
    ///
    /// assert_eq!(tree.remove("k", 2).unwrap(), Some(1));
    /// assert!(tree.is_unique("k"));
    /// assert_eq!(tree.remove("k", 4).unwrap(), Some(0));
    /// assert_eq!(tree.remove("k", 1).unwrap(), None);
    /// assert_eq!(tree.total_count(), 0);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q, n_copy: u64) -> Result<Option<u64>, CopyCountError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        CopyCountError::check("remove", n_copy)?;

        let location = self.locate(key);
        let Some(id) = location.found else {
            return Ok(None);
        };

        let node = self.nodes.get_mut(id).expect(DANGLING_LINK);
        if n_copy < node.count {
            node.count -= n_copy;
            self.total_count -= n_copy;
            if node.count == 1 {
                self.unique.insert(id);
            }
            return Ok(Some(node.count));
        }

        self.detach(id, location.parent);
        Ok(Some(0))
    }

    /// Returns an iterator over distinct nodes whose key is strictly greater
    /// than `lower`, in ascending order.
    ///
    /// The walk starts by descending toward `lower`, so reaching the first
    /// node costs O(h) rather than a scan from the minimum.
    ///
    /// # Example
    ///
    /// ```
    /// use countkit::ds::DuplicateTree;
    ///
    /// let mut tree = DuplicateTree::new();
    /// for key in [40, 20, 60, 10, 30, 50, 70] {
    ///     tree.insert(key, (), 1).unwrap();
    /// }
    /// let after: Vec<_> = tree.iter_nodes_after(&30).map(|(_, n)| *n.key()).collect();
    /// assert_eq!(after, vec![40, 50, 60, 70]);
    /// ```
    pub fn iter_nodes_after<Q>(&self, lower: &Q) -> NodeIter<'_, K, D>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut stack = Vec::new();
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node_at(id);
            if lower.cmp(node.key.borrow()) == Ordering::Less {
                stack.push(id);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        NodeIter {
            cursor: InOrderCursor { tree: self, stack },
        }
    }

    /// Structurally deletes the node holding `key`, whatever its count.
    ///
    /// Returns `true` if a node was removed.
    pub fn remove_node<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take_node(key).is_some()
    }

    /// Structurally deletes the node holding `key` and returns its key,
    /// payload, and count.
    pub fn take_node<Q>(&mut self, key: &Q) -> Option<(K, D, u64)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let location = self.locate(key);
        let id = location.found?;
        let node = self.detach(id, location.parent);
        Some((node.key, node.data, node.count))
    }

    /// Verifies BST ordering, counts, the unique set, and arena reachability.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut reachable = 0usize;
        let mut sum = 0u64;
        let mut singles = 0usize;
        let mut previous: Option<&K> = None;

        for (id, node) in self.iter_nodes() {
            reachable += 1;
            if reachable > self.nodes.len() {
                return Err(InvariantError::new(format!(
                    "walk visited more nodes than the arena holds ({}); cycle in links",
                    self.nodes.len()
                )));
            }
            if let Some(prev) = previous {
                if prev >= &node.key {
                    return Err(InvariantError::new(format!(
                        "in-order walk not strictly increasing at slot {}",
                        id.index()
                    )));
                }
            }
            previous = Some(&node.key);

            if node.count == 0 {
                return Err(InvariantError::new(format!(
                    "slot {} is linked with a zero count",
                    id.index()
                )));
            }
            sum += node.count;

            let listed = self.unique.contains(&id);
            if (node.count == 1) != listed {
                return Err(InvariantError::new(format!(
                    "slot {} has count {} but unique-set membership is {}",
                    id.index(),
                    node.count,
                    listed
                )));
            }
            if listed {
                singles += 1;
            }
        }

        if reachable != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "{} nodes reachable from root but arena holds {}",
                reachable,
                self.nodes.len()
            )));
        }
        if sum != self.total_count {
            return Err(InvariantError::new(format!(
                "cached total_count {} != sum of counts {}",
                self.total_count, sum
            )));
        }
        if singles != self.unique.len() {
            return Err(InvariantError::new(format!(
                "unique set holds {} ids but {} nodes have count 1",
                self.unique.len(),
                singles
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("{}", err);
        }
    }
}

impl<K, D> Default for DuplicateTree<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, D> IntoIterator for &'a DuplicateTree<K, D> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Stack of left-spine ancestors for an in-order walk.
#[derive(Debug, Clone)]
struct InOrderCursor<'a, K, D> {
    tree: &'a DuplicateTree<K, D>,
    stack: Vec<SlotId>,
}

impl<'a, K, D> InOrderCursor<'a, K, D> {
    fn new(tree: &'a DuplicateTree<K, D>) -> Self {
        let mut cursor = Self {
            tree,
            stack: Vec::new(),
        };
        cursor.push_left_spine(tree.root);
        cursor
    }

    fn push_left_spine(&mut self, mut current: Option<SlotId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.node_at(id).left;
        }
    }

    fn advance(&mut self) -> Option<(SlotId, &'a TreeNode<K, D>)> {
        let id = self.stack.pop()?;
        let node = self.tree.nodes.get(id)?;
        self.push_left_spine(node.right);
        Some((id, node))
    }
}

/// Ascending multiset iterator over a [`DuplicateTree`].
///
/// Created by [`DuplicateTree::iter`]. Emits each key `count` times
/// consecutively before moving to the next larger key.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, D> {
    cursor: InOrderCursor<'a, K, D>,
    pending: Option<(&'a K, u64)>,
    remaining: u64,
}

impl<'a, K, D> Iter<'a, K, D> {
    fn new(tree: &'a DuplicateTree<K, D>) -> Self {
        Self {
            cursor: InOrderCursor::new(tree),
            pending: None,
            remaining: tree.total_count,
        }
    }
}

impl<'a, K, D> Iterator for Iter<'a, K, D> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((key, repeats)) = self.pending {
            if repeats > 0 {
                self.pending = Some((key, repeats - 1));
                self.remaining -= 1;
                return Some(key);
            }
            self.pending = None;
        }

        let (_, node) = self.cursor.advance()?;
        self.pending = Some((&node.key, node.count - 1));
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl<K, D> ExactSizeIterator for Iter<'_, K, D> {}

impl<K, D> FusedIterator for Iter<'_, K, D> {}

/// Ascending iterator over distinct nodes of a [`DuplicateTree`].
///
/// Created by [`DuplicateTree::iter_nodes`].
#[derive(Debug, Clone)]
pub struct NodeIter<'a, K, D> {
    cursor: InOrderCursor<'a, K, D>,
}

impl<'a, K, D> NodeIter<'a, K, D> {
    fn new(tree: &'a DuplicateTree<K, D>) -> Self {
        Self {
            cursor: InOrderCursor::new(tree),
        }
    }
}

impl<'a, K, D> Iterator for NodeIter<'a, K, D> {
    type Item = (SlotId, &'a TreeNode<K, D>);

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.advance()
    }
}

impl<K, D> FusedIterator for NodeIter<'_, K, D> {}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn model_keys(model: &BTreeMap<u8, u64>) -> Vec<u8> {
        model
            .iter()
            .flat_map(|(&key, &count)| std::iter::repeat(key).take(count as usize))
            .collect()
    }

    proptest! {
        /// Property: the tree agrees with a counting model after any sequence
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_btreemap_model(
            ops in prop::collection::vec((0u8..4, any::<u8>(), 1u64..5), 0..200)
        ) {
            let mut tree: DuplicateTree<u8, u8> = DuplicateTree::new();
            let mut model: BTreeMap<u8, u64> = BTreeMap::new();

            for (op, key, n) in ops {
                match op {
                    0 => {
                        tree.insert(key, key, n).unwrap();
                        *model.entry(key).or_insert(0) += n;
                    }
                    1 => {
                        let remaining = tree.remove(&key, n).unwrap();
                        match model.get_mut(&key) {
                            Some(count) if *count > n => {
                                *count -= n;
                                prop_assert_eq!(remaining, Some(*count));
                            }
                            Some(_) => {
                                model.remove(&key);
                                prop_assert_eq!(remaining, Some(0));
                            }
                            None => {
                                prop_assert_eq!(remaining, None);
                            }
                        }
                    }
                    2 => {
                        let removed = tree.remove_node(&key);
                        prop_assert_eq!(removed, model.remove(&key).is_some());
                    }
                    3 => {
                        let found = tree.insert_duplicate(&key, n).unwrap();
                        if let Some(count) = model.get_mut(&key) {
                            *count += n;
                            prop_assert!(found.is_some());
                        } else {
                            prop_assert!(found.is_none());
                        }
                    }
                    _ => unreachable!(),
                }

                tree.debug_validate_invariants();
            }

            let keys: Vec<u8> = tree.iter().copied().collect();
            prop_assert_eq!(keys, model_keys(&model));
            prop_assert_eq!(tree.total_count(), model.values().sum::<u64>());
            prop_assert_eq!(tree.distinct_len(), model.len());
            prop_assert_eq!(
                tree.unique_len(),
                model.values().filter(|&&count| count == 1).count()
            );
            prop_assert_eq!(tree.min_key(), model.keys().next());
            prop_assert_eq!(tree.max_key(), model.keys().next_back());
        }

        /// Property: node ids survive unrelated structural deletions
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_ids_stable_across_deletions(
            keys in prop::collection::btree_set(any::<u16>(), 1..64),
            victims in prop::collection::vec(any::<u16>(), 0..32)
        ) {
            let mut tree: DuplicateTree<u16, ()> = DuplicateTree::new();
            let mut ids = BTreeMap::new();
            for &key in &keys {
                ids.insert(key, tree.insert(key, (), 1).unwrap());
            }
            for victim in victims {
                tree.remove_node(&victim);
                ids.remove(&victim);
            }
            for (key, id) in ids {
                prop_assert_eq!(tree.lookup(&key), Some(id));
                prop_assert_eq!(tree.node(id).map(|n| *n.key()), Some(key));
            }
            tree.debug_validate_invariants();
        }
    }
}
