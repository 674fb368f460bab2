//! Ordered multiset with constant-time count lookups.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                    FrequencyIndex<K, D, S> Layout                    │
//! │                                                                      │
//! │   table: ChainedHashTable<K, SlotId, S>                              │
//! │     "b" ──► id_1 ─────────────┐                                      │
//! │     "a" ──► id_0 ──────────┐  │                                      │
//! │                            ▼  ▼                                      │
//! │   tree: DuplicateTree<K, D>                                          │
//! │     id_0 { key: "a", data, count: 1 }                                │
//! │     id_1 { key: "b", data, count: 4 }                                │
//! │                                                                      │
//! │   table ids name the same arena slots the tree links through         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tree owns every key's payload and count and answers ordered queries
//! (min/max, sorted listing, range scans). The table maps each distinct key
//! to the [`SlotId`] of its tree node, so point queries (`lookup`,
//! `get_data`, `update`) skip the tree walk. A payload written through the
//! table path is the payload the tree holds; there is one copy.
//!
//! Every operation that structurally deletes a node deletes its table entry
//! in the same call, so the two views always hold the same distinct keys.
//!
//! ## Operations
//!
//! | Operation                   | Time         | Notes                      |
//! |-----------------------------|--------------|----------------------------|
//! | `insert`                    | O(h + chain) | Keeps existing payload     |
//! | `lookup` / `get_data`       | O(chain)     | Table path                 |
//! | `update`                    | O(chain)     | Payload only               |
//! | `remove`                    | O(h + chain) | Drops entry at count 0     |
//! | `remove_all`                | O(h + chain) | Ignores count              |
//! | `get_all_keys`              | O(n + m)     | Ascending order            |
//! | `get_unique_keys_in_range`  | O(h + k)     | Exclusive bounds           |
//! | `get_min_key`/`get_max_key` | O(h)         |                            |
//!
//! `h` is the tree height, `n` the number of distinct keys, `m` the total
//! count, `k` the number of distinct keys inside the range.
//!
//! ## Example Usage
//!
//! ```
//! use countkit::index::FrequencyIndex;
//!
//! let mut index = FrequencyIndex::new(16);
//! index.insert(5, "five", 3).unwrap();
//! index.insert(2, "two", 1).unwrap();
//!
//! assert_eq!(index.lookup(&5), 3);
//! assert_eq!(index.size(), 4);
//! assert_eq!(index.get_all_keys(true), vec![2, 5, 5, 5]);
//! assert_eq!(index.get_all_keys(false), vec![2]);
//!
//! index.remove(&5, 3).unwrap();
//! assert_eq!(index.lookup(&5), 0);
//! assert_eq!(index.get_min_key(), Some(&2));
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. Share across threads behind an external lock such as
//! `parking_lot::Mutex<FrequencyIndex<_, _>>`.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::ds::chained_table::ChainedHashTable;
use crate::ds::dup_tree::{DuplicateTree, Iter, TreeNode};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, CopyCountError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::IndexMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::IndexMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    IndexMetricsReadRecorder, IndexMetricsRecorder, MetricsSnapshotProvider,
};

/// Multiset of ordered keys with per-key payloads and duplicate counts.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Ord + Hash + Clone` (one clone lives in the
///   table, the owned key in the tree)
/// - `D`: Payload type
/// - `S`: Hasher builder for the table, defaults to [`FxBuildHasher`]
pub struct FrequencyIndex<K, D, S = FxBuildHasher> {
    tree: DuplicateTree<K, D>,
    table: ChainedHashTable<K, SlotId, S>,
    #[cfg(feature = "metrics")]
    metrics: IndexMetrics,
}

// Manual impl so `S` needs no `Debug` bound (`FxBuildHasher` does not
// implement `Debug`).
impl<K: std::fmt::Debug, D: std::fmt::Debug, S> std::fmt::Debug for FrequencyIndex<K, D, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("FrequencyIndex");
        d.field("tree", &self.tree).field("table", &self.table);
        #[cfg(feature = "metrics")]
        d.field("metrics", &self.metrics);
        d.finish()
    }
}

impl<K, D> FrequencyIndex<K, D, FxBuildHasher> {
    /// Creates an empty index whose table starts with `capacity` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below
    /// [`MIN_CAPACITY`](crate::ds::chained_table::MIN_CAPACITY).
    pub fn new(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }

    /// Creates an empty index, returning an error on an invalid capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is below
    /// [`MIN_CAPACITY`](crate::ds::chained_table::MIN_CAPACITY).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<K, D, S> FrequencyIndex<K, D, S> {
    /// Creates an empty index with a custom table hasher.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below
    /// [`MIN_CAPACITY`](crate::ds::chained_table::MIN_CAPACITY).
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        match Self::try_with_capacity_and_hasher(capacity, hasher) {
            Ok(index) => index,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, ConfigError> {
        let table = ChainedHashTable::try_with_capacity_and_hasher(capacity, hasher)?;
        Ok(Self {
            tree: DuplicateTree::with_capacity(capacity),
            table,
            #[cfg(feature = "metrics")]
            metrics: IndexMetrics::default(),
        })
    }

    /// Total number of copies over all keys.
    pub fn size(&self) -> u64 {
        self.tree.total_count()
    }

    /// Number of keys whose count is exactly 1.
    pub fn n_unique_keys(&self) -> usize {
        self.tree.unique_len()
    }

    /// Number of distinct keys.
    pub fn distinct_len(&self) -> usize {
        self.tree.distinct_len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Bucket count of the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Height of the backing tree.
    pub fn tree_height(&self) -> usize {
        self.tree.height()
    }

    pub fn get_min_key(&self) -> Option<&K> {
        self.tree.min_key()
    }

    pub fn get_max_key(&self) -> Option<&K> {
        self.tree.max_key()
    }

    /// Iterates keys in ascending order, each repeated `count` times.
    pub fn iter(&self) -> Iter<'_, K, D> {
        self.tree.iter()
    }

    /// Iterates `(key, payload, count)` for each distinct key in ascending
    /// order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &D, u64)> {
        self.tree
            .iter_nodes()
            .map(|(_, node)| (node.key(), node.data(), node.count()))
    }

    /// Removes every key; the table keeps its current bucket count.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.table.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }
}

impl<K, D, S> FrequencyIndex<K, D, S>
where
    K: Ord + Hash + Clone,
    S: BuildHasher,
{
    fn node_of<Q>(&self, key: &Q) -> Option<&TreeNode<K, D>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.table.lookup(key)?;
        self.tree.node(id)
    }

    /// Adds `n_copy` copies of `key`.
    ///
    /// A new key is stored with `data`. For a key already present only the
    /// count grows and `data` is dropped. Returns `Ok(true)` if the key was
    /// newly indexed.
    ///
    /// # Errors
    ///
    /// Returns [`CopyCountError`] if `n_copy` is zero, or if adding it would
    /// overflow the key's count or [`size`](Self::size). Nothing changes on
    /// error.
    ///
    /// # Example
    ///
    /// ```
    /// use countkit::index::FrequencyIndex;
    ///
    /// let mut index = FrequencyIndex::new(10);
    /// assert!(index.insert("k", 1, 2).unwrap());
    /// assert!(!index.insert("k", 99, 1).unwrap());
    ///
    /// assert_eq!(index.lookup("k"), 3);
    /// assert_eq!(index.get_data("k"), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, data: D, n_copy: u64) -> Result<bool, CopyCountError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        CopyCountError::check("insert", n_copy)?;

        if self.table.contains(&key) {
            // existing node: only its count changes, key and data drop here
            self.tree.insert(key, data, n_copy)?;
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_existing_key();
            return Ok(false);
        }

        let id = self.tree.insert(key.clone(), data, n_copy)?;
        let indexed = self.table.insert(key, id);
        debug_assert!(indexed, "key absent from table but present in tree");

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new_key();
        Ok(true)
    }

    /// Returns the count of `key`, or 0 if it is absent.
    pub fn lookup<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let count = self.node_of(key).map(TreeNode::count).unwrap_or(0);

        #[cfg(feature = "metrics")]
        {
            (&self.metrics).record_lookup_call();
            if count > 0 {
                (&self.metrics).record_lookup_hit();
            }
        }

        count
    }

    /// Returns the payload stored for `key`.
    pub fn get_data<Q>(&self, key: &Q) -> Option<&D>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let data = self.node_of(key).map(TreeNode::data);

        #[cfg(feature = "metrics")]
        {
            (&self.metrics).record_lookup_call();
            if data.is_some() {
                (&self.metrics).record_lookup_hit();
            }
        }

        data
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains(key)
    }

    /// Removes `n_copy` copies of `key`.
    ///
    /// When the count drops to zero or below, the key leaves both the tree
    /// and the table. Returns `Ok(false)` if the key was absent.
    ///
    /// # Errors
    ///
    /// Returns [`CopyCountError`] if `n_copy` is zero.
    pub fn remove<Q>(&mut self, key: &Q, n_copy: u64) -> Result<bool, CopyCountError>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let remaining = match self.tree.remove(key, n_copy)? {
            Some(remaining) => remaining,
            None => return Ok(false),
        };
        if remaining == 0 {
            let deleted = self.table.delete(key);
            debug_assert!(deleted, "key deleted from tree but absent from table");
            #[cfg(feature = "metrics")]
            self.metrics.record_remove_deleted_node();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Ok(true)
    }

    /// Removes `key` entirely, whatever its count.
    ///
    /// Both the table entry and the tree node are deleted; returns `true`
    /// only if both were present.
    pub fn remove_all<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_all_call();

        let from_table = self.table.delete(key);
        let from_tree = self.tree.remove_node(key);
        let removed = from_table && from_tree;

        #[cfg(feature = "metrics")]
        if removed {
            self.metrics.record_remove_all_found();
        }
        removed
    }

    /// Replaces the payload of `key`, leaving its count unchanged.
    ///
    /// Returns `false` (dropping `new_data`) if the key is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use countkit::index::FrequencyIndex;
    ///
    /// let mut index = FrequencyIndex::new(10);
    /// index.insert(7, "old", 2).unwrap();
    ///
    /// assert!(index.update(&7, "new"));
    /// assert!(!index.update(&8, "missing"));
    /// assert_eq!(index.get_data(&7), Some(&"new"));
    /// assert_eq!(index.lookup(&7), 2);
    /// ```
    pub fn update<Q>(&mut self, key: &Q, new_data: D) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_update_call();

        let Some(&id) = self.table.lookup(key) else {
            return false;
        };
        let updated = self.tree.update_data_at(id, new_data).is_some();

        #[cfg(feature = "metrics")]
        if updated {
            self.metrics.record_update_found();
        }
        updated
    }

    /// Lists keys in ascending order.
    ///
    /// With `allow_duplicates` each key appears `count` times; without it
    /// only keys whose count is exactly 1 are listed.
    pub fn get_all_keys(&self, allow_duplicates: bool) -> Vec<K> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_key_listing_call();

        if allow_duplicates {
            self.tree.iter().cloned().collect()
        } else {
            self.tree
                .iter_nodes()
                .filter(|(_, node)| node.count() == 1)
                .map(|(_, node)| node.key().clone())
                .collect()
        }
    }

    /// Lists keys with count exactly 1 strictly between `lower` and `upper`,
    /// in ascending order.
    ///
    /// # Example
    ///
    /// ```
    /// use countkit::index::FrequencyIndex;
    ///
    /// let mut index = FrequencyIndex::new(10);
    /// for (key, count) in [(1, 1), (2, 2), (3, 1), (4, 1), (5, 3)] {
    ///     index.insert(key, (), count).unwrap();
    /// }
    /// assert_eq!(index.get_unique_keys_in_range(&1, &5), vec![3, 4]);
    /// ```
    pub fn get_unique_keys_in_range<Q>(&self, lower: &Q, upper: &Q) -> Vec<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_range_query_call();

        self.tree
            .iter_nodes_after(lower)
            .map(|(_, node)| node)
            .take_while(|node| Borrow::<Q>::borrow(node.key()) < upper)
            .filter(|node| node.count() == 1)
            .map(|node| node.key().clone())
            .collect()
    }

    /// Verifies tree and table invariants and that both hold the same keys,
    /// each table id naming the tree node for that key.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.tree.check_invariants()?;
        self.table.check_invariants()?;

        if self.table.len() != self.tree.distinct_len() {
            return Err(InvariantError::new(format!(
                "table holds {} keys but tree holds {}",
                self.table.len(),
                self.tree.distinct_len()
            )));
        }
        for (key, &id) in self.table.iter() {
            let Some(node) = self.tree.node(id) else {
                return Err(InvariantError::new(format!(
                    "table entry points at free slot {}",
                    id.index()
                )));
            };
            if node.key() != key {
                return Err(InvariantError::new(format!(
                    "table entry for slot {} names a different key",
                    id.index()
                )));
            }
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

impl<'a, K, D, S> IntoIterator for &'a FrequencyIndex<K, D, S> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

#[cfg(feature = "metrics")]
impl<K, D, S> FrequencyIndex<K, D, S> {
    pub fn metrics_snapshot(&self) -> IndexMetricsSnapshot {
        IndexMetricsSnapshot {
            insert_calls: self.metrics.insert_calls,
            insert_new_keys: self.metrics.insert_new_keys,
            insert_existing_keys: self.metrics.insert_existing_keys,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            remove_deleted_nodes: self.metrics.remove_deleted_nodes,
            remove_all_calls: self.metrics.remove_all_calls,
            remove_all_found: self.metrics.remove_all_found,
            update_calls: self.metrics.update_calls,
            update_found: self.metrics.update_found,
            clear_calls: self.metrics.clear_calls,
            lookup_calls: self.metrics.lookup_calls.get(),
            lookup_hits: self.metrics.lookup_hits.get(),
            key_listing_calls: self.metrics.key_listing_calls.get(),
            range_query_calls: self.metrics.range_query_calls.get(),
            total_count: self.tree.total_count(),
            distinct_keys: self.tree.distinct_len(),
            unique_keys: self.tree.unique_len(),
            tree_height: self.tree.height(),
            table: self.table.metrics_snapshot(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, D, S> MetricsSnapshotProvider<IndexMetricsSnapshot> for FrequencyIndex<K, D, S> {
    fn snapshot(&self) -> IndexMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CopyCountErrorKind;

    fn scenario_five() -> FrequencyIndex<u32, ()> {
        let mut index = FrequencyIndex::new(10);
        let counts = [1, 2, 1, 1, 3, 1, 1, 1, 1, 1];
        for (key, count) in (1..=10).zip(counts) {
            index.insert(key, (), count).unwrap();
        }
        index
    }

    #[test]
    fn frequency_index_insert_then_lookup() {
        let mut index = FrequencyIndex::new(10);
        assert!(index.insert(5, "a", 3).unwrap());
        assert_eq!(index.lookup(&5), 3);
        assert_eq!(index.size(), 3);
        assert_eq!(index.get_data(&5), Some(&"a"));
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_partial_remove_keeps_key() {
        let mut index = FrequencyIndex::new(10);
        index.insert(5, "a", 3).unwrap();
        assert!(index.remove(&5, 2).unwrap());

        assert_eq!(index.lookup(&5), 1);
        assert_eq!(index.n_unique_keys(), 1);
        assert_eq!(index.get_all_keys(false), vec![5]);
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_full_remove_drops_tree_and_table_entry() {
        let mut index = FrequencyIndex::new(10);
        index.insert(5, "a", 3).unwrap();
        index.remove(&5, 2).unwrap();
        assert!(index.remove(&5, 1).unwrap());

        assert_eq!(index.lookup(&5), 0);
        assert!(!index.contains(&5));
        assert!(index.get_data(&5).is_none());
        assert!(index.is_empty());
        assert_eq!(index.size(), 0);
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_overshooting_remove_clamps_total() {
        let mut index = FrequencyIndex::new(10);
        index.insert('x', (), 2).unwrap();
        index.insert('y', (), 1).unwrap();
        assert!(index.remove(&'x', 10).unwrap());
        assert_eq!(index.size(), 1);
        assert!(!index.remove(&'x', 1).unwrap());
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_zero_copies_rejected_without_mutation() {
        let mut index = FrequencyIndex::new(10);
        index.insert(1, (), 1).unwrap();

        let err = index.insert(1, (), 0).unwrap_err();
        assert_eq!(err.operation(), "insert");
        let err = index.remove(&1, 0).unwrap_err();
        assert_eq!(err.operation(), "remove");

        assert_eq!(index.lookup(&1), 1);
        assert_eq!(index.size(), 1);
    }

    #[test]
    fn frequency_index_count_overflow_rejected_without_mutation() {
        let mut index = FrequencyIndex::new(10);
        index.insert(1, "max", u64::MAX).unwrap();

        let err = index.insert(1, "more", 1).unwrap_err();
        assert_eq!(err.kind(), CopyCountErrorKind::Overflow);
        assert_eq!(err.operation(), "insert");

        let err = index.insert(2, "new", 1).unwrap_err();
        assert_eq!(err.kind(), CopyCountErrorKind::Overflow);
        assert!(!index.contains(&2));

        assert_eq!(index.lookup(&1), u64::MAX);
        assert_eq!(index.size(), u64::MAX);
        assert_eq!(index.get_data(&1), Some(&"max"));
        assert_eq!(index.distinct_len(), 1);
        index.debug_validate_invariants();

        // room frees up once copies are removed
        index.remove(&1, 1).unwrap();
        assert!(index.insert(2, "new", 1).unwrap());
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_deleting_nodes_keeps_views_in_step() {
        let mut index = FrequencyIndex::new(10);
        for key in [50, 30, 70, 20, 40, 60, 80, 35, 65] {
            index.insert(key, (), 2).unwrap();
        }
        // leaf, one child, two children, and the root
        for key in [20, 40, 70, 50] {
            assert!(index.remove(&key, 1).unwrap());
            assert!(index.contains(&key));
            assert!(index.remove(&key, 1).unwrap());
            assert!(!index.contains(&key));
            index.debug_validate_invariants();
        }
        assert_eq!(index.get_all_keys(true), vec![30, 30, 35, 35, 60, 60, 65, 65, 80, 80]);
    }

    #[test]
    fn frequency_index_range_bounds_between_and_on_keys() {
        let mut index = FrequencyIndex::new(10);
        for key in [50, 30, 70, 20, 40, 60, 80] {
            index.insert(key, (), 1).unwrap();
        }
        index.insert(60, (), 1).unwrap();

        assert_eq!(index.get_unique_keys_in_range(&35, &75), vec![40, 50, 70]);
        assert_eq!(index.get_unique_keys_in_range(&30, &70), vec![40, 50]);
        assert_eq!(index.get_unique_keys_in_range(&80, &100), Vec::<i32>::new());
        assert_eq!(index.get_unique_keys_in_range(&-1, &25), vec![20]);
    }

    #[test]
    fn frequency_index_existing_key_keeps_first_payload() {
        let mut index = FrequencyIndex::new(10);
        assert!(index.insert("k", 1, 1).unwrap());
        assert!(!index.insert("k", 2, 1).unwrap());
        assert_eq!(index.get_data("k"), Some(&1));
        assert_eq!(index.lookup("k"), 2);
        assert_eq!(index.n_unique_keys(), 0);
    }

    #[test]
    fn frequency_index_unique_keys_in_range() {
        let index = scenario_five();
        assert_eq!(index.get_unique_keys_in_range(&1, &10), vec![3, 4, 6, 7, 8, 9]);
        assert_eq!(index.get_unique_keys_in_range(&0, &11), vec![1, 3, 4, 6, 7, 8, 9, 10]);
        assert!(index.get_unique_keys_in_range(&4, &5).is_empty());
        assert!(index.get_unique_keys_in_range(&9, &2).is_empty());
    }

    #[test]
    fn frequency_index_get_all_keys_orders_and_repeats() {
        let index = scenario_five();
        let all = index.get_all_keys(true);
        assert_eq!(all.len() as u64, index.size());
        assert_eq!(&all[..6], &[1, 2, 2, 3, 4, 5]);
        assert!(all.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(index.get_all_keys(false), vec![1, 3, 4, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn frequency_index_remove_all_ignores_count() {
        let mut index = scenario_five();
        assert!(index.remove_all(&5));
        assert!(!index.remove_all(&5));
        assert_eq!(index.lookup(&5), 0);
        assert_eq!(index.size(), 10);
        assert_eq!(index.distinct_len(), 9);
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_update_visible_from_ordered_views() {
        let mut index = FrequencyIndex::new(10);
        index.insert(2, "two", 1).unwrap();
        index.insert(1, "one", 1).unwrap();
        index.insert(3, "three", 4).unwrap();

        assert!(index.update(&3, "THREE"));
        let entries: Vec<_> = index.entries().map(|(k, d, c)| (*k, *d, c)).collect();
        assert_eq!(entries, vec![(1, "one", 1), (2, "two", 1), (3, "THREE", 4)]);
    }

    #[test]
    fn frequency_index_table_survives_two_child_deletion() {
        let mut index = FrequencyIndex::new(10);
        for key in [50, 30, 70, 20, 40, 60, 80, 65] {
            index.insert(key, key * 10, 1).unwrap();
        }
        // 50 has two children; its successor 60 is spliced in
        assert!(index.remove(&50, 1).unwrap());
        for key in [30, 70, 20, 40, 60, 80, 65] {
            assert_eq!(index.get_data(&key), Some(&(key * 10)));
        }
        assert!(index.update(&60, 0));
        assert_eq!(index.entries().find(|(k, _, _)| **k == 60).map(|e| *e.1), Some(0));
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_min_max_follow_mutations() {
        let mut index = FrequencyIndex::new(10);
        assert_eq!(index.get_min_key(), None);
        for key in [4, 9, 1, 6] {
            index.insert(key, (), 1).unwrap();
        }
        assert_eq!(index.get_min_key(), Some(&1));
        assert_eq!(index.get_max_key(), Some(&9));

        index.remove_all(&1);
        index.remove(&9, 1).unwrap();
        assert_eq!(index.get_min_key(), Some(&4));
        assert_eq!(index.get_max_key(), Some(&6));
    }

    #[test]
    fn frequency_index_string_keys_accept_str() {
        let mut index: FrequencyIndex<String, usize> = FrequencyIndex::new(10);
        index.insert("apple".to_string(), 5, 2).unwrap();
        index.insert("pear".to_string(), 4, 1).unwrap();

        assert_eq!(index.lookup("apple"), 2);
        assert!(index.update("pear", 40));
        assert_eq!(index.get_unique_keys_in_range("a", "z"), vec!["pear".to_string()]);
        assert!(index.remove("apple", 2).unwrap());
        assert!(index.remove_all("pear"));
        assert!(index.is_empty());
    }

    #[test]
    fn frequency_index_grows_table_with_distinct_keys() {
        let mut index = FrequencyIndex::new(10);
        for key in 0..7u8 {
            index.insert(key, (), 2).unwrap();
        }
        assert_eq!(index.capacity(), 20);
        for key in 0..7u8 {
            assert_eq!(index.lookup(&key), 2);
        }
    }

    #[test]
    fn frequency_index_clear_resets_everything() {
        let mut index = scenario_five();
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.size(), 0);
        assert_eq!(index.lookup(&1), 0);
        assert_eq!(index.iter().count(), 0);
        index.insert(1, (), 1).unwrap();
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_rejects_small_capacity() {
        assert!(FrequencyIndex::<u8, ()>::try_with_capacity(9).is_err());
        assert!(FrequencyIndex::<u8, ()>::try_with_capacity(10).is_ok());
    }

    #[test]
    fn frequency_index_into_iter_matches_iter() {
        let index = scenario_five();
        let via_ref: Vec<u32> = (&index).into_iter().copied().collect();
        assert_eq!(via_ref, index.get_all_keys(true));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn frequency_index_metrics_count_operations() {
        let mut index = FrequencyIndex::new(10);
        index.insert(1, (), 2).unwrap();
        index.insert(1, (), 1).unwrap();
        index.insert(2, (), 1).unwrap();
        let _ = index.lookup(&1);
        let _ = index.lookup(&3);
        index.remove(&2, 1).unwrap();
        index.remove_all(&1);
        index.remove_all(&1);

        let snapshot = index.metrics_snapshot();
        assert_eq!(snapshot.insert_calls, 3);
        assert_eq!(snapshot.insert_new_keys, 2);
        assert_eq!(snapshot.insert_existing_keys, 1);
        assert_eq!(snapshot.lookup_calls, 2);
        assert_eq!(snapshot.lookup_hits, 1);
        assert_eq!(snapshot.remove_deleted_nodes, 1);
        assert_eq!(snapshot.remove_all_calls, 2);
        assert_eq!(snapshot.remove_all_found, 1);
        assert_eq!(snapshot.total_count, 0);
        assert_eq!(snapshot.table.len, 0);
    }
}
