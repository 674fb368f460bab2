//! Separately chained hash table with load-factor growth.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                 ChainedHashTable<K, V, S> Layout                     │
//! │                                                                      │
//! │   bucket = hasher.hash_one(key) % capacity     (u64 arithmetic)      │
//! │                                                                      │
//! │   buckets[0]: [ (k3, v3) ]                                           │
//! │   buckets[1]: [ ]                                                    │
//! │   buckets[2]: [ (k1, v1) ─ (k7, v7) ]      chain in insertion order  │
//! │   ...                                                                │
//! │   buckets[9]: [ (k4, v4) ]                                           │
//! │                                                                      │
//! │   len = 4, capacity = 10                                             │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Growth is lazy: an insert of a new key that would push the load factor
//! (`len / capacity`) above 2/3 first doubles the bucket array and moves
//! every entry into its new chain. Keys and values are moved, never cloned.
//!
//! ## Contract
//!
//! - `insert` never overwrites: an existing key is left untouched and the
//!   call returns `false`.
//! - `update` only replaces an existing key's value and returns `false` when
//!   the key is absent.
//! - At most one entry per key, regardless of bucket collisions.
//!
//! ## Operations
//!
//! | Operation  | Time                  | Notes                             |
//! |------------|-----------------------|-----------------------------------|
//! | `insert`   | O(chain), amortized   | Growth pass is O(n)               |
//! | `update`   | O(chain)              | Requires existing key             |
//! | `lookup`   | O(chain)              |                                   |
//! | `delete`   | O(chain)              |                                   |
//!
//! ## Example Usage
//!
//! ```
//! use countkit::ds::ChainedHashTable;
//!
//! let mut table = ChainedHashTable::new(10);
//! assert!(table.insert("a", 1));
//! assert!(!table.insert("a", 2)); // never overwrites
//! assert_eq!(table.lookup("a"), Some(&1));
//!
//! assert!(table.update("a", 3));
//! assert!(!table.update("b", 4)); // update requires the key
//! assert_eq!(table.lookup("a"), Some(&3));
//!
//! assert!(table.delete("a"));
//! assert!(table.is_empty());
//! ```

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TableMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TableMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, TableMetricsReadRecorder, TableMetricsRecorder,
};

/// Smallest accepted bucket count.
pub const MIN_CAPACITY: usize = 10;

// Load factor limit 2/3, kept as a ratio to stay in integer arithmetic.
const LOAD_LIMIT_NUM: usize = 2;
const LOAD_LIMIT_DEN: usize = 3;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Hash map with separate chaining and automatic doubling.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Eq + Hash`
/// - `V`: Value type
/// - `S`: Hasher builder, defaults to [`FxBuildHasher`]
pub struct ChainedHashTable<K, V, S = FxBuildHasher> {
    buckets: Vec<Vec<Entry<K, V>>>,
    len: usize,
    hasher: S,
    #[cfg(feature = "metrics")]
    metrics: TableMetrics,
}

// Manual impl: the hasher is left out so `S` needs no `Debug` bound
// (`FxBuildHasher` does not implement `Debug`).
impl<K: std::fmt::Debug, V: std::fmt::Debug, S> std::fmt::Debug for ChainedHashTable<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("ChainedHashTable");
        d.field("buckets", &self.buckets).field("len", &self.len);
        #[cfg(feature = "metrics")]
        d.field("metrics", &self.metrics);
        d.finish_non_exhaustive()
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Vec<Entry<K, V>>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Vec::new);
    buckets
}

impl<K, V> ChainedHashTable<K, V, FxBuildHasher> {
    /// Creates a table with `capacity` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below [`MIN_CAPACITY`]. See
    /// [`try_with_capacity`](Self::try_with_capacity).
    pub fn new(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }

    /// Creates a table with `capacity` buckets, returning an error on an
    /// invalid capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is below [`MIN_CAPACITY`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<K, V, S> ChainedHashTable<K, V, S> {
    /// Creates a table with `capacity` buckets and a custom hasher.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below [`MIN_CAPACITY`].
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        match Self::try_with_capacity_and_hasher(capacity, hasher) {
            Ok(table) => table,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a table with `capacity` buckets and a custom hasher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is below [`MIN_CAPACITY`].
    pub fn try_with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, ConfigError> {
        if capacity < MIN_CAPACITY {
            return Err(ConfigError::new(format!(
                "hash table capacity must be at least {}, got {}",
                MIN_CAPACITY, capacity
            )));
        }
        Ok(Self {
            buckets: empty_buckets(capacity),
            len: 0,
            hasher,
            #[cfg(feature = "metrics")]
            metrics: TableMetrics::default(),
        })
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Current `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Length of the chain at `bucket`; 0 for an out-of-range index.
    pub fn bucket_len(&self, bucket: usize) -> usize {
        self.buckets.get(bucket).map(Vec::len).unwrap_or(0)
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Iterates entries bucket by bucket, each chain in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Removes every entry; the bucket count is kept.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    fn exceeds_load_limit(&self, len: usize) -> bool {
        len * LOAD_LIMIT_DEN > self.buckets.len() * LOAD_LIMIT_NUM
    }
}

impl<K, V, S> ChainedHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn position<Q>(&self, key: &Q) -> (usize, Option<usize>)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_index(key);
        let position = self.buckets[bucket]
            .iter()
            .position(|entry| Borrow::<Q>::borrow(&entry.key) == key);
        (bucket, position)
    }

    /// Inserts `key` if it is not already present.
    ///
    /// Returns `true` if the entry was added. An existing key is left
    /// unchanged and the call returns `false` (dropping `value`).
    ///
    /// # Example
    ///
    /// ```
    /// use countkit::ds::ChainedHashTable;
    ///
    /// let mut table = ChainedHashTable::new(10);
    /// for key in 0..7 {
    ///     assert!(table.insert(key, key * 10));
    /// }
    /// // the 7th key would have taken the load factor to 0.7
    /// assert_eq!(table.capacity(), 20);
    /// assert_eq!(table.lookup(&6), Some(&60));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.position(&key).1.is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return false;
        }

        if self.exceeds_load_limit(self.len + 1) {
            self.grow();
        }

        let bucket = self.bucket_index(&key);
        self.buckets[bucket].push(Entry { key, value });
        self.len += 1;

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        true
    }

    /// Replaces the value of an existing key.
    ///
    /// Returns `false` (dropping `value`) if the key is absent.
    pub fn update<Q>(&mut self, key: &Q, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_update_call();

        let (bucket, position) = self.position(key);
        let Some(position) = position else {
            return false;
        };
        self.buckets[bucket][position].value = value;

        #[cfg(feature = "metrics")]
        self.metrics.record_update_found();
        true
    }

    /// Returns the value stored for `key`.
    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_index(key);
        let chain = &self.buckets[bucket];
        let found = chain.iter().position(|entry| Borrow::<Q>::borrow(&entry.key) == key);

        #[cfg(feature = "metrics")]
        {
            (&self.metrics).record_lookup_call();
            let steps = found.map(|p| p + 1).unwrap_or(chain.len());
            (&self.metrics).record_chain_steps(steps as u64);
            if found.is_some() {
                (&self.metrics).record_lookup_hit();
            }
        }

        found.map(|position| &chain[position].value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (bucket, position) = self.position(key);
        let position = position?;
        Some(&mut self.buckets[bucket][position].value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.position(key).1.is_some()
    }

    /// Removes `key`; returns `true` if an entry was removed.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_delete_call();

        let (bucket, position) = self.position(key);
        let entry = self.buckets[bucket].remove(position?);
        self.len -= 1;

        #[cfg(feature = "metrics")]
        self.metrics.record_delete_found();
        Some(entry.value)
    }

    /// Doubles the bucket count and moves every entry to its new chain.
    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let mut moved = 0usize;
        for entry in old.into_iter().flatten() {
            let bucket = self.bucket_index(&entry.key);
            self.buckets[bucket].push(entry);
            moved += 1;
        }
        debug_assert_eq!(moved, self.len);

        #[cfg(feature = "metrics")]
        self.metrics.record_grow(moved);
    }

    /// Verifies entry count, bucket placement, and per-key uniqueness.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.buckets.len() < MIN_CAPACITY {
            return Err(InvariantError::new(format!(
                "capacity {} below minimum {}",
                self.buckets.len(),
                MIN_CAPACITY
            )));
        }

        let mut counted = 0usize;
        for (bucket, chain) in self.buckets.iter().enumerate() {
            for (i, entry) in chain.iter().enumerate() {
                let expected = self.bucket_index(&entry.key);
                if expected != bucket {
                    return Err(InvariantError::new(format!(
                        "entry in bucket {} hashes to bucket {}",
                        bucket, expected
                    )));
                }
                // equal keys hash alike, so duplicates can only share a chain
                if chain[..i].iter().any(|other| other.key == entry.key) {
                    return Err(InvariantError::new(format!(
                        "duplicate key in bucket {}",
                        bucket
                    )));
                }
            }
            counted += chain.len();
        }

        if counted != self.len {
            return Err(InvariantError::new(format!(
                "len {} but chains hold {} entries",
                self.len, counted
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

#[cfg(feature = "metrics")]
impl<K, V, S> ChainedHashTable<K, V, S> {
    pub fn metrics_snapshot(&self) -> TableMetricsSnapshot {
        TableMetricsSnapshot {
            insert_calls: self.metrics.insert_calls,
            insert_new: self.metrics.insert_new,
            insert_rejected: self.metrics.insert_rejected,
            update_calls: self.metrics.update_calls,
            update_found: self.metrics.update_found,
            delete_calls: self.metrics.delete_calls,
            delete_found: self.metrics.delete_found,
            grow_calls: self.metrics.grow_calls,
            grow_moved_entries: self.metrics.grow_moved_entries,
            clear_calls: self.metrics.clear_calls,
            lookup_calls: self.metrics.lookup_calls.get(),
            lookup_hits: self.metrics.lookup_hits.get(),
            chain_steps: self.metrics.chain_steps.get(),
            len: self.len,
            capacity: self.buckets.len(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsSnapshotProvider<TableMetricsSnapshot> for ChainedHashTable<K, V, S> {
    fn snapshot(&self) -> TableMetricsSnapshot {
        self.metrics_snapshot()
    }
}
