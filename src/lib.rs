//! countkit: duplicate-counting ordered multiset with hash-indexed lookups.
//!
//! [`FrequencyIndex`](index::FrequencyIndex) pairs a
//! [`DuplicateTree`](ds::DuplicateTree) (ordered keys, per-key counts) with a
//! [`ChainedHashTable`](ds::ChainedHashTable) mapping each key to its tree
//! node, so counts resolve in constant expected time while ordered queries
//! stay available.

pub mod ds;
pub mod error;
pub mod index;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
