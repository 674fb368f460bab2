//! Frequency-indexed multiset keyed by an ordered tree and a hash table.
//!
//! See [`FrequencyIndex`] for the combined structure; its building blocks
//! live in [`crate::ds`].

pub mod frequency_index;

pub use frequency_index::FrequencyIndex;
