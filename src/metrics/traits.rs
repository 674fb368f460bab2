//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting, and export are split into small traits so the
//! data structures only ever write counters, while tests and monitoring read
//! them through snapshots.
//!
//! ```text
//!   ┌────────────────────────┐        ┌────────────────────────┐
//!   │  TableMetricsRecorder  │        │  IndexMetricsRecorder  │
//!   │  insert/update/delete  │        │  insert/remove/update  │
//!   │  grow                  │        │  remove_all/clear      │
//!   └───────────┬────────────┘        └───────────┬────────────┘
//!               │ &self variants                  │ &self variants
//!               ▼                                 ▼
//!   ┌────────────────────────┐        ┌────────────────────────┐
//!   │ TableMetricsReadRec.   │        │ IndexMetricsReadRec.   │
//!   │ lookup / chain steps   │        │ lookup / listings      │
//!   └────────────────────────┘        └────────────────────────┘
//!
//!   Consumption:
//!   MetricsSnapshotProvider<S>  (tests, benches)
//!   MetricsExporter<S>          (monitoring, e.g. Prometheus text)
//! ```

/// Counters for [`ChainedHashTable`](crate::ds::ChainedHashTable) mutations.
pub trait TableMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_rejected(&mut self);
    fn record_update_call(&mut self);
    fn record_update_found(&mut self);
    fn record_delete_call(&mut self);
    fn record_delete_found(&mut self);
    /// A growth pass that moved `moved` entries into the new bucket array.
    fn record_grow(&mut self, moved: usize);
    fn record_clear(&mut self);
}

/// Read-path counters for [`ChainedHashTable`](crate::ds::ChainedHashTable),
/// recorded through shared references.
pub trait TableMetricsReadRecorder {
    fn record_lookup_call(&self);
    fn record_lookup_hit(&self);
    /// Entries compared while scanning a bucket chain.
    fn record_chain_steps(&self, steps: u64);
}

/// Counters for [`FrequencyIndex`](crate::index::FrequencyIndex) mutations.
pub trait IndexMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_insert_new_key(&mut self);
    fn record_insert_existing_key(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_remove_deleted_node(&mut self);
    fn record_remove_all_call(&mut self);
    fn record_remove_all_found(&mut self);
    fn record_update_call(&mut self);
    fn record_update_found(&mut self);
    fn record_clear(&mut self);
}

/// Read-path counters for [`FrequencyIndex`](crate::index::FrequencyIndex).
pub trait IndexMetricsReadRecorder {
    fn record_lookup_call(&self);
    fn record_lookup_hit(&self);
    fn record_key_listing_call(&self);
    fn record_range_query_call(&self);
}

/// Produce a point-in-time snapshot (bench/test).
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
