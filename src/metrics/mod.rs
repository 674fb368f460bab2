//! Optional operation counters (feature `metrics`).
//!
//! [`ChainedHashTable`](crate::ds::ChainedHashTable) and
//! [`FrequencyIndex`](crate::index::FrequencyIndex) record into
//! [`TableMetrics`](metrics_impl::TableMetrics) /
//! [`IndexMetrics`](metrics_impl::IndexMetrics) when the feature is enabled,
//! and expose them as snapshots through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
