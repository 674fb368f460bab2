//! Example exporting FrequencyIndex metrics in Prometheus text format.
//!
//! Run with: cargo run --example index_metrics --features metrics

use countkit::index::FrequencyIndex;
use countkit::metrics::exporter::PrometheusTextExporter;
use countkit::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};

fn main() {
    let mut index: FrequencyIndex<u64, ()> = FrequencyIndex::new(10);
    for i in 0..1_000u64 {
        index.insert(i % 97, (), 1 + i % 3).unwrap();
    }
    for i in 0..200u64 {
        let _ = index.lookup(&(i % 150));
    }
    for key in (0..97u64).step_by(5) {
        index.remove_all(&key);
    }
    let _ = index.get_unique_keys_in_range(&10, &60);

    let exporter = PrometheusTextExporter::new("countkit", std::io::stdout());
    exporter.export(&index.snapshot());
}
