use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::{IndexMetricsSnapshot, TableMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for countkit metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// or forwarded to an OpenTelemetry collector.
///
/// # Example
///
/// ```
/// use countkit::index::FrequencyIndex;
/// use countkit::metrics::exporter::PrometheusTextExporter;
/// use countkit::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
///
/// let mut index: FrequencyIndex<u32, ()> = FrequencyIndex::new(16);
/// index.insert(1, (), 2).unwrap();
///
/// let exporter = PrometheusTextExporter::new("countkit", Vec::new());
/// exporter.export(&index.snapshot());
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("countkit_insert_calls_total 1"));
/// assert!(text.contains("countkit_total_count 2"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<TableMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &TableMetricsSnapshot) {
        self.write_counter("table_insert_calls_total", snapshot.insert_calls);
        self.write_counter("table_insert_new_total", snapshot.insert_new);
        self.write_counter("table_insert_rejected_total", snapshot.insert_rejected);
        self.write_counter("table_update_calls_total", snapshot.update_calls);
        self.write_counter("table_update_found_total", snapshot.update_found);
        self.write_counter("table_delete_calls_total", snapshot.delete_calls);
        self.write_counter("table_delete_found_total", snapshot.delete_found);
        self.write_counter("table_grow_calls_total", snapshot.grow_calls);
        self.write_counter(
            "table_grow_moved_entries_total",
            snapshot.grow_moved_entries,
        );
        self.write_counter("table_clear_calls_total", snapshot.clear_calls);
        self.write_counter("table_lookup_calls_total", snapshot.lookup_calls);
        self.write_counter("table_lookup_hits_total", snapshot.lookup_hits);
        self.write_counter("table_chain_steps_total", snapshot.chain_steps);
        self.write_gauge("table_len", snapshot.len as u64);
        self.write_gauge("table_capacity", snapshot.capacity as u64);
    }
}

impl<W: Write + Send> MetricsExporter<IndexMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &IndexMetricsSnapshot) {
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_new_keys_total", snapshot.insert_new_keys);
        self.write_counter(
            "insert_existing_keys_total",
            snapshot.insert_existing_keys,
        );
        self.write_counter("remove_calls_total", snapshot.remove_calls);
        self.write_counter("remove_found_total", snapshot.remove_found);
        self.write_counter(
            "remove_deleted_nodes_total",
            snapshot.remove_deleted_nodes,
        );
        self.write_counter("remove_all_calls_total", snapshot.remove_all_calls);
        self.write_counter("remove_all_found_total", snapshot.remove_all_found);
        self.write_counter("update_calls_total", snapshot.update_calls);
        self.write_counter("update_found_total", snapshot.update_found);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("lookup_calls_total", snapshot.lookup_calls);
        self.write_counter("lookup_hits_total", snapshot.lookup_hits);
        self.write_counter("key_listing_calls_total", snapshot.key_listing_calls);
        self.write_counter("range_query_calls_total", snapshot.range_query_calls);
        self.write_gauge("total_count", snapshot.total_count);
        self.write_gauge("distinct_keys", snapshot.distinct_keys as u64);
        self.write_gauge("unique_keys", snapshot.unique_keys as u64);
        self.write_gauge("tree_height", snapshot.tree_height as u64);
        self.export(&snapshot.table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exporter_writes_type_line_and_value() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        let snapshot = TableMetricsSnapshot {
            insert_calls: 3,
            capacity: 20,
            ..TableMetricsSnapshot::default()
        };
        exporter.export(&snapshot);
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE table_insert_calls_total counter\n"));
        assert!(text.contains("table_insert_calls_total 3\n"));
        assert!(text.contains("# TYPE table_capacity gauge\n"));
        assert!(text.contains("table_capacity 20\n"));
    }

    #[test]
    fn exporter_index_snapshot_includes_table_section() {
        let exporter = PrometheusTextExporter::new("fx", Vec::new());
        let snapshot = IndexMetricsSnapshot {
            total_count: 9,
            table: TableMetricsSnapshot {
                len: 4,
                ..TableMetricsSnapshot::default()
            },
            ..IndexMetricsSnapshot::default()
        };
        exporter.export(&snapshot);
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("fx_total_count 9\n"));
        assert!(text.contains("fx_table_len 4\n"));
    }
}
