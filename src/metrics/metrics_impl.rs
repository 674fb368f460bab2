use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    IndexMetricsReadRecorder, IndexMetricsRecorder, TableMetricsReadRecorder,
    TableMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct TableMetrics {
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_rejected: u64,
    pub update_calls: u64,
    pub update_found: u64,
    pub delete_calls: u64,
    pub delete_found: u64,
    pub grow_calls: u64,
    pub grow_moved_entries: u64,
    pub clear_calls: u64,
    pub lookup_calls: MetricsCell,
    pub lookup_hits: MetricsCell,
    pub chain_steps: MetricsCell,
}

#[derive(Debug, Default)]
pub struct IndexMetrics {
    pub insert_calls: u64,
    pub insert_new_keys: u64,
    pub insert_existing_keys: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub remove_deleted_nodes: u64,
    pub remove_all_calls: u64,
    pub remove_all_found: u64,
    pub update_calls: u64,
    pub update_found: u64,
    pub clear_calls: u64,
    pub lookup_calls: MetricsCell,
    pub lookup_hits: MetricsCell,
    pub key_listing_calls: MetricsCell,
    pub range_query_calls: MetricsCell,
}

impl TableMetricsRecorder for TableMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_update_call(&mut self) {
        self.update_calls += 1;
    }

    fn record_update_found(&mut self) {
        self.update_found += 1;
    }

    fn record_delete_call(&mut self) {
        self.delete_calls += 1;
    }

    fn record_delete_found(&mut self) {
        self.delete_found += 1;
    }

    fn record_grow(&mut self, moved: usize) {
        self.grow_calls += 1;
        self.grow_moved_entries += moved as u64;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl TableMetricsReadRecorder for &TableMetrics {
    fn record_lookup_call(&self) {
        self.lookup_calls.incr();
    }

    fn record_lookup_hit(&self) {
        self.lookup_hits.incr();
    }

    fn record_chain_steps(&self, steps: u64) {
        self.chain_steps.add(steps);
    }
}

impl IndexMetricsRecorder for IndexMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new_key(&mut self) {
        self.insert_new_keys += 1;
    }

    fn record_insert_existing_key(&mut self) {
        self.insert_existing_keys += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_remove_deleted_node(&mut self) {
        self.remove_deleted_nodes += 1;
    }

    fn record_remove_all_call(&mut self) {
        self.remove_all_calls += 1;
    }

    fn record_remove_all_found(&mut self) {
        self.remove_all_found += 1;
    }

    fn record_update_call(&mut self) {
        self.update_calls += 1;
    }

    fn record_update_found(&mut self) {
        self.update_found += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl IndexMetricsReadRecorder for &IndexMetrics {
    fn record_lookup_call(&self) {
        self.lookup_calls.incr();
    }

    fn record_lookup_hit(&self) {
        self.lookup_hits.incr();
    }

    fn record_key_listing_call(&self) {
        self.key_listing_calls.incr();
    }

    fn record_range_query_call(&self) {
        self.range_query_calls.incr();
    }
}
