#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableMetricsSnapshot {
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
    pub lookup_calls: u64,
    pub lookup_hits: u64,
    pub chain_steps: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexMetricsSnapshot {
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
    pub lookup_calls: u64,
    pub lookup_hits: u64,
    pub key_listing_calls: u64,
    pub range_query_calls: u64,

    pub total_count: u64,
    pub distinct_keys: usize,
    pub unique_keys: usize,
    pub tree_height: usize,
    pub table: TableMetricsSnapshot,
}
