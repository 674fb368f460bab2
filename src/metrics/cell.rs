use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// Read paths (`lookup`, key listings) take `&self`, so their counters live
/// in cells. The cell is `Send` but not `Sync`: a structure carrying metrics
/// can move between threads or sit behind a `Mutex`, but cannot be read
/// concurrently through shared references.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn add(&self, n: u64) {
        self.0.set(self.0.get() + n);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_cell_counts_through_shared_ref() {
        let cell = MetricsCell::new();
        let shared = &cell;
        shared.incr();
        shared.add(4);
        assert_eq!(cell.get(), 5);
        cell.reset();
        assert_eq!(cell.get(), 0);
    }
}
