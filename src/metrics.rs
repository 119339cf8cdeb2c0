//! Operation counters for the LRU policy (feature `metrics`).
//!
//! Counters are plain `u64` fields updated on the `&mut self` paths and
//! [`MetricsCell`]s on the `&self` read paths. A point-in-time copy is taken
//! with [`LruCore::metrics_snapshot`](crate::policy::lru::LruCore::metrics_snapshot).

use std::cell::Cell;

/// A metrics-only cell for `&self` read paths.
///
/// # Safety
/// This type is only safe if all accesses are externally synchronized.
/// In this crate it is protected by the RwLock in `ConcurrentLruCache`.
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
}

// SAFETY:
// All access to MetricsCell is externally synchronized by an RwLock.
// Metrics are observational and do not affect correctness.
unsafe impl Sync for MetricsCell {}
unsafe impl Send for MetricsCell {}

/// Live counters owned by `LruCore`.
#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub eviction_notifications: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
}

/// Point-in-time copy of [`LruMetrics`] plus cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub eviction_notifications: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub cache_len: usize,
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_cell_increments() {
        let cell = MetricsCell::new();
        assert_eq!(cell.get(), 0);
        cell.incr();
        cell.incr();
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn lru_metrics_default_is_zeroed() {
        let m = LruMetrics::default();
        assert_eq!(m.get_calls, 0);
        assert_eq!(m.evicted_entries, 0);
        assert_eq!(m.peek_calls.get(), 0);
    }
}
