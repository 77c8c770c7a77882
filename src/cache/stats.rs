//! Cache Statistics Module
//!
//! Tracks result cache hits, misses and writes.

use serde::Serialize;

// == Cache Stats ==
/// Tracks result cache metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads served from a live entry
    pub hits: u64,
    /// Reads that found no entry or an expired one
    pub misses: u64,
    /// Entries written (including overwrites)
    pub writes: u64,
    /// Current number of stored entries, expired ones included
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
