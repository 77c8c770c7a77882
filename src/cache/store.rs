//! Result Cache Module
//!
//! TTL map from query fingerprints to aggregated product lists. Expiry is
//! checked on read; stale entries stay until the next write for the same
//! key replaces them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheStats};
use crate::catalog::Product;
use crate::clock::Clock;

/// Builds the fingerprint for an aggregated search.
pub fn fingerprint(location_id: &str, term: &str, max_items: usize) -> String {
    format!(
        "products::{}::{}::max{}",
        location_id,
        term.trim().to_lowercase(),
        max_items
    )
}

// == Result Cache ==
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
    clock: Arc<dyn Clock>,
    default_ttl: u64,
}

impl ResultCache {
    // == Constructor ==
    /// Creates an empty cache whose `put` defaults to `default_ttl` seconds.
    pub fn new(default_ttl: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            clock,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Get ==
    /// Returns the stored items if the entry exists and has not expired.
    pub fn get(&mut self, key: &str) -> Option<Vec<Product>> {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.stats.record_hit();
                Some(entry.items.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores `items` under `key` for `ttl` seconds (default TTL if None),
    /// replacing any previous entry.
    pub fn put(&mut self, key: impl Into<String>, items: Vec<Product>, ttl: Option<u64>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(items, self.clock.now_ms(), ttl);
        self.entries.insert(key.into(), entry);
        self.stats.record_write();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
