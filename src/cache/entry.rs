//! Cache Entry Module
//!
//! Defines a cached aggregation result with its expiry.

use crate::catalog::Product;

// == Cache Entry ==
/// An aggregated result set stored under a query fingerprint.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored products, in aggregation order
    pub items: Vec<Product>,
    /// Write timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry written at `now_ms` that lives for `ttl_seconds`.
    pub fn new(items: Vec<Product>, now_ms: u64, ttl_seconds: u64) -> Self {
        Self {
            items,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}
