//! Cache Module
//!
//! Provides the in-memory result cache for aggregated searches.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{fingerprint, ResultCache};

// == Public Constants ==
/// TTL in seconds for aggregated search results
pub const SEARCH_RESULT_TTL: u64 = 120;
