//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;

use crate::cache::SEARCH_RESULT_TTL;
use crate::catalog::aggregator::MAX_SEED_CONCURRENCY;

/// Default upstream API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.kroger.com/v1";

/// Default site root used to build absolute product page links.
pub const DEFAULT_PRODUCT_PAGE_BASE: &str = "https://www.kroger.com";

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth2 client id for the upstream API
    pub client_id: String,
    /// OAuth2 client secret for the upstream API
    pub client_secret: String,
    /// Upstream API root, without trailing slash
    pub api_base_url: String,
    /// Site root prepended to relative product page URIs
    pub product_page_base: String,
    /// Scope requested during the client-credentials exchange
    pub token_scope: String,
    /// Serve fixture data instead of calling the upstream API
    pub dev_mode: bool,
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for aggregated search results
    pub search_cache_ttl: u64,
    /// Maximum simultaneous upstream calls during seed fan-out
    pub seed_concurrency: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KROGER_CLIENT_ID` / `KROGER_CLIENT_SECRET` - Upstream credentials (default: empty)
    /// - `KROGER_API_BASE_URL` - Upstream API root (default: https://api.kroger.com/v1)
    /// - `KROGER_PRODUCT_PAGE_BASE` - Product page site root (default: https://www.kroger.com)
    /// - `KROGER_TOKEN_SCOPE` - Token scope (default: product.compact)
    /// - `DEV_MODE` - Force fixture data (`1`, `true`, `yes`)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `SEARCH_CACHE_TTL` - Aggregated search TTL in seconds (default: 120)
    /// - `SEED_CONCURRENCY` - Seed fan-out concurrency (default and ceiling: 5)
    ///
    /// Dev mode is also enabled whenever either credential is missing.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let client_id = env::var("KROGER_CLIENT_ID").unwrap_or_default();
        let client_secret = env::var("KROGER_CLIENT_SECRET").unwrap_or_default();
        let dev_flag = env::var("DEV_MODE")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);
        let dev_mode = dev_flag || client_id.is_empty() || client_secret.is_empty();

        Self {
            dev_mode,
            client_id,
            client_secret,
            api_base_url: env::var("KROGER_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            product_page_base: env::var("KROGER_PRODUCT_PAGE_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.product_page_base),
            token_scope: env::var("KROGER_TOKEN_SCOPE").unwrap_or(defaults.token_scope),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            search_cache_ttl: env::var("SEARCH_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.search_cache_ttl),
            seed_concurrency: env::var("SEED_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(|n: usize| n.clamp(1, MAX_SEED_CONCURRENCY))
                .unwrap_or(defaults.seed_concurrency),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            product_page_base: DEFAULT_PRODUCT_PAGE_BASE.to_string(),
            token_scope: "product.compact".to_string(),
            dev_mode: true,
            server_port: 8000,
            search_cache_ttl: SEARCH_RESULT_TTL,
            seed_concurrency: MAX_SEED_CONCURRENCY,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
