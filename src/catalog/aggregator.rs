//! Aggregator Module
//!
//! Drives every product and location query against the upstream source:
//! single-shot searches, cached multi-page aggregation, and the multi-seed
//! fan-out used to approximate "everything on sale".
//!
//! Per-page and per-seed failures inside aggregation are logged and degrade
//! to partial results. Single-shot queries propagate upstream errors. No
//! call is ever retried, and an abandoned request does not cancel the
//! upstream calls it already started.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, info, warn};

use super::filters::ProductFilters;
use super::product::{parse_products, Product};
use super::sale::is_on_sale;
use crate::cache::{fingerprint, CacheStats, ResultCache, SEARCH_RESULT_TTL};
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DEFAULT_PRODUCT_PAGE_BASE};
use crate::error::{GatewayError, Result};
use crate::upstream::{
    Endpoint, Filters, FixtureUpstream, HttpUpstream, TokenManager, Upstream, MAX_PAGE_SIZE,
};

/// Broad search terms whose union approximates the full sale catalogue.
pub const SALE_SEEDS: &[&str] = &[
    "a",
    "e",
    "o",
    "kroger",
    "simple truth",
    "organic",
    "milk",
    "bread",
    "meat",
    "snack",
    "drink",
    "fruit",
    "vegetable",
    "cheese",
];

/// Default and ceiling for the aggregated search cap.
pub const DEFAULT_SEARCH_ALL_MAX: usize = 300;
pub const MAX_SEARCH_ALL: usize = 400;

pub const DEFAULT_SALES_ALL_MAX: usize = 150;

/// Hard ceiling on simultaneous upstream calls during seed fan-out.
pub const MAX_SEED_CONCURRENCY: usize = 5;

const MAX_LOCATION_LIMIT: i64 = 200;

/// Keeps the first product seen for each identity. Products without an
/// identity are always kept.
pub fn dedupe_by_identity(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| match p.identity() {
            Some(id) => seen.insert(id.to_string()),
            None => true,
        })
        .collect()
}

/// Cap for an aggregated search: `max` when positive, else the default,
/// never above [`MAX_SEARCH_ALL`].
pub fn search_all_cap(max: i64) -> usize {
    let requested = if max > 0 {
        max as usize
    } else {
        DEFAULT_SEARCH_ALL_MAX
    };
    requested.min(MAX_SEARCH_ALL)
}

// == Settings ==
#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    /// Page size used by paged aggregation (at most the upstream maximum)
    pub page_size: usize,
    /// Simultaneous upstream calls during seed fan-out, never more than
    /// [`MAX_SEED_CONCURRENCY`]
    pub seed_concurrency: usize,
    pub seeds: Vec<String>,
    /// TTL in seconds for aggregated search results
    pub search_ttl: u64,
    /// Site root for absolute product page links
    pub product_page_base: String,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            seed_concurrency: MAX_SEED_CONCURRENCY,
            seeds: SALE_SEEDS.iter().map(|s| s.to_string()).collect(),
            search_ttl: SEARCH_RESULT_TTL,
            product_page_base: DEFAULT_PRODUCT_PAGE_BASE.to_string(),
        }
    }
}

// == Aggregator ==
pub struct Aggregator {
    upstream: Arc<dyn Upstream>,
    tokens: Arc<TokenManager>,
    cache: RwLock<ResultCache>,
    settings: AggregatorSettings,
}

impl Aggregator {
    pub fn new(
        upstream: Arc<dyn Upstream>,
        tokens: Arc<TokenManager>,
        cache: ResultCache,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            upstream,
            tokens,
            cache: RwLock::new(cache),
            settings,
        }
    }

    /// Fixture-backed aggregator using the system clock.
    pub fn dev() -> Self {
        Self::dev_with(AggregatorSettings::default(), Arc::new(SystemClock))
    }

    pub fn dev_with(settings: AggregatorSettings, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(FixtureUpstream::new()),
            Arc::new(TokenManager::offline(clock.clone())),
            ResultCache::new(settings.search_ttl, clock),
            settings,
        )
    }

    /// Builds the live or fixture-backed aggregator the config asks for.
    pub fn from_config(config: &Config) -> Self {
        let settings = AggregatorSettings {
            seed_concurrency: config.seed_concurrency.clamp(1, MAX_SEED_CONCURRENCY),
            search_ttl: config.search_cache_ttl,
            product_page_base: config.product_page_base.clone(),
            ..Default::default()
        };
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        if config.dev_mode {
            info!("Dev mode: serving fixture data");
            return Self::dev_with(settings, clock);
        }

        let client = reqwest::Client::new();
        let tokens = TokenManager::live(
            client.clone(),
            &config.api_base_url,
            config.client_id.clone(),
            config.client_secret.clone(),
            config.token_scope.clone(),
            clock.clone(),
        );
        Self::new(
            Arc::new(HttpUpstream::new(client, config.api_base_url.clone())),
            Arc::new(tokens),
            ResultCache::new(settings.search_ttl, clock),
            settings,
        )
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    pub fn is_dev_mode(&self) -> bool {
        self.tokens.is_offline()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    pub fn token_exchanges(&self) -> u64 {
        self.tokens.exchanges()
    }

    // == Single-shot Queries ==

    /// Stores near a ZIP code, returned as the upstream sends them.
    pub async fn nearby_locations(&self, zip_code: &str, radius: u32, limit: i64) -> Result<Vec<Value>> {
        let token = self.tokens.get_token().await?;
        let filters = Filters::new()
            .with("filter.zipCode.near", zip_code)
            .with("filter.radiusInMiles", radius)
            .with("filter.limit", limit.clamp(1, MAX_LOCATION_LIMIT));
        self.upstream.fetch(Endpoint::Locations, &filters, &token).await
    }

    /// One upstream page starting at `start`, then post-filtered.
    pub async fn search(
        &self,
        term: &str,
        location_id: &str,
        start: i64,
        filters: &ProductFilters,
    ) -> Result<Vec<Product>> {
        let token = self.tokens.get_token().await?;
        let query = product_filters(term, location_id)
            .with("filter.limit", filters.limit.clamp(1, MAX_PAGE_SIZE as i64))
            .with("filter.start", start.max(0));
        let raw = self.upstream.fetch(Endpoint::Products, &query, &token).await?;
        Ok(filters.apply(parse_products(raw)))
    }

    /// Sale items among one page of results for `term`.
    pub async fn sales(&self, location_id: &str, term: &str, limit: i64) -> Result<Vec<Product>> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE as i64);
        let token = self.tokens.get_token().await?;
        let query = product_filters(term, location_id).with("filter.limit", limit);
        let raw = self.upstream.fetch(Endpoint::Products, &query, &token).await?;
        Ok(parse_products(raw)
            .into_iter()
            .filter(is_on_sale)
            .take(limit as usize)
            .collect())
    }

    /// A single product, with an absolute page URL when one can be built.
    pub async fn product_details(&self, product_id: &str, location_id: &str) -> Result<Product> {
        let token = self.tokens.get_token().await?;
        let query = Filters::new()
            .with("filter.productId", product_id)
            .with("filter.locationId", location_id)
            .with("filter.limit", 1);
        let raw = self.upstream.fetch(Endpoint::Products, &query, &token).await?;
        let mut product = parse_products(raw)
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::NotFound("Product not found".to_string()))?;
        product.attach_page_url(&self.settings.product_page_base);
        Ok(product)
    }

    // == Paged Aggregation ==

    /// Up to `max` deduplicated products for `term`, served from the result
    /// cache unless `fresh` is set. A fresh fetch always rewrites the entry.
    pub async fn search_all(
        &self,
        term: &str,
        location_id: &str,
        max: i64,
        fresh: bool,
    ) -> Result<Vec<Product>> {
        let cap = search_all_cap(max);
        let key = fingerprint(location_id, term, cap);

        if !fresh {
            let cached = self.cache.write().await.get(&key);
            if let Some(items) = cached {
                debug!("Result cache hit for {}", key);
                return Ok(items);
            }
        }
        debug!("Result cache miss for {} (fresh={})", key, fresh);

        let token = self.tokens.get_token().await?;
        let items = self.collect_pages(&token, term, location_id, cap).await;

        self.cache
            .write()
            .await
            .put(key, items.clone(), Some(self.settings.search_ttl));
        Ok(items)
    }

    /// Fetches consecutive pages until `cap` products have accumulated or
    /// the upstream runs dry, then deduplicates and truncates.
    pub async fn collect_pages(
        &self,
        token: &str,
        term: &str,
        location_id: &str,
        cap: usize,
    ) -> Vec<Product> {
        let page_size = self.settings.page_size.clamp(1, MAX_PAGE_SIZE);
        let mut collected: Vec<Product> = Vec::new();
        let mut start = 0;

        while collected.len() < cap {
            let query = product_filters(term, location_id)
                .with("filter.limit", page_size)
                .with("filter.start", start);

            let batch = match self.upstream.fetch(Endpoint::Products, &query, token).await {
                Ok(batch) => batch,
                Err(err) => {
                    warn!(
                        "Aggregation for '{}' stopped at offset {}: {}",
                        term, start, err
                    );
                    break;
                }
            };
            if batch.is_empty() {
                break;
            }

            let fetched = batch.len();
            collected.extend(parse_products(batch).into_iter().map(|mut product| {
                product.normalize_images();
                product
            }));
            start += page_size;

            if fetched < page_size {
                break;
            }
        }

        let mut deduped = dedupe_by_identity(collected);
        deduped.truncate(cap);
        deduped
    }

    // == Multi-seed Aggregation ==

    /// Sale items gathered by searching every seed term, at most
    /// `seed_concurrency` upstream calls in flight at once.
    pub async fn sales_all(&self, location_id: &str, max: i64) -> Result<Vec<Product>> {
        let cap = if max > 0 {
            max as usize
        } else {
            DEFAULT_SALES_ALL_MAX
        };
        let token = self.tokens.get_token().await?;
        let merged = self.collect_seeds(&token, location_id).await;

        Ok(merged.into_iter().filter(is_on_sale).take(cap).collect())
    }

    /// Results of all seed searches merged in seed order and deduplicated.
    pub async fn collect_seeds(&self, token: &str, location_id: &str) -> Vec<Product> {
        let permits = self.settings.seed_concurrency.clamp(1, MAX_SEED_CONCURRENCY);
        let semaphore = Semaphore::new(permits);
        let semaphore = &semaphore;

        let fetches = self.settings.seeds.iter().map(|seed| async move {
            let _permit = semaphore.acquire().await.ok();
            let query = product_filters(seed, location_id).with("filter.limit", MAX_PAGE_SIZE);
            match self.upstream.fetch(Endpoint::Products, &query, token).await {
                Ok(batch) => parse_products(batch),
                Err(err) => {
                    warn!("Seed '{}' contributed nothing: {}", seed, err);
                    Vec::new()
                }
            }
        });

        let batches = join_all(fetches).await;
        dedupe_by_identity(batches.into_iter().flatten().collect())
    }
}

fn product_filters(term: &str, location_id: &str) -> Filters {
    Filters::new()
        .with("filter.term", term)
        .with("filter.locationId", location_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::upstream::DEV_TOKEN;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn record(id: &str, regular: f64, promo: Option<f64>) -> Value {
        let mut price = json!({ "regular": regular });
        if let Some(promo) = promo {
            price["promo"] = json!(promo);
        }
        json!({
            "productId": id,
            "description": format!("Item {}", id),
            "items": [{ "price": price }]
        })
    }

    /// Serves pre-scripted pages keyed by `filter.start`, or per-term
    /// results keyed by `filter.term`, and records every call.
    #[derive(Default)]
    struct ScriptedUpstream {
        pages: HashMap<i64, Vec<Value>>,
        by_term: HashMap<String, Vec<Value>>,
        failing_terms: HashSet<String>,
        fail_from_start: Option<i64>,
        delay: Option<Duration>,
        calls: Mutex<Vec<Filters>>,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
    }

    impl ScriptedUpstream {
        fn calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Upstream for ScriptedUpstream {
        async fn fetch(&self, _: Endpoint, filters: &Filters, _: &str) -> Result<Vec<Value>> {
            self.calls.lock().unwrap().push(filters.clone());
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let start = filters.get_number("filter.start").unwrap_or(0);
            let term = filters.get("filter.term").unwrap_or_default().to_string();
            if self.fail_from_start.is_some_and(|from| start >= from)
                || self.failing_terms.contains(&term)
            {
                return Err(GatewayError::UpstreamHttp {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            if let Some(items) = self.by_term.get(&term) {
                return Ok(items.clone());
            }
            Ok(self.pages.get(&start).cloned().unwrap_or_default())
        }
    }

    fn aggregator(upstream: Arc<ScriptedUpstream>, settings: AggregatorSettings) -> Aggregator {
        let clock = Arc::new(ManualClock::new(0));
        Aggregator::new(
            upstream,
            Arc::new(TokenManager::offline(clock.clone())),
            ResultCache::new(settings.search_ttl, clock),
            settings,
        )
    }

    fn paged_settings(page_size: usize) -> AggregatorSettings {
        AggregatorSettings {
            page_size,
            ..Default::default()
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().filter_map(Product::identity).collect()
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let products = parse_products(vec![
            json!({"productId": "a", "description": "first"}),
            json!({"upc": "b"}),
            json!({"productId": "a", "description": "second"}),
            json!({"description": "anonymous"}),
            json!({"description": "anonymous"}),
            json!({"productId": "b"}),
        ]);
        let out = dedupe_by_identity(products);

        assert_eq!(out.len(), 4);
        assert_eq!(out[0].description(), "first");
        assert_eq!(out[1].identity(), Some("b"));
    }

    #[test]
    fn test_dedupe_empty_product_id_falls_back_to_upc() {
        let products = parse_products(vec![
            json!({"productId": "", "upc": "U1", "description": "first"}),
            json!({"productId": "", "upc": "U1", "description": "second"}),
            json!({"productId": "U1"}),
        ]);
        let out = dedupe_by_identity(products);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].description(), "first");
    }

    #[test]
    fn test_search_all_cap() {
        assert_eq!(search_all_cap(10), 10);
        assert_eq!(search_all_cap(0), 300);
        assert_eq!(search_all_cap(-1), 300);
        assert_eq!(search_all_cap(1000), 400);
    }

    #[tokio::test]
    async fn test_paged_dedupes_across_pages_in_first_seen_order() {
        let upstream = Arc::new(ScriptedUpstream {
            pages: HashMap::from([
                (0, vec![record("1", 2.0, None), record("2", 2.0, None)]),
                (2, vec![record("2", 2.0, None), record("3", 2.0, None)]),
                (4, vec![record("4", 2.0, None), record("1", 2.0, None)]),
                (6, vec![record("5", 2.0, None)]),
            ]),
            ..Default::default()
        });
        let agg = aggregator(upstream.clone(), paged_settings(2));

        let out = agg.collect_pages(DEV_TOKEN, "chips", "loc", 10).await;

        assert_eq!(ids(&out), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(upstream.calls(), 4);
    }

    #[tokio::test]
    async fn test_paged_stops_once_cap_reached() {
        let pages = (0..10)
            .map(|i| {
                (
                    i * 2,
                    vec![
                        record(&format!("{}a", i), 1.0, None),
                        record(&format!("{}b", i), 1.0, None),
                    ],
                )
            })
            .collect();
        let upstream = Arc::new(ScriptedUpstream {
            pages,
            ..Default::default()
        });
        let agg = aggregator(upstream.clone(), paged_settings(2));

        let out = agg.collect_pages(DEV_TOKEN, "x", "loc", 5).await;

        assert_eq!(out.len(), 5);
        assert_eq!(upstream.calls(), 3);
    }

    #[tokio::test]
    async fn test_paged_stops_on_empty_page() {
        let upstream = Arc::new(ScriptedUpstream {
            pages: HashMap::from([(0, vec![record("1", 1.0, None), record("2", 1.0, None)])]),
            ..Default::default()
        });
        let agg = aggregator(upstream.clone(), paged_settings(2));

        let out = agg.collect_pages(DEV_TOKEN, "x", "loc", 10).await;

        assert_eq!(out.len(), 2);
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test]
    async fn test_paged_failure_returns_partial_results() {
        let upstream = Arc::new(ScriptedUpstream {
            pages: HashMap::from([
                (0, vec![record("1", 1.0, None), record("2", 1.0, None)]),
                (2, vec![record("3", 1.0, None), record("4", 1.0, None)]),
            ]),
            fail_from_start: Some(2),
            ..Default::default()
        });
        let agg = aggregator(upstream, paged_settings(2));

        let out = agg.collect_pages(DEV_TOKEN, "x", "loc", 10).await;

        assert_eq!(ids(&out), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_search_all_uses_cache_until_fresh() {
        let upstream = Arc::new(ScriptedUpstream {
            pages: HashMap::from([(0, vec![record("1", 1.0, None)])]),
            ..Default::default()
        });
        let agg = aggregator(upstream.clone(), paged_settings(50));

        let first = agg.search_all("Milk", "loc", 10, false).await.unwrap();
        let second = agg.search_all(" milk ", "loc", 10, false).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(upstream.calls(), 1);

        agg.search_all("milk", "loc", 10, true).await.unwrap();
        assert_eq!(upstream.calls(), 2);

        let stats = agg.cache_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.writes, 2);
    }

    #[tokio::test]
    async fn test_search_all_refetches_after_ttl() {
        let upstream = Arc::new(ScriptedUpstream {
            pages: HashMap::from([(0, vec![record("1", 1.0, None)])]),
            ..Default::default()
        });
        let clock = Arc::new(ManualClock::new(0));
        let agg = Aggregator::new(
            upstream.clone(),
            Arc::new(TokenManager::offline(clock.clone())),
            ResultCache::new(120, clock.clone()),
            AggregatorSettings::default(),
        );

        agg.search_all("milk", "loc", 10, false).await.unwrap();
        clock.advance_secs(119);
        agg.search_all("milk", "loc", 10, false).await.unwrap();
        assert_eq!(upstream.calls(), 1);

        clock.advance_secs(1);
        agg.search_all("milk", "loc", 10, false).await.unwrap();
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test]
    async fn test_sales_all_isolates_failing_seeds() {
        let upstream = Arc::new(ScriptedUpstream {
            by_term: HashMap::from([
                (
                    "milk".to_string(),
                    vec![record("m1", 4.0, Some(3.0)), record("m2", 4.0, None)],
                ),
                (
                    "cheese".to_string(),
                    vec![record("c1", 3.0, Some(2.0)), record("m1", 4.0, Some(3.0))],
                ),
            ]),
            failing_terms: HashSet::from(["bread".to_string()]),
            ..Default::default()
        });
        let settings = AggregatorSettings {
            seeds: vec!["milk".into(), "bread".into(), "cheese".into()],
            ..Default::default()
        };
        let agg = aggregator(upstream.clone(), settings);

        let out = agg.sales_all("loc", 150).await.unwrap();

        assert_eq!(ids(&out), vec!["m1", "c1"]);
        assert_eq!(upstream.calls(), 3);
    }

    #[tokio::test]
    async fn test_sales_all_truncates_to_max() {
        let upstream = Arc::new(ScriptedUpstream {
            by_term: HashMap::from([(
                "a".to_string(),
                (0..10)
                    .map(|i| record(&i.to_string(), 5.0, Some(1.0)))
                    .collect(),
            )]),
            ..Default::default()
        });
        let settings = AggregatorSettings {
            seeds: vec!["a".into()],
            ..Default::default()
        };
        let agg = aggregator(upstream, settings);

        assert_eq!(agg.sales_all("loc", 3).await.unwrap().len(), 3);
        assert_eq!(agg.sales_all("loc", 0).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_seed_fan_out_respects_concurrency_ceiling() {
        let upstream = Arc::new(ScriptedUpstream {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });
        let agg = aggregator(upstream.clone(), AggregatorSettings::default());

        agg.collect_seeds(DEV_TOKEN, "loc").await;

        assert_eq!(upstream.calls(), SALE_SEEDS.len());
        let peak = upstream.peak_in_flight.load(Ordering::SeqCst);
        assert!(peak <= 5, "peak in-flight was {}", peak);
        assert!(peak > 1, "seeds should run concurrently");
    }

    #[tokio::test]
    async fn test_oversized_seed_concurrency_is_capped() {
        let upstream = Arc::new(ScriptedUpstream {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });
        let settings = AggregatorSettings {
            seed_concurrency: 14,
            ..Default::default()
        };
        let agg = aggregator(upstream.clone(), settings);

        agg.collect_seeds(DEV_TOKEN, "loc").await;

        let peak = upstream.peak_in_flight.load(Ordering::SeqCst);
        assert!(peak <= MAX_SEED_CONCURRENCY, "peak in-flight was {}", peak);
    }

    #[test]
    fn test_from_config_caps_seed_concurrency() {
        let config = Config {
            seed_concurrency: 14,
            ..Default::default()
        };
        let agg = Aggregator::from_config(&config);
        assert_eq!(agg.settings().seed_concurrency, MAX_SEED_CONCURRENCY);

        let zero = Config {
            seed_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(Aggregator::from_config(&zero).settings().seed_concurrency, 1);
    }

    #[tokio::test]
    async fn test_single_shot_search_propagates_errors() {
        let upstream = Arc::new(ScriptedUpstream {
            fail_from_start: Some(0),
            ..Default::default()
        });
        let agg = aggregator(upstream, AggregatorSettings::default());

        let err = agg
            .search("milk", "loc", 0, &ProductFilters::with_limit(10))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::UpstreamHttp { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_dev_search_all_matches_fixture() {
        let agg = Aggregator::dev();

        let chips = agg.search_all("chips", "01400943", 10, false).await.unwrap();
        assert_eq!(ids(&chips), vec!["0000000000003"]);

        let everything = agg.search_all("", "01400943", 0, false).await.unwrap();
        assert_eq!(everything.len(), 5);
    }

    #[tokio::test]
    async fn test_dev_sales_all_only_sale_items() {
        let agg = Aggregator::dev();

        let out = agg.sales_all("01400943", 150).await.unwrap();
        assert_eq!(
            ids(&out),
            vec!["0000000000001", "0000000000003", "0000000000004", "0000000000005"]
        );
        assert!(out.iter().all(is_on_sale));
    }

    #[tokio::test]
    async fn test_dev_product_details() {
        let agg = Aggregator::dev();

        let product = agg.product_details("0000000000001", "loc").await.unwrap();
        assert_eq!(
            product.get("productPageUrl"),
            Some(&json!("https://www.kroger.com/p/demo-product"))
        );

        let missing = agg.product_details("nope", "loc").await.unwrap_err();
        assert!(matches!(missing, GatewayError::NotFound(_)));
    }
}
