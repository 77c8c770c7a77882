//! API Handlers
//!
//! HTTP request handlers for health, stats, location and product endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::catalog::{Aggregator, Product};
use crate::error::Result;
use crate::models::{
    DetailsQuery, HealthResponse, NearbyQuery, SalesAllQuery, SalesQuery, SearchAllQuery,
    SearchQuery, StatsResponse,
};
use crate::shopping::{Cart, ListStore};

/// Application state shared across all handlers.
///
/// The aggregator owns the token slot and result cache; cart and lists sit
/// behind their own locks.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Aggregator>,
    pub cart: Arc<RwLock<Cart>>,
    pub lists: Arc<RwLock<ListStore>>,
}

impl AppState {
    /// Creates a new AppState around the given aggregator with empty stores.
    pub fn new(catalog: Aggregator) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cart: Arc::new(RwLock::new(Cart::new())),
            lists: Arc::new(RwLock::new(ListStore::new())),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Selects fixture or live upstream data based on `config.dev_mode`.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(Aggregator::from_config(config))
    }

    /// Fixture-backed state, used by tests and local demos.
    pub fn dev() -> Self {
        Self::new(Aggregator::dev())
    }
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.catalog.is_dev_mode()))
}

/// Handler for GET /stats
///
/// Returns result cache statistics and the token exchange count.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.catalog.cache_stats().await;
    Json(StatsResponse::new(&stats, state.catalog.token_exchanges()))
}

/// Handler for GET /api/locations/nearby
pub async fn locations_nearby_handler(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<Value>>> {
    let locations = state
        .catalog
        .nearby_locations(&query.zip_code, query.radius, query.limit)
        .await?;
    Ok(Json(locations))
}

/// Handler for GET /api/products/search
///
/// One upstream page with brand, category, price and sale filters applied.
pub async fn products_search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .catalog
        .search(&query.term, &query.location_id, query.start, &query.filters())
        .await?;
    Ok(Json(products))
}

/// Handler for GET /api/products/search/all
///
/// Cached, deduplicated multi-page aggregation.
pub async fn products_search_all_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchAllQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .catalog
        .search_all(&query.term, &query.location_id, query.max, query.fresh)
        .await?;
    Ok(Json(products))
}

/// Handler for GET /api/products/sales
pub async fn products_sales_handler(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .catalog
        .sales(&query.location_id, &query.term, query.limit)
        .await?;
    Ok(Json(products))
}

/// Handler for GET /api/products/sales/all
///
/// Sale items gathered across the seed terms.
pub async fn products_sales_all_handler(
    State(state): State<AppState>,
    Query(query): Query<SalesAllQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .catalog
        .sales_all(&query.location_id, query.max)
        .await?;
    Ok(Json(products))
}

/// Handler for GET /api/products/details
pub async fn product_details_handler(
    State(state): State<AppState>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<Product>> {
    let product = state
        .catalog
        .product_details(&query.product_id, &query.location_id)
        .await?;
    Ok(Json(product))
}
