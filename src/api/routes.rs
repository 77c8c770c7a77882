//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, locations_nearby_handler, product_details_handler,
    products_sales_all_handler, products_sales_handler, products_search_all_handler,
    products_search_handler, stats_handler, AppState,
};
use super::shopping::{
    add_to_cart_handler, cart_total_handler, clear_cart_handler, create_list_handler,
    delete_list_handler, get_cart_handler, get_list_handler, list_lists_handler,
    remove_from_cart_handler, update_cart_handler, update_list_handler,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Liveness probe
/// - `GET /stats` - Result cache statistics
/// - `GET /api/locations/nearby` - Stores near a ZIP code
/// - `GET /api/products/search` - Single filtered page
/// - `GET /api/products/search/all` - Cached multi-page aggregation
/// - `GET /api/products/sales` - Sale items for one term
/// - `GET /api/products/sales/all` - Sale items across seed terms
/// - `GET /api/products/details` - One product with its page URL
/// - `/api/cart/*`, `/api/lists/*` - In-memory cart and lists
///
/// # Middleware
/// - CORS: Allows any origin, the web client is served separately
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/api/locations/nearby", get(locations_nearby_handler))
        .route("/api/products/search", get(products_search_handler))
        .route("/api/products/search/all", get(products_search_all_handler))
        .route("/api/products/sales", get(products_sales_handler))
        .route("/api/products/sales/all", get(products_sales_all_handler))
        .route("/api/products/details", get(product_details_handler))
        .route("/api/cart", get(get_cart_handler))
        .route("/api/cart/add", post(add_to_cart_handler))
        .route("/api/cart/remove/:product_id", delete(remove_from_cart_handler))
        .route("/api/cart/update/:product_id", put(update_cart_handler))
        .route(
            "/api/cart/clear",
            delete(clear_cart_handler).post(clear_cart_handler),
        )
        .route("/api/cart/total", get(cart_total_handler))
        .route("/api/lists", get(list_lists_handler).post(create_list_handler))
        .route(
            "/api/lists/:id",
            get(get_list_handler)
                .put(update_list_handler)
                .delete(delete_list_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
