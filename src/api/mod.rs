//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /health`, `GET /stats`
//! - `GET /api/locations/nearby`
//! - `GET /api/products/{search,search/all,sales,sales/all,details}`
//! - `/api/cart/*` and `/api/lists/*`

pub mod handlers;
pub mod routes;
pub mod shopping;

pub use handlers::*;
pub use routes::create_router;
