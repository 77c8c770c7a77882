//! Grocery Gateway - An aggregation and caching layer over a grocery retail API
//!
//! Proxies product and location search, derives sale listings, aggregates
//! paginated results behind a short-lived cache, and keeps an in-memory
//! cart and shopping lists.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod shopping;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{GatewayError, Result};
