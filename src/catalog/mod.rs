//! Catalog Module
//!
//! Product model, sale derivation, filtering and the aggregator that ties
//! them to the upstream source and the result cache.

pub mod aggregator;
mod filters;
mod product;
mod sale;


pub use aggregator::{dedupe_by_identity, Aggregator, AggregatorSettings, SALE_SEEDS};
pub use filters::{ProductFilters, MAX_FILTER_LIMIT};
pub use product::{parse_products, Price, Product};
pub use sale::{effective_price, is_on_sale};
