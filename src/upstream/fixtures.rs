//! Dev-mode fixture source
//!
//! Serves a fixed set of sample products and stores in place of the
//! upstream API, honouring the same filters the live API does.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Endpoint, Filters, Upstream, MAX_PAGE_SIZE};
use crate::catalog::{parse_products, Product};
use crate::error::Result;

/// Raw sample product records.
pub fn sample_product_records() -> Vec<Value> {
    vec![
        json!({
            "productId": "0000000000001",
            "description": "Simple Truth Organic 2% Milk 64 oz",
            "brand": "Simple Truth",
            "categories": ["Dairy & Eggs"],
            "items": [{"price": {"regular": 4.99, "promo": 3.99}}]
        }),
        json!({
            "productId": "0000000000002",
            "description": "Kroger White Sandwich Bread 20 oz",
            "brand": "Kroger",
            "categories": ["Bakery"],
            "items": [{"price": {"regular": 2.49}}]
        }),
        json!({
            "productId": "0000000000003",
            "description": "Lay's Classic Potato Chips 8 oz",
            "brand": "Lay's",
            "categories": ["Snacks", "Chips"],
            "items": [{"price": {"regular": 4.49, "promo": 2.99}}]
        }),
        json!({
            "productId": "0000000000004",
            "description": "Coca-Cola 12pk 12 fl oz Cans",
            "brand": "Coca-Cola",
            "categories": ["Beverages"],
            "items": [{"price": {"regular": 8.99, "promo": 6.99}}]
        }),
        json!({
            "productId": "0000000000005",
            "description": "Kroger Shredded Cheddar Cheese 8 oz",
            "brand": "Kroger",
            "categories": ["Dairy & Eggs", "Cheese"],
            "items": [{"price": {"regular": 3.49, "promo": 2.99}}]
        }),
    ]
}

/// Sample products, parsed.
pub fn sample_products() -> Vec<Product> {
    parse_products(sample_product_records())
}

pub fn sample_locations() -> Vec<Value> {
    vec![
        json!({
            "locationId": "01600425",
            "name": "Kroger Cemetery Rd",
            "address": {"city": "Hilliard", "state": "OH"}
        }),
        json!({
            "locationId": "01400462",
            "name": "Kroger Greenbriar",
            "address": {"city": "Grove City", "state": "OH"}
        }),
        json!({
            "locationId": "01400322",
            "name": "Kroger Stringtown Rd",
            "address": {"city": "Grove City", "state": "OH"}
        }),
    ]
}

/// Case-insensitive substring match over description and brand.
fn matches_term(record: &Value, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let description = record["description"].as_str().unwrap_or_default();
    let brand = record["brand"].as_str().unwrap_or_default();
    format!("{} {}", description, brand)
        .to_lowercase()
        .contains(term)
}

/// Adds the demo detail fields a live product detail lookup would carry.
fn with_demo_details(mut record: Value) -> Value {
    if let Some(obj) = record.as_object_mut() {
        obj.entry("fulfillment").or_insert_with(|| {
            json!({"instore": true, "curbside": true, "delivery": true, "shiptohome": false})
        });
        if let Some(Value::Array(items)) = obj.get_mut("items") {
            for item in items.iter_mut().filter_map(Value::as_object_mut) {
                item.entry("inventory")
                    .or_insert_with(|| json!({"stockLevel": "HIGH"}));
                item.entry("aisleLocations").or_insert_with(|| {
                    json!([{"aisleNumber": "12", "bayNumber": "B", "shelfNumber": "3"}])
                });
            }
        }
        obj.entry("productPageURI")
            .or_insert_with(|| json!("/p/demo-product"));
    }
    record
}

// == Fixture Upstream ==
/// In-process stand-in for the upstream API.
#[derive(Debug, Clone)]
pub struct FixtureUpstream {
    products: Vec<Value>,
    locations: Vec<Value>,
}

impl Default for FixtureUpstream {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureUpstream {
    pub fn new() -> Self {
        Self {
            products: sample_product_records(),
            locations: sample_locations(),
        }
    }

    fn products(&self, filters: &Filters) -> Vec<Value> {
        if let Some(product_id) = filters.get("filter.productId") {
            return self
                .products
                .iter()
                .find(|p| p["productId"].as_str() == Some(product_id))
                .cloned()
                .map(with_demo_details)
                .into_iter()
                .collect();
        }

        let term = filters
            .get("filter.term")
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let start = filters.get_number("filter.start").unwrap_or(0).max(0) as usize;
        let limit = filters
            .get_number("filter.limit")
            .unwrap_or(MAX_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as usize;

        self.products
            .iter()
            .filter(|p| matches_term(p, &term))
            .skip(start)
            .take(limit)
            .cloned()
            .collect()
    }

    fn locations(&self, filters: &Filters) -> Vec<Value> {
        let limit = filters
            .get_number("filter.limit")
            .unwrap_or(MAX_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as usize;
        self.locations.iter().take(limit).cloned().collect()
    }
}

#[async_trait]
impl Upstream for FixtureUpstream {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        filters: &Filters,
        _token: &str,
    ) -> Result<Vec<Value>> {
        Ok(match endpoint {
            Endpoint::Products => self.products(filters),
            Endpoint::Locations => self.locations(filters),
        })
    }
}
