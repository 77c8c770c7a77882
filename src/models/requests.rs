//! Request DTOs for the gateway API
//!
//! Query strings and JSON bodies accepted by the HTTP handlers.

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::ProductFilters;
use crate::shopping::CartItem;

fn default_radius() -> u32 {
    50
}

fn default_location_limit() -> i64 {
    50
}

fn default_search_limit() -> i64 {
    10
}

fn default_search_all_max() -> i64 {
    300
}

fn default_sales_limit() -> i64 {
    50
}

fn default_sales_all_max() -> i64 {
    150
}

fn default_cart_quantity() -> i64 {
    1
}

/// Query for GET /api/locations/nearby
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    pub zip_code: String,
    /// Search radius in miles
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default = "default_location_limit")]
    pub limit: i64,
}

/// Query for GET /api/products/search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub term: String,
    pub location_id: String,
    #[serde(default = "default_search_limit")]
    pub limit: i64,
    /// Offset passed to the upstream as `filter.start`
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub on_sale_only: bool,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl SearchQuery {
    pub fn filters(&self) -> ProductFilters {
        ProductFilters {
            on_sale_only: self.on_sale_only,
            brand: self.brand.clone(),
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            limit: self.limit,
        }
    }
}

/// Query for GET /api/products/search/all
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAllQuery {
    pub term: String,
    pub location_id: String,
    #[serde(default = "default_search_all_max")]
    pub max: i64,
    /// Bypass the result cache
    #[serde(default)]
    pub fresh: bool,
}

/// Query for GET /api/products/sales
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    pub location_id: String,
    pub term: String,
    #[serde(default = "default_sales_limit")]
    pub limit: i64,
}

/// Query for GET /api/products/sales/all
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesAllQuery {
    pub location_id: String,
    #[serde(default = "default_sales_all_max")]
    pub max: i64,
}

/// Query for GET /api/products/details
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsQuery {
    pub product_id: String,
    pub location_id: String,
}

/// Request body for POST /api/cart/add
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub description: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_cart_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub images: Option<Vec<Value>>,
}

impl AddToCartRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.product_id.trim().is_empty() {
            return Some("productId cannot be empty".to_string());
        }
        if self.quantity < 1 {
            return Some("Quantity must be at least 1".to_string());
        }
        if u32::try_from(self.quantity).is_err() {
            return Some("Quantity is too large".to_string());
        }
        None
    }

    pub fn into_item(self) -> CartItem {
        CartItem {
            product_id: self.product_id,
            description: self.description,
            brand: self.brand,
            price: self.price,
            quantity: u32::try_from(self.quantity).unwrap_or(1),
            images: self.images,
        }
    }
}

/// Request body for PUT /api/cart/update/:product_id
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: i64,
}

/// Request body for POST /api/lists
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl CreateListRequest {
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("List name cannot be empty".to_string());
        }
        None
    }
}

/// Request body for PUT /api/lists/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListRequest {
    pub name: Option<String>,
    pub items: Option<Vec<CartItem>>,
}
