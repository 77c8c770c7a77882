//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::shopping::{Cart, CartItem};

/// One line of the cart as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    pub description: String,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub quantity: u32,
}

impl From<&CartItem> for CartLine {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.product_id.clone(),
            product_id: item.product_id.clone(),
            description: item.description.clone(),
            brand: item.brand.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Response body for every cart endpoint that returns the cart
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    /// Sum of price x quantity, rounded to cents
    pub total: f64,
}

impl CartResponse {
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            items: cart.items().map(CartLine::from).collect(),
            total: cart.total(),
        }
    }
}

/// Response body for GET /api/cart/total
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotalResponse {
    pub total: f64,
    pub item_count: u64,
    pub unique_items: usize,
}

impl CartTotalResponse {
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            total: cart.total(),
            item_count: cart.item_count(),
            unique_items: cart.len(),
        }
    }
}

/// Generic acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    /// Entries currently held, expired ones included
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Credential exchanges performed since startup
    pub token_exchanges: u64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, token_exchanges: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            token_exchanges,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: String,
    /// "dev" when serving fixtures, "live" otherwise
    pub mode: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok(dev_mode: bool) -> Self {
        Self {
            status: "ok".to_string(),
            mode: if dev_mode { "dev" } else { "live" }.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with_items() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartItem {
            product_id: "1".to_string(),
            description: "Milk".to_string(),
            brand: Some("Simple Truth".to_string()),
            price: Some(3.99),
            quantity: 2,
            images: None,
        });
        cart
    }

    #[test]
    fn test_cart_response_serialize() {
        let resp = CartResponse::from_cart(&cart_with_items());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["items"][0]["id"], "1");
        assert_eq!(json["items"][0]["productId"], "1");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["total"], 7.98);
    }

    #[test]
    fn test_cart_total_response() {
        let resp = CartTotalResponse::from_cart(&cart_with_items());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["itemCount"], 2);
        assert_eq!(json["uniqueItems"], 1);
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            writes: 5,
            total_entries: 3,
        };
        let resp = StatsResponse::new(&stats, 1);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.token_exchanges, 1);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::ok(true);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""status":"ok""#));
        assert!(json.contains(r#""mode":"dev""#));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
