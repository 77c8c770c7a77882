//! Cart Store
//!
//! Insertion-ordered cart keyed by product id.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GatewayError, Result};

// == Cart Item ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub description: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Value>>,
}

fn default_quantity() -> u32 {
    1
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price.unwrap_or(0.0) * self.quantity as f64
    }
}

// == Cart ==
#[derive(Debug, Default)]
pub struct Cart {
    items: IndexMap<String, CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item`, merging its quantity into an existing line for the same
    /// product.
    pub fn add(&mut self, item: CartItem) {
        match self.items.get_mut(&item.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => {
                self.items.insert(item.product_id.clone(), item);
            }
        }
    }

    pub fn remove(&mut self, product_id: &str) -> Result<CartItem> {
        self.items
            .shift_remove(product_id)
            .ok_or_else(|| GatewayError::NotFound("Item not found in cart".to_string()))
    }

    /// Sets the quantity of an existing line. Zero or negative is rejected.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<()> {
        let item = self
            .items
            .get_mut(product_id)
            .ok_or_else(|| GatewayError::NotFound("Item not found in cart".to_string()))?;
        if quantity <= 0 {
            return Err(GatewayError::InvalidRequest(
                "Quantity must be greater than 0".to_string(),
            ));
        }
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price times quantity, rounded to cents.
    pub fn total(&self) -> f64 {
        let total: f64 = self.items.values().map(CartItem::line_total).sum();
        (total * 100.0).round() / 100.0
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|i| i.quantity as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: Option<f64>, quantity: u32) -> CartItem {
        CartItem {
            product_id: id.to_string(),
            description: format!("Item {}", id),
            brand: None,
            price,
            quantity,
            images: None,
        }
    }

    #[test]
    fn test_add_merges_quantities() {
        let mut cart = Cart::new();
        cart.add(item("X", Some(1.0), 2));
        cart.add(item("X", Some(1.0), 3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items().next().unwrap().quantity, 5);
    }

    #[test]
    fn test_total_rounds_and_ignores_missing_price() {
        let mut cart = Cart::new();
        cart.add(item("a", Some(0.1), 3));
        cart.add(item("b", None, 4));
        cart.add(item("c", Some(2.499), 1));

        assert_eq!(cart.total(), 2.8);
        assert_eq!(cart.item_count(), 8);
    }

    #[test]
    fn test_remove_and_missing() {
        let mut cart = Cart::new();
        cart.add(item("a", None, 1));
        cart.add(item("b", None, 1));

        assert!(cart.remove("a").is_ok());
        assert!(matches!(cart.remove("a"), Err(GatewayError::NotFound(_))));
        assert_eq!(cart.items().next().unwrap().product_id, "b");
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(item("a", None, 1));

        cart.set_quantity("a", 7).unwrap();
        assert_eq!(cart.item_count(), 7);
        assert!(matches!(
            cart.set_quantity("a", 0),
            Err(GatewayError::InvalidRequest(_))
        ));
        assert!(matches!(
            cart.set_quantity("zzz", 1),
            Err(GatewayError::NotFound(_))
        ));
    }

    #[test]
    fn test_deserialize_defaults_quantity() {
        let parsed: CartItem =
            serde_json::from_str(r#"{"productId":"1","description":"Milk"}"#).unwrap();
        assert_eq!(parsed.quantity, 1);
        assert!(parsed.brand.is_none());
    }
}
