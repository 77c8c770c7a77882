//! Product Filters Module
//!
//! Post-hoc predicates applied to any result set, live or fixture.

use super::product::Product;
use super::sale::{effective_price, is_on_sale};

/// Largest number of products a filtered search may return.
pub const MAX_FILTER_LIMIT: usize = 200;

// == Product Filters ==
/// Filter set for a single search request.
///
/// Filters compose by intersection in a fixed order (sale, brand, category,
/// min price, max price) and the result is truncated to `limit` last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub on_sale_only: bool,
    /// Case-insensitive substring of brand or description
    pub brand: Option<String>,
    /// Case-insensitive substring of any category
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Requested size, clamped to `[1, MAX_FILTER_LIMIT]`
    pub limit: i64,
}

impl ProductFilters {
    pub fn with_limit(limit: i64) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_FILTER_LIMIT as i64) as usize
    }

    /// Returns true when `product` passes every configured predicate.
    pub fn matches(&self, product: &Product) -> bool {
        if self.on_sale_only && !is_on_sale(product) {
            return false;
        }

        if let Some(brand) = non_blank(&self.brand) {
            let needle = brand.to_lowercase();
            let in_brand = product
                .brand()
                .is_some_and(|b| b.to_lowercase().contains(&needle));
            if !in_brand && !product.description().to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(category) = non_blank(&self.category) {
            let needle = category.to_lowercase();
            if !product
                .categories()
                .any(|c| c.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        // Missing price sorts above every bound.
        let price = effective_price(product).unwrap_or(f64::INFINITY);
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        true
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products
            .into_iter()
            .filter(|p| self.matches(p))
            .take(self.effective_limit())
            .collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
