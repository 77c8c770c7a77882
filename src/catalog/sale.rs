//! Sale Predicate Module
//!
//! Derives "on sale" status and the effective price from a product's first
//! item variant. Other variants are never consulted.

use super::product::Product;

/// Returns true when the first variant's promo price is positive and below
/// the regular price (or there is no regular price at all).
///
/// Missing or malformed price data classifies as not on sale.
pub fn is_on_sale(product: &Product) -> bool {
    let Some(price) = product.first_price() else {
        return false;
    };

    match price.promo {
        Some(promo) if promo > 0.0 => price.regular.map_or(true, |regular| promo < regular),
        _ => false,
    }
}

/// Promo price when it is positive, otherwise the regular price.
pub fn effective_price(product: &Product) -> Option<f64> {
    let price = product.first_price()?;
    price.promo.filter(|promo| *promo > 0.0).or(price.regular)
}
