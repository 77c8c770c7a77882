//! Shopping Module
//!
//! In-memory cart and shopping-list state. Nothing here is persisted.

mod cart;
mod lists;

pub use cart::{Cart, CartItem};
pub use lists::{ListStore, ShoppingList};
