//! Shopping List Store

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use super::cart::CartItem;
use crate::error::{GatewayError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub name: String,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct ListStore {
    lists: IndexMap<String, ShoppingList>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: String, items: Vec<CartItem>) -> ShoppingList {
        let now = Utc::now();
        let list = ShoppingList {
            id: Uuid::new_v4().to_string(),
            name,
            items,
            created_at: now,
            updated_at: now,
        };
        self.lists.insert(list.id.clone(), list.clone());
        list
    }

    pub fn all(&self) -> Vec<ShoppingList> {
        self.lists.values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Result<ShoppingList> {
        self.lists.get(id).cloned().ok_or_else(not_found)
    }

    /// Replaces whichever of name/items are given and bumps `updated_at`.
    pub fn update(
        &mut self,
        id: &str,
        name: Option<String>,
        items: Option<Vec<CartItem>>,
    ) -> Result<ShoppingList> {
        let list = self.lists.get_mut(id).ok_or_else(not_found)?;
        if let Some(name) = name {
            list.name = name;
        }
        if let Some(items) = items {
            list.items = items;
        }
        list.updated_at = Utc::now();
        Ok(list.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.lists
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(not_found)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

fn not_found() -> GatewayError {
    GatewayError::NotFound("Shopping list not found".to_string())
}
