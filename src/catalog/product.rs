//! Product Module
//!
//! Typed view over the upstream's product records. The record itself is kept
//! as received and serialized back unchanged; accessors read fields of the
//! wrong shape as absent.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

// == Price ==
/// Numeric reading of one variant's `price` object.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Price {
    pub regular: Option<f64>,
    pub promo: Option<f64>,
}

impl Price {
    pub fn new(regular: Option<f64>, promo: Option<f64>) -> Self {
        Self { regular, promo }
    }

    /// Reads a `price` value. Non-objects have no price; non-numeric fields
    /// read as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            regular: obj.get("regular").and_then(Value::as_f64),
            promo: obj.get("promo").and_then(Value::as_f64),
        })
    }
}

// == Product ==
/// A product as returned by the upstream search endpoint.
///
/// Only `normalize_images` and `attach_page_url` ever change the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product {
    record: Map<String, Value>,
}

impl Product {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.record.get(key).and_then(Value::as_str)
    }

    fn id_field(&self, key: &str) -> Option<&str> {
        self.text(key).filter(|id| !id.is_empty())
    }

    /// Identity used for deduplication: `productId`, falling back to `upc`.
    /// Empty strings count as absent.
    pub fn identity(&self) -> Option<&str> {
        self.id_field("productId").or_else(|| self.id_field("upc"))
    }

    pub fn description(&self) -> &str {
        self.text("description").unwrap_or_default()
    }

    pub fn brand(&self) -> Option<&str> {
        self.text("brand")
    }

    /// String entries of `categories`.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.record
            .get("categories")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// Item variants, in upstream order. Entries of any shape are kept.
    pub fn items(&self) -> &[Value] {
        self.record
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Price of the first item variant, if any.
    pub fn first_price(&self) -> Option<Price> {
        self.items().first()?.get("price").and_then(Price::from_value)
    }

    /// Rewrites every image size object to `{size, url}`. Entries that are
    /// not objects are left as they are.
    pub fn normalize_images(&mut self) {
        let Some(Value::Array(images)) = self.record.get_mut("images") else {
            return;
        };
        for image in images.iter_mut().filter_map(Value::as_object_mut) {
            let Some(Value::Array(sizes)) = image.get_mut("sizes") else {
                continue;
            };
            for entry in sizes.iter_mut() {
                let Some(obj) = entry.as_object() else {
                    continue;
                };
                let size = match obj.get("size") {
                    Some(Value::String(s)) => s.clone(),
                    None | Some(Value::Null) => String::new(),
                    Some(other) => other.to_string(),
                };
                let url = obj.get("url").cloned().unwrap_or(Value::Null);
                *entry = json!({ "size": size, "url": url });
            }
        }
    }

    /// Relative product page URI, under either spelling the upstream uses.
    pub fn page_uri(&self) -> Option<&str> {
        ["productPageURI", "productPageUri"]
            .iter()
            .find_map(|key| self.text(key))
    }

    /// Adds an absolute `productPageUrl` when the upstream gave a relative URI.
    pub fn attach_page_url(&mut self, site_base: &str) {
        let url = match self.page_uri() {
            Some(uri) if uri.starts_with('/') => format!("{}{}", site_base, uri),
            _ => return,
        };
        self.record
            .insert("productPageUrl".to_string(), Value::String(url));
    }
}

/// Parses the upstream `data` array, skipping entries that are not objects.
pub fn parse_products(raw: Vec<Value>) -> Vec<Product> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Product>(value) {
            Ok(product) => Some(product),
            Err(err) => {
                debug!("Skipping malformed product entry: {}", err);
                None
            }
        })
        .collect()
}
