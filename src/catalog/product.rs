//! Product entity
//!
//! The only resource managed by the API.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A stored product
///
/// `price` keeps the JSON number as the caller sent it, except that a
/// whole-valued float is stored in integer form (see [`canonical_price`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// Every field of a product except its id
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// Largest magnitude below which every whole `f64` is exact
const MAX_EXACT_WHOLE: f64 = 9_007_199_254_740_992.0;

/// Write a whole-valued float price in integer form
///
/// `25.0` becomes `25`; `25.5`, integers and floats too large to be exact
/// are returned unchanged.
pub fn canonical_price(price: Number) -> Number {
    if !price.is_f64() {
        return price;
    }
    match price.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < MAX_EXACT_WHOLE => {
            Number::from(value as i64)
        }
        _ => price,
    }
}

impl Product {
    /// Build a product from a draft under the given id
    pub fn from_draft(id: impl Into<String>, draft: ProductDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            in_stock: draft.in_stock,
        }
    }

    /// Case-insensitive exact category match
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Case-insensitive substring match against the name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}
