//! Sample catalog loaded at startup

use serde_json::Number;

use super::product::{Product, ProductDraft};

fn sample(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    category: &str,
    in_stock: bool,
) -> Product {
    Product::from_draft(
        id,
        ProductDraft {
            name: name.to_string(),
            description: description.to_string(),
            price: Number::from(price),
            category: category.to_string(),
            in_stock,
        },
    )
}

/// Three products with ids "1", "2" and "3"
pub fn sample_products() -> Vec<Product> {
    vec![
        sample(
            "1",
            "Laptop",
            "High-performance laptop with 16GB RAM",
            1200,
            "electronics",
            true,
        ),
        sample(
            "2",
            "Smartphone",
            "Latest model with 128GB storage",
            800,
            "electronics",
            true,
        ),
        sample(
            "3",
            "Coffee Maker",
            "Programmable coffee maker with timer",
            50,
            "kitchen",
            false,
        ),
    ]
}
