//! # Response Formatting
//!
//! Response bodies for the product routes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Product;

/// Filtered, paginated listing
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    /// Matches after filtering, before pagination
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub results: Vec<Product>,
}

/// Aggregate counts over the whole catalog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_products: usize,
    pub count_by_category: BTreeMap<String, usize>,
}

impl StatsResponse {
    /// Count products per stored category in one pass
    pub fn collect<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut total_products = 0;
        let mut count_by_category = BTreeMap::new();
        for product in products {
            total_products += 1;
            *count_by_category
                .entry(product.category.clone())
                .or_insert(0) += 1;
        }
        Self {
            total_products,
            count_by_category,
        }
    }
}

/// Confirmation for a removed product
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub product: Product,
}

impl DeleteResponse {
    pub fn removed(product: Product) -> Self {
        Self {
            message: "Product deleted successfully.".to_string(),
            product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_products;
    use serde_json::json;

    #[test]
    fn test_stats_counts_each_category() {
        let products = sample_products();
        let stats = StatsResponse::collect(&products);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            json!({
                "totalProducts": 3,
                "countByCategory": { "electronics": 2, "kitchen": 1 }
            })
        );
    }

    #[test]
    fn test_stats_on_empty_catalog() {
        let stats = StatsResponse::collect(&Vec::<Product>::new());
        assert_eq!(stats.total_products, 0);
        assert!(stats.count_by_category.is_empty());
    }

    #[test]
    fn test_delete_response_serialization() {
        let product = sample_products().remove(2);
        let json = serde_json::to_value(DeleteResponse::removed(product)).unwrap();
        assert_eq!(json["message"], "Product deleted successfully.");
        assert_eq!(json["product"]["id"], "3");
        assert_eq!(json["product"]["inStock"], false);
    }
}
