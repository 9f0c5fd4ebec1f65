//! Catalogue products and client-side search.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Price, ProductId};

/// A product as listed by the backend. Read-only on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Image URL or path relative to the storefront's static assets.
    pub image: String,
}

impl Product {
    /// Unit price in the store currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::inr(self.price)
    }

    /// Case-insensitive substring match on the product name.
    ///
    /// An empty query matches every product.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Keep the products whose name contains `query`, ignoring case.
///
/// Order is preserved so the filtered grid reads like the full listing. The
/// query is used as typed: surrounding spaces are part of the match.
#[must_use]
pub fn filter_products(products: Vec<Product>, query: &str) -> Vec<Product> {
    if query.is_empty() {
        return products;
    }
    products.into_iter().filter(|p| p.matches(query)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::from(10),
            image: format!("img{id}.avif"),
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalogue = vec![product(1, "Apple"), product(2, "Bread"), product(3, "Grape")];
        let found = filter_products(catalogue, "ap");
        assert_eq!(names(&found), vec!["Apple", "Grape"]);
    }

    #[test]
    fn test_search_upper_case_query() {
        let catalogue = vec![product(1, "Lays"), product(2, "Milk")];
        assert_eq!(names(&filter_products(catalogue, "MIL")), vec!["Milk"]);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let catalogue = vec![product(1, "Lays"), product(2, "Milk")];
        assert_eq!(filter_products(catalogue, "").len(), 2);
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let catalogue = vec![product(1, "Lays"), product(2, "Milk")];
        assert!(filter_products(catalogue.clone(), "milk ").is_empty());
        assert!(filter_products(catalogue, "  ").is_empty());
    }

    #[test]
    fn test_no_match() {
        let catalogue = vec![product(1, "Lays")];
        assert!(filter_products(catalogue, "penuts").is_empty());
    }

    #[test]
    fn test_deserialize_backend_product() {
        let json = r#"{"id": 4, "name": "penuts", "price": 220, "image": "img5.avif"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProductId::new(4));
        assert_eq!(p.unit_price().to_string(), "₹220");
    }
}
