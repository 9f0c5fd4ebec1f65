//! Cart state mirrored from the backend.
//!
//! A [`Cart`] is a snapshot taken by a reload. It is replaced wholesale on
//! every reload and never patched locally; the total is derived from the
//! items each time it is read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Price, ProductId};

/// One cart line as returned by `GET /cart/{user_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Always at least 1; the backend deletes the line instead of storing 0.
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl CartItem {
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::inr(self.price)
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// The last loaded copy of a user's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Build a cart from freshly loaded items, keeping backend order.
    #[must_use]
    pub const fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Σ `price × quantity` over the current items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Quantity of `product_id` in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.quantity_of(product_id).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i32, name: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::from(price),
            quantity,
            image: None,
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.total().to_string(), "₹0");
    }

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let cart = Cart::from_items(vec![
            item(1, "Lays", 55, 2),
            item(2, "Milk", 40, 1),
            item(4, "penuts", 220, 3),
        ]);
        let expected: Decimal = cart
            .items()
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();
        assert_eq!(cart.total().amount, expected);
        assert_eq!(cart.total().to_string(), "₹810");
    }

    #[test]
    fn test_fractional_prices() {
        let mut bread = item(3, "Bread", 0, 3);
        bread.price = Decimal::new(4550, 2);
        let cart = Cart::from_items(vec![bread]);
        assert_eq!(cart.total().to_string(), "₹136.50");
    }

    #[test]
    fn test_quantity_lookup() {
        let cart = Cart::from_items(vec![item(1, "Lays", 55, 2)]);
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(2));
        assert!(!cart.contains(ProductId::new(2)));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_deserialize_backend_line_with_image() {
        let json = r#"{"name":"Milk","price":40,"image":"img9.avif","quantity":2,"product_id":2}"#;
        let line: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.image.as_deref(), Some("img9.avif"));
        assert_eq!(line.line_total().to_string(), "₹80");
    }
}
