//! Cart panel renderer.

use askama::Template;
use askama_web::WebTemplate;

use swiftmart_core::{Cart, Price, ProductId};

use crate::filters;

/// One row of the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

/// Cart panel contents derived from a reloaded [`Cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanel {
    pub lines: Vec<CartLine>,
    /// Σ price × quantity over `lines`.
    pub total: Price,
    /// Distinct lines, shown on the cart badge.
    pub line_count: usize,
}

impl CartPanel {
    #[must_use]
    pub fn render(cart: &Cart) -> Self {
        Self {
            lines: cart
                .items()
                .iter()
                .map(|item| CartLine {
                    product_id: item.product_id,
                    name: item.name.clone(),
                    price: item.unit_price(),
                    quantity: item.quantity,
                })
                .collect(),
            total: cart.total(),
            line_count: cart.line_count(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::render(&Cart::default())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart panel fragment (swapped in after every add/remove).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub panel: CartPanel,
}
