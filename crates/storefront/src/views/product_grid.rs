//! Product list renderer.

use askama::Template;
use askama_web::WebTemplate;

use swiftmart_core::{Price, Product, ProductId};

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub image_url: String,
    pub price: Price,
}

impl ProductCard {
    /// Card for `product`, with bare image names resolved against
    /// `image_base`.
    #[must_use]
    pub fn new(product: &Product, image_base: &str) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image_url: resolve_image(&product.image, image_base),
            price: product.unit_price(),
        }
    }
}

/// The product grid, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductGrid {
    pub cards: Vec<ProductCard>,
}

impl ProductGrid {
    /// Build the grid from an ordered product sequence.
    #[must_use]
    pub fn render(products: &[Product], image_base: &str) -> Self {
        Self {
            cards: products
                .iter()
                .map(|product| ProductCard::new(product, image_base))
                .collect(),
        }
    }
}

/// Product grid fragment (initial load and every search keystroke).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub grid: ProductGrid,
}

/// Absolute URLs and rooted paths pass through; bare file names from the
/// backend seed data (`img1.avif`) are served from `image_base`.
fn resolve_image(image: &str, image_base: &str) -> String {
    let image = image.trim();
    if image.is_empty()
        || image.starts_with('/')
        || image.starts_with("http://")
        || image.starts_with("https://")
    {
        image.to_string()
    } else {
        format!("{image_base}{image}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    const IMAGES: &str = "/static/images/";

    fn product(id: i32, name: &str, image: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::from(55),
            image: image.to_string(),
        }
    }

    #[test]
    fn test_resolve_image() {
        assert_eq!(resolve_image("img1.avif", IMAGES), "/static/images/img1.avif");
        assert_eq!(resolve_image("/media/a.png", IMAGES), "/media/a.png");
        assert_eq!(
            resolve_image("https://cdn.example.com/a.png", IMAGES),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            resolve_image("img9.avif", "http://127.0.0.1:8000/images/"),
            "http://127.0.0.1:8000/images/img9.avif"
        );
    }

    #[test]
    fn test_grid_keeps_order() {
        let grid = ProductGrid::render(
            &[product(2, "Milk", "m.avif"), product(1, "Lays", "l.avif")],
            IMAGES,
        );
        let ids: Vec<i32> = grid.cards.iter().map(|c| c.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_render_card_with_add_action() {
        let html = ProductGridTemplate {
            grid: ProductGrid::render(&[product(4, "penuts", "img5.avif")], IMAGES),
        }
        .render()
        .unwrap();

        assert!(html.contains("penuts"));
        assert!(html.contains("₹55"));
        assert!(html.contains("/cart/add/4"));
        assert!(html.contains("/static/images/img5.avif"));
    }

    #[test]
    fn test_render_escapes_names() {
        let html = ProductGridTemplate {
            grid: ProductGrid::render(
                &[product(1, "<script>alert(1)</script>", "a.avif")],
                IMAGES,
            ),
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&#60;script&#62;alert(1)&#60;/script&#62;"));
    }

    #[test]
    fn test_render_empty_grid() {
        let html = ProductGridTemplate {
            grid: ProductGrid::default(),
        }
        .render()
        .unwrap();
        assert!(html.contains("No products found"));
    }
}
