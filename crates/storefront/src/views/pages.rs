//! Full-page templates.

use askama::Template;
use askama_web::WebTemplate;

use super::{AuthNav, CartPanel, ProductGrid};
use crate::filters;

/// Short codes carried in `?notice=` / `?error=` query parameters.
pub mod flash {
    pub const LOGIN_REQUIRED: &str = "login_required";
    pub const LOGGED_IN: &str = "logged_in";
    pub const LOGGED_OUT: &str = "logged_out";
    pub const SESSION: &str = "session";
}

/// Message for a known flash code. Unknown codes show nothing.
#[must_use]
pub fn notice_text(code: &str) -> Option<String> {
    let text = match code {
        flash::LOGIN_REQUIRED => "Please login first!",
        flash::LOGGED_IN => "Login successful!",
        flash::LOGGED_OUT => "Logged out successfully!",
        flash::SESSION => "Your session could not be saved, please try again",
        _ => return None,
    };
    Some(text.to_string())
}

/// Message shown for an `?error=` / `?success=` parameter on the auth pages.
///
/// Known codes map to fixed messages; anything else is a backend message that
/// was passed through verbatim.
#[must_use]
pub fn flash_text(code: &str) -> String {
    notice_text(code).unwrap_or_else(|| code.trim().to_string())
}

/// Landing page: auth nav, search box, product grid and cart panel.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: AuthNav,
    pub notice: Option<String>,
    pub query: String,
    pub grid: ProductGrid,
    pub panel: CartPanel,
}

/// Login page.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: AuthNav,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Signup page.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub nav: AuthNav,
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use swiftmart_core::{Cart, CartItem, Product, ProductId};

    use super::*;

    fn anonymous() -> AuthNav {
        AuthNav {
            authenticated: false,
        }
    }

    #[test]
    fn test_flash_text() {
        assert_eq!(flash_text("login_required"), "Please login first!");
        assert_eq!(flash_text("logged_in"), "Login successful!");
        assert_eq!(flash_text("logged_out"), "Logged out successfully!");
        assert_eq!(flash_text("Invalid credentials"), "Invalid credentials");
    }

    #[test]
    fn test_notice_text_only_known_codes() {
        assert_eq!(notice_text("logged_out").as_deref(), Some("Logged out successfully!"));
        assert_eq!(notice_text("Call 555-0100 to claim your prize"), None);
    }

    #[test]
    fn test_home_page_for_anonymous_shopper() {
        let html = HomeTemplate {
            nav: anonymous(),
            notice: None,
            query: String::new(),
            grid: ProductGrid::render(
                &[Product {
                    id: ProductId::new(1),
                    name: "Lays".to_string(),
                    price: Decimal::from(55),
                    image: "img1.avif".to_string(),
                }],
                "/static/images/",
            ),
            panel: CartPanel::empty(),
        }
        .render()
        .unwrap();

        assert!(html.contains("href=\"/login\""));
        assert!(!html.contains("action=\"/logout\""));
        assert!(html.contains("Lays"));
        assert!(html.contains("Your cart is empty"));
    }

    #[test]
    fn test_home_page_for_logged_in_shopper() {
        let cart = Cart::from_items(vec![CartItem {
            product_id: ProductId::new(1),
            name: "Lays".to_string(),
            price: Decimal::from(55),
            quantity: 2,
            image: None,
        }]);
        let html = HomeTemplate {
            nav: AuthNav {
                authenticated: true,
            },
            notice: Some(flash_text("logged_in")),
            query: "la".to_string(),
            grid: ProductGrid::default(),
            panel: CartPanel::render(&cart),
        }
        .render()
        .unwrap();

        assert!(html.contains("action=\"/logout\""));
        assert!(!html.contains("href=\"/login\""));
        assert!(html.contains("Login successful!"));
        assert!(html.contains("value=\"la\""));
        assert!(html.contains("Total: ₹110"));
    }

    #[test]
    fn test_login_page_shows_error() {
        let html = LoginTemplate {
            nav: anonymous(),
            notice: None,
            error: Some(flash_text("login_required")),
        }
        .render()
        .unwrap();

        assert!(html.contains("Please login first!"));
        assert!(html.contains("name=\"email\""));
        assert!(html.contains("name=\"password\""));
    }

    #[test]
    fn test_signup_page_has_name_field() {
        let html = SignupTemplate {
            nav: anonymous(),
            notice: None,
            error: None,
        }
        .render()
        .unwrap();

        assert!(html.contains("name=\"name\""));
        assert!(html.contains("action=\"/signup\""));
    }
}
