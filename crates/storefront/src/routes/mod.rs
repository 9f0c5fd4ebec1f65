//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Landing page (?q= search, ?notice= flash)
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (backend reachable)
//!
//! # Products (HTMX fragments)
//! GET  /products                  - Full product grid
//! GET  /products/search?q=        - Filtered product grid
//!
//! # Cart (HTMX fragments, login required for mutations)
//! GET  /cart                      - Cart panel
//! POST /cart/add/{product_id}     - Add one unit, returns cart panel
//! POST /cart/remove/{product_id}  - Remove one unit (plain form fallback)
//! DELETE /cart/remove/{product_id} - Remove one unit, returns cart panel
//!
//! # Auth
//! GET  /login                     - Login page
//! POST /login                     - Login action
//! GET  /signup                    - Signup page
//! POST /signup                    - Signup action
//! POST /logout                    - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    http::{HeaderMap, Uri},
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Where anonymous cart actions are sent.
pub const LOGIN_REQUIRED_PATH: &str = "/login?error=login_required";

/// Whether the request was issued by htmx rather than a full page load.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Landing page URL carrying a flash code.
#[must_use]
pub fn home_with_notice(code: &str) -> String {
    format!("/?notice={}", urlencoding::encode(code))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/search", get(products::search))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{product_id}", post(cart::add))
        .route(
            "/remove/{product_id}",
            post(cart::remove).delete(cart::remove),
        )
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
