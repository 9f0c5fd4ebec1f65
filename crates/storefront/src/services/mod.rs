//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Login and signup against the backend, with form validation
//! - `cart` - Cart state manager (reload policy, auth guard)

pub mod auth;
pub mod cart;

pub use auth::{AuthError, AuthService};
pub use cart::{CartManager, Unauthenticated, require_auth};
