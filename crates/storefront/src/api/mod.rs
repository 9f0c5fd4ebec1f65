//! SwiftMart backend REST client.
//!
//! # Architecture
//!
//! - Thin `reqwest` wrapper, one method per backend endpoint
//! - The backend is the source of truth for carts; nothing is cached here
//! - Product search is done client-side over the full listing
//! - No retries and no timeouts: callers log and swallow failures
//!
//! # Endpoints
//!
//! ```text
//! POST   /login                              {email,password} -> {token,user_id} | {detail}
//! POST   /signup                             {name,email,password} -> {message} | {detail}
//! GET    /products                           -> {products: [...]}
//! POST   /add-products                       seed demo catalogue -> {message}
//! POST   /cart/add/{user_id}/{product_id}    add one unit
//! DELETE /cart/remove/{user_id}/{product_id} remove one unit
//! GET    /cart/{user_id}                     -> {cart: [...]}
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use swiftmart_storefront::api::ApiClient;
//!
//! let client = ApiClient::new(&config.backend);
//! client.add_to_cart(user_id, product_id).await?;
//! let items = client.get_cart(user_id).await?;
//! ```

mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{LoginOutcome, SignupOutcome};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the SwiftMart backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, reset, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },
}

impl ApiError {
    /// Whether the failure happened before any response arrived.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// HTTP status of a non-2xx response, if that is what this error is.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
