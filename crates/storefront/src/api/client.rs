//! SwiftMart backend client implementation.

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use swiftmart_core::{CartItem, Email, Product, ProductId, UserId, filter_products};

use super::ApiError;
use super::types::{
    CartResponse, LoginRequest, LoginResponse, LoginOutcome, MessageResponse, ProductsResponse,
    SignupOutcome, SignupRequest, detail_from_body, detail_message,
};
use crate::config::BackendConfig;

/// How much of a response body to keep in log lines.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the SwiftMart backend REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// Backend base URL (always ends with `/`).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and return the status with the raw body.
    ///
    /// Only transport failures are errors here; status handling is up to the
    /// caller.
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Send a request that must succeed with a JSON body of type `T`.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.send(request).await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body),
                "Failed to parse SwiftMart backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request that must succeed; the body is ignored.
    async fn expect_success(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let (status, body) = self.send(request).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(status_error(status, &body))
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange email and password for a token.
    ///
    /// The body is read whatever the status: the backend reports bad
    /// credentials as `{detail}` with a 401/404, which becomes
    /// [`LoginOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers with
    /// something that is not JSON.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<LoginOutcome, ApiError> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        let request = self.inner.client.post(self.endpoint("login")?).json(&body);
        let (status, text) = self.send(request).await?;

        let response: LoginResponse = match serde_json::from_str(&text) {
            Ok(response) => response,
            Err(_) if !status.is_success() => return Err(status_error(status, &text)),
            Err(e) => return Err(ApiError::Parse(e)),
        };

        let outcome = response.into_outcome();
        if let LoginOutcome::Rejected { message } = &outcome {
            debug!(status = %status, message = %message, "Login rejected by backend");
        }
        Ok(outcome)
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers with
    /// something that is not JSON.
    #[instrument(skip(self, name, password), fields(email = %email))]
    pub async fn signup(
        &self,
        name: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<SignupOutcome, ApiError> {
        let body = SignupRequest {
            name,
            email: email.as_str(),
            password: password.expose_secret(),
        };
        let request = self.inner.client.post(self.endpoint("signup")?).json(&body);
        let (status, text) = self.send(request).await?;

        let response: MessageResponse = match serde_json::from_str(&text) {
            Ok(response) => response,
            Err(_) if !status.is_success() => return Err(status_error(status, &text)),
            Err(e) => return Err(ApiError::Parse(e)),
        };

        let accepted = status.is_success();
        let message = if accepted {
            response.message
        } else {
            response.detail.as_ref().and_then(detail_message)
        };

        Ok(SignupOutcome {
            accepted,
            message: message.unwrap_or_else(|| {
                if accepted {
                    "Signup successful!".to_string()
                } else {
                    "Signup failed".to_string()
                }
            }),
        })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List every product, in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let request = self.inner.client.get(self.endpoint("products")?);
        let response: ProductsResponse = self.execute(request).await?;
        debug!(count = response.products.len(), "Loaded products");
        Ok(response.products)
    }

    /// Products whose name contains `query`, ignoring case.
    ///
    /// Fetches the full listing and filters locally; the backend has no
    /// search endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let products = self.list_products().await?;
        Ok(filter_products(products, query))
    }

    /// Load the demo catalogue into the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn seed_products(&self) -> Result<String, ApiError> {
        let request = self.inner.client.post(self.endpoint("add-products")?);
        let response: MessageResponse = self.execute(request).await?;
        Ok(response
            .message
            .unwrap_or_else(|| "Products added".to_string()))
    }

    /// Reachability probe used by the readiness check.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot list products.
    pub async fn ping(&self) -> Result<(), ApiError> {
        self.list_products().await.map(|_| ())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product to the user's cart.
    ///
    /// The response body is ignored; reload the cart to see the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add_to_cart(&self, user_id: UserId, product_id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("cart/add/{user_id}/{product_id}"))?;
        self.expect_success(self.inner.client.post(url)).await
    }

    /// Remove one unit of a product from the user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it
    /// (404 when the product is not in the cart).
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn remove_from_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("cart/remove/{user_id}/{product_id}"))?;
        self.expect_success(self.inner.client.delete(url)).await
    }

    /// Fetch the user's cart lines, in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_cart(&self, user_id: UserId) -> Result<Vec<CartItem>, ApiError> {
        let request = self.inner.client.get(self.endpoint(&format!("cart/{user_id}"))?);
        let response: CartResponse = self.execute(request).await?;
        debug!(lines = response.cart.len(), "Loaded cart");
        Ok(response.cart)
    }
}

/// Build and log an [`ApiError::Status`] for a non-2xx response.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    tracing::warn!(
        status = %status,
        body = %truncate(body),
        "SwiftMart backend returned non-success status"
    );
    let detail = detail_from_body(body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
    ApiError::Status { status, detail }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
