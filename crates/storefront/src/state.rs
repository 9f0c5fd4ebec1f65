//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::StorefrontConfig;
use crate::services::CartManager;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the one backend client and the cart
/// manager built on top of it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    carts: CartManager,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let api = ApiClient::new(&config.backend);
        let carts = CartManager::new(api.clone(), config.backend.cart_cache_capacity);

        Self {
            inner: Arc::new(AppStateInner { config, api, carts }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the cart state manager.
    #[must_use]
    pub fn carts(&self) -> &CartManager {
        &self.inner.carts
    }
}
