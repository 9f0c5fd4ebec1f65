//! Cart state manager.
//!
//! Keeps the last cart loaded for each user and applies one reload policy to
//! every mutation: mutate on the backend, then replace the local copy with a
//! fresh `GET /cart/{user_id}`. Local state is never patched optimistically.

use std::time::Duration;

use moka::future::Cache;
use tracing::{instrument, warn};

use swiftmart_core::{Cart, ProductId, UserId};

use crate::api::{ApiClient, ApiError};
use crate::models::ClientSession;

/// Carts untouched for this long are dropped from memory.
const CART_IDLE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// A mutating action was attempted without a user id in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Please login first!")]
pub struct Unauthenticated;

/// Guard run before any cart mutation.
///
/// Only the user id matters here; a token without a user id is not enough
/// to address a cart.
///
/// # Errors
///
/// Returns [`Unauthenticated`] when the session has no user id.
pub const fn require_auth(session: &ClientSession) -> Result<UserId, Unauthenticated> {
    match session.user_id {
        Some(user_id) => Ok(user_id),
        None => Err(Unauthenticated),
    }
}

/// In-memory mirror of backend carts, keyed by user id.
#[derive(Clone)]
pub struct CartManager {
    api: ApiClient,
    carts: Cache<UserId, Cart>,
}

impl CartManager {
    /// Create a cart manager holding at most `capacity` carts.
    #[must_use]
    pub fn new(api: ApiClient, capacity: u64) -> Self {
        let carts = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(CART_IDLE_TTL)
            .build();

        Self { api, carts }
    }

    /// Last successfully loaded cart, or an empty one.
    pub async fn cached(&self, user_id: UserId) -> Cart {
        self.carts.get(&user_id).await.unwrap_or_default()
    }

    /// Replace the local cart with the backend's copy.
    ///
    /// On failure the previous copy is returned unchanged.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn reload(&self, user_id: UserId) -> Cart {
        let result = self.try_reload(user_id).await;
        self.or_cached(user_id, result).await
    }

    /// Add one unit of `product_id`, then reload.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Cart {
        let result = self.try_add(user_id, product_id).await;
        self.or_cached(user_id, result).await
    }

    /// Remove one unit of `product_id`, then reload.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> Cart {
        let result = self.try_remove(user_id, product_id).await;
        self.or_cached(user_id, result).await
    }

    /// Fetch the backend's copy and cache it.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the cached copy is left untouched.
    pub async fn try_reload(&self, user_id: UserId) -> Result<Cart, ApiError> {
        let cart = Cart::from_items(self.api.get_cart(user_id).await?);
        self.carts.insert(user_id, cart.clone()).await;
        Ok(cart)
    }

    /// Add one unit of `product_id`, then reload.
    ///
    /// # Errors
    ///
    /// Returns the error if the backend was never reached, or if the reload
    /// fails. A rejected add still reloads.
    pub async fn try_add(&self, user_id: UserId, product_id: ProductId) -> Result<Cart, ApiError> {
        let result = self.api.add_to_cart(user_id, product_id).await;
        self.settle("add", user_id, result).await
    }

    /// Remove one unit of `product_id`, then reload.
    ///
    /// # Errors
    ///
    /// Returns the error if the backend was never reached, or if the reload
    /// fails. A rejected remove still reloads.
    pub async fn try_remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Cart, ApiError> {
        let result = self.api.remove_from_cart(user_id, product_id).await;
        self.settle("remove", user_id, result).await
    }

    /// Reload after a mutation unless the backend was never reached.
    async fn settle(
        &self,
        action: &str,
        user_id: UserId,
        result: Result<(), ApiError>,
    ) -> Result<Cart, ApiError> {
        match result {
            Ok(()) => {}
            Err(e) if e.is_network() => {
                warn!(action, error = %e, "Cart mutation failed before reaching backend");
                return Err(e);
            }
            Err(e) => warn!(action, error = %e, "Cart mutation rejected by backend"),
        }
        self.try_reload(user_id).await
    }

    async fn or_cached(&self, user_id: UserId, result: Result<Cart, ApiError>) -> Cart {
        match result {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "Cart unavailable, keeping previous copy");
                self.cached(user_id).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_auth_needs_user_id() {
        let anonymous = ClientSession::default();
        assert_eq!(require_auth(&anonymous), Err(Unauthenticated));

        let signed_in = ClientSession {
            token: None,
            user_id: Some(UserId::new(7)),
        };
        assert_eq!(require_auth(&signed_in), Ok(UserId::new(7)));
    }

    #[test]
    fn test_unauthenticated_message() {
        assert_eq!(Unauthenticated.to_string(), "Please login first!");
    }
}
