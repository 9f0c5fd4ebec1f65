//! Cart state manager: reload-after-mutation against the fake backend.

#![allow(clippy::unwrap_used)]

use swiftmart_core::{ProductId, UserId};
use swiftmart_integration_tests::{FakeBackend, SHOPPER_ID, unreachable_url};
use swiftmart_storefront::api::ApiClient;
use swiftmart_storefront::config::BackendConfig;
use swiftmart_storefront::services::CartManager;

fn manager(config: &BackendConfig) -> CartManager {
    CartManager::new(ApiClient::new(config), 100)
}

#[tokio::test]
async fn test_add_reloads_cart_with_total() {
    let backend = FakeBackend::start().await;
    let carts = manager(&backend.config());
    let user = UserId::new(SHOPPER_ID);

    carts.add(user, ProductId::new(1)).await;
    carts.add(user, ProductId::new(1)).await;
    let cart = carts.add(user, ProductId::new(2)).await;

    assert_eq!(backend.mutations(), 3);
    assert_eq!(backend.cart_reads(), 3);
    assert_eq!(cart.quantity_of(ProductId::new(1)), Some(2));
    assert_eq!(cart.line_count(), 2);
    assert_eq!(cart.total().to_string(), "₹150");
    assert_eq!(carts.cached(user).await, cart);
}

#[tokio::test]
async fn test_remove_last_unit_drops_line() {
    let backend = FakeBackend::start().await;
    let carts = manager(&backend.config());
    let user = UserId::new(SHOPPER_ID);

    carts.add(user, ProductId::new(3)).await;
    let cart = carts.remove(user, ProductId::new(3)).await;

    assert!(cart.is_empty());
    assert!(!cart.contains(ProductId::new(3)));
    assert_eq!(cart.total().to_string(), "₹0");
}

#[tokio::test]
async fn test_rejected_mutation_still_reloads() {
    let backend = FakeBackend::start().await;
    let carts = manager(&backend.config());
    let user = UserId::new(SHOPPER_ID);

    carts.add(user, ProductId::new(1)).await;
    let reads_before = backend.cart_reads();

    // Not in the cart: backend answers 404.
    let cart = carts.remove(user, ProductId::new(5)).await;

    assert_eq!(backend.cart_reads(), reads_before + 1);
    assert_eq!(cart.quantity_of(ProductId::new(1)), Some(1));
}

#[tokio::test]
async fn test_network_failure_keeps_previous_cart() {
    let carts = manager(&BackendConfig::from_url(&unreachable_url().await).unwrap());
    let user = UserId::new(SHOPPER_ID);

    let cart = carts.add(user, ProductId::new(1)).await;
    assert!(cart.is_empty());

    let cart = carts.reload(user).await;
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_failed_reload_returns_previous_cart() {
    let backend = FakeBackend::start().await;
    let carts = manager(&backend.config());
    let user = UserId::new(SHOPPER_ID);

    carts.add(user, ProductId::new(1)).await;
    let loaded = carts.add(user, ProductId::new(4)).await;
    assert_eq!(loaded.total().to_string(), "₹175");

    backend.fail_cart_reads(true);
    let cart = carts.reload(user).await;
    assert_eq!(cart, loaded);
    assert_eq!(cart.quantity_of(ProductId::new(4)), Some(1));
    assert_eq!(cart.total().to_string(), "₹175");

    // The add lands on the backend but the reload fails: the old copy stays.
    let cart = carts.add(user, ProductId::new(2)).await;
    assert_eq!(cart, loaded);
    assert_eq!(backend.quantity(SHOPPER_ID, 2), 1);

    backend.fail_cart_reads(false);
    let cart = carts.reload(user).await;
    assert_eq!(cart.quantity_of(ProductId::new(2)), Some(1));
    assert_eq!(cart.total().to_string(), "₹215");
}

#[tokio::test]
async fn test_try_variants_surface_failures() {
    let backend = FakeBackend::start().await;
    let carts = manager(&backend.config());
    let user = UserId::new(SHOPPER_ID);

    let cart = carts.try_add(user, ProductId::new(3)).await.unwrap();
    assert_eq!(cart.quantity_of(ProductId::new(3)), Some(1));

    // Rejected by the backend, but the reload still answers.
    let cart = carts.try_remove(user, ProductId::new(5)).await.unwrap();
    assert_eq!(cart.quantity_of(ProductId::new(3)), Some(1));

    backend.fail_cart_reads(true);
    assert!(carts.try_reload(user).await.is_err());
    assert!(carts.try_add(user, ProductId::new(3)).await.is_err());
    assert_eq!(carts.cached(user).await.quantity_of(ProductId::new(3)), Some(1));

    let offline = manager(&BackendConfig::from_url(&unreachable_url().await).unwrap());
    let err = offline.try_add(user, ProductId::new(1)).await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn test_carts_are_per_user() {
    let backend = FakeBackend::start().await;
    let carts = manager(&backend.config());

    carts.add(UserId::new(1), ProductId::new(1)).await;
    let other = carts.add(UserId::new(2), ProductId::new(2)).await;

    assert!(!other.contains(ProductId::new(1)));
    assert!(carts.cached(UserId::new(1)).await.contains(ProductId::new(1)));
}
