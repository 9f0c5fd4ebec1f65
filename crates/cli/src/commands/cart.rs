//! Cart inspection commands.
//!
//! Every command goes through the same [`CartManager`] the storefront uses,
//! so the printed cart is always a fresh backend copy. A rejected mutation
//! still prints the current cart; an unreachable backend is an error.

use tracing::info;

use swiftmart_core::{Cart, ProductId, UserId};
use swiftmart_storefront::services::CartManager;

/// Show a user's cart with its total.
///
/// # Errors
///
/// Returns an error if the cart cannot be fetched.
pub async fn show(carts: &CartManager, user_id: UserId) -> Result<(), Box<dyn std::error::Error>> {
    let cart = carts.try_reload(user_id).await?;
    print_cart(user_id, &cart);
    Ok(())
}

/// Add one unit of a product and show the resulting cart.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or the cart cannot be
/// reloaded.
pub async fn add(
    carts: &CartManager,
    user_id: UserId,
    product_id: ProductId,
) -> Result<(), Box<dyn std::error::Error>> {
    let cart = carts.try_add(user_id, product_id).await?;
    print_cart(user_id, &cart);
    Ok(())
}

/// Remove one unit of a product and show the resulting cart.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or the cart cannot be
/// reloaded.
pub async fn remove(
    carts: &CartManager,
    user_id: UserId,
    product_id: ProductId,
) -> Result<(), Box<dyn std::error::Error>> {
    let cart = carts.try_remove(user_id, product_id).await?;
    print_cart(user_id, &cart);
    Ok(())
}

fn print_cart(user_id: UserId, cart: &Cart) {
    if cart.is_empty() {
        info!(user_id = %user_id, "Cart is empty");
        return;
    }

    for item in cart.items() {
        info!(
            product_id = %item.product_id,
            "{} - {} × {}",
            item.name,
            item.unit_price(),
            item.quantity
        );
    }
    info!(user_id = %user_id, lines = cart.line_count(), total = %cart.total(), "Cart total");
}
