//! Product catalogue commands.

use tracing::info;

use swiftmart_storefront::api::ApiClient;

/// Load the demo catalogue into the backend.
///
/// # Errors
///
/// Returns an error if the backend is unreachable or rejects the request.
pub async fn seed(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    info!(backend = %api.base_url(), "Seeding demo catalogue");
    let message = api.seed_products().await?;
    info!("{message}");
    Ok(())
}

/// List products, optionally filtered by a name substring.
///
/// # Errors
///
/// Returns an error if the product listing cannot be fetched.
pub async fn list(api: &ApiClient, search: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let products = match search {
        Some(query) => api.search_products(query).await?,
        None => api.list_products().await?,
    };

    for product in &products {
        info!(
            id = %product.id,
            price = %product.unit_price(),
            "{}",
            product.name
        );
    }
    info!(count = products.len(), "Products listed");
    Ok(())
}
