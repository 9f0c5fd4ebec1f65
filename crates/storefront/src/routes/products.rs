//! Product grid fragments.
//!
//! Both handlers answer `204 No Content` when the backend is unreachable, so
//! htmx leaves the grid already on the page untouched.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use swiftmart_core::Product;

use crate::api::ApiError;
use crate::state::AppState;
use crate::views::{ProductGrid, ProductGridTemplate};

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Full product grid.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    grid_response(&state, state.api().list_products().await)
}

/// Product grid filtered by a case-insensitive name substring.
///
/// A blank query returns every product.
#[instrument(skip(state))]
pub async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Response {
    grid_response(&state, state.api().search_products(&query.q).await)
}

fn grid_response(state: &AppState, products: Result<Vec<Product>, ApiError>) -> Response {
    match products {
        Ok(products) => ProductGridTemplate {
            grid: ProductGrid::render(&products, &state.config().image_base_url),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load products");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
