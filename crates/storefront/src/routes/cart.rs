//! Cart route handlers.
//!
//! Mutations go through [`RequireUser`], so an anonymous shopper is sent to
//! the login page before anything reaches the backend. Every mutation ends
//! with a cart reload and answers with the fresh cart panel (htmx) or a
//! redirect back to the landing page (plain form post).

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use swiftmart_core::{Cart, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{CurrentSession, RequireUser};
use crate::routes::is_htmx;
use crate::state::AppState;
use crate::views::{CartPanel, CartPanelTemplate};

/// Event fired on the page after any cart change.
const CART_UPDATED_EVENT: &str = "cart-updated";

/// Current cart panel. Anonymous shoppers get the empty panel.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> CartPanelTemplate {
    let panel = match session.user_id {
        Some(user_id) => CartPanel::render(&state.carts().reload(user_id).await),
        None => CartPanel::empty(),
    };
    CartPanelTemplate { panel }
}

/// Add one unit of a product.
#[instrument(skip(state, headers))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> Result<Response> {
    let product_id = parse_product_id(&product_id)?;
    let id = product_id.to_string();
    add_breadcrumb("cart", "Added product", Some(&[("product_id", id.as_str())]));

    let cart = state.carts().add(user_id, product_id).await;
    Ok(cart_response(&headers, &cart))
}

/// Remove one unit of a product.
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> Result<Response> {
    let product_id = parse_product_id(&product_id)?;
    let id = product_id.to_string();
    add_breadcrumb("cart", "Removed product", Some(&[("product_id", id.as_str())]));

    let cart = state.carts().remove(user_id, product_id).await;
    Ok(cart_response(&headers, &cart))
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid product id '{raw}'")))
}

fn cart_response(headers: &HeaderMap, cart: &Cart) -> Response {
    if is_htmx(headers) {
        (
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            CartPanelTemplate {
                panel: CartPanel::render(cart),
            },
        )
            .into_response()
    } else {
        Redirect::to("/").into_response()
    }
}
