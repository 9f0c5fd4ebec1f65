//! SwiftMart storefront library.
//!
//! A server-rendered storefront in front of the SwiftMart backend API:
//! product browsing with live search, a per-shopper cart and
//! login/signup/logout. Pages are Askama templates; htmx swaps in the
//! product grid and cart panel fragments.
//!
//! The router is built here so that the binary and the integration tests
//! serve exactly the same application.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;

use axum::{Router, body::Body, http::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the storefront application with its middleware stack.
///
/// Sentry layers are left to the caller so tests can run without a client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);
    let csp = middleware::ContentSecurityPolicy::new(&state.config().image_origins());

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(axum::middleware::from_fn_with_state(
            csp,
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
