//! Landing page route handler.

use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::middleware::CurrentSession;
use crate::state::AppState;
use crate::views::{AuthNav, CartPanel, HomeTemplate, ProductGrid, notice_text};

/// Query parameters of the landing page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Search text (no-JS fallback for live search).
    #[serde(default)]
    pub q: String,
    /// Flash code to show once. Unknown codes are ignored.
    pub notice: Option<String>,
}

/// Display the landing page.
///
/// Products are fetched on every load. A logged-in shopper's cart is
/// reloaded from the backend; anonymous shoppers see an empty panel. Backend
/// failures leave the affected section empty.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<HomeQuery>,
) -> HomeTemplate {
    let products = state
        .api()
        .search_products(&query.q)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load products");
            Vec::new()
        });

    let panel = match session.user_id {
        Some(user_id) => CartPanel::render(&state.carts().reload(user_id).await),
        None => CartPanel::empty(),
    };

    HomeTemplate {
        nav: AuthNav::for_session(&session),
        notice: query.notice.as_deref().and_then(notice_text),
        grid: ProductGrid::render(&products, &state.config().image_base_url),
        query: query.q,
        panel,
    }
}
