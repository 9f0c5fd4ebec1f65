//! Authentication extractors.
//!
//! [`RequireUser`] runs the cart guard before a handler body executes, so an
//! anonymous request never reaches the backend. [`CurrentSession`] reads the
//! login state without rejecting.

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use swiftmart_core::UserId;

use super::SessionStore;
use crate::models::ClientSession;
use crate::routes::{LOGIN_REQUIRED_PATH, is_htmx};
use crate::services::require_auth;

/// Extractor that requires a user id in the session.
///
/// # Example
///
/// ```rust,ignore
/// async fn add(RequireUser(user_id): RequireUser) -> impl IntoResponse {
///     format!("cart of user {user_id}")
/// }
/// ```
pub struct RequireUser(pub UserId);

/// Rejection sent when a cart action is attempted while logged out.
#[derive(Debug)]
pub enum AuthRejection {
    /// Full-page redirect to the login page (plain form posts).
    RedirectToLogin,
    /// `HX-Redirect` to the login page (HTMX requests).
    HxRedirectToLogin,
    /// Session layer missing.
    NoSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_REQUIRED_PATH).into_response(),
            Self::HxRedirectToLogin => (
                StatusCode::UNAUTHORIZED,
                [("HX-Redirect", HeaderValue::from_static(LOGIN_REQUIRED_PATH))],
            )
                .into_response(),
            Self::NoSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionStore::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::NoSession)?;

        let session = store.get().await;
        require_auth(&session).map(Self).map_err(|_| {
            tracing::info!(path = %parts.uri.path(), "Blocked cart action without login");
            if is_htmx(&parts.headers) {
                AuthRejection::HxRedirectToLogin
            } else {
                AuthRejection::RedirectToLogin
            }
        })
    }
}

/// Extractor for the current login state; never rejects.
pub struct CurrentSession(pub ClientSession);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = match SessionStore::from_request_parts(parts, state).await {
            Ok(store) => store.get().await,
            Err(_) => ClientSession::default(),
        };

        Ok(Self(session))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;

    #[test]
    fn test_redirect_rejection() {
        let response = AuthRejection::RedirectToLogin.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(LOGIN_REQUIRED_PATH)
        );
    }

    #[test]
    fn test_htmx_rejection() {
        let response = AuthRejection::HxRedirectToLogin.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get("HX-Redirect")
                .and_then(|v| v.to_str().ok()),
            Some(LOGIN_REQUIRED_PATH)
        );
    }
}
