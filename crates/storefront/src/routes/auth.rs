//! Authentication route handlers.
//!
//! Login and signup are plain form posts answered with redirects. Outcomes
//! travel to the next page as `?error=` / `?success=` / `?notice=` query
//! parameters and are shown once.

use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::api::LoginOutcome;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{CurrentSession, SessionStore};
use crate::routes::home_with_notice;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;
use crate::views::{AuthNav, LoginTemplate, SignupTemplate, flash, flash_text};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page.
pub async fn login_page(
    CurrentSession(session): CurrentSession,
    Query(query): Query<MessageQuery>,
) -> LoginTemplate {
    LoginTemplate {
        nav: AuthNav::for_session(&session),
        notice: query.success.as_deref().map(flash_text),
        error: query.error.as_deref().map(flash_text),
    }
}

/// Handle login form submission.
///
/// On success the token and user id go into the session, the cart is loaded
/// and the shopper lands on the home page. Any failure returns to the login
/// page with the reason.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    store: SessionStore,
    Form(form): Form<LoginForm>,
) -> Response {
    let password = SecretString::from(form.password);

    match AuthService::new(state.api()).login(&form.email, &password).await {
        Ok(LoginOutcome::Authenticated { token, user_id }) => {
            if let Err(e) = store.set_token(&token, user_id).await {
                tracing::error!(error = %e, "Failed to store login in session");
                return redirect_with("/login", "error", flash::SESSION);
            }

            set_sentry_user(&user_id);
            tracing::info!(user_id = %user_id, "Shopper logged in");
            state.carts().reload(user_id).await;

            Redirect::to(&home_with_notice(flash::LOGGED_IN)).into_response()
        }
        Ok(LoginOutcome::Rejected { message }) => {
            tracing::info!(message = %message, "Login rejected");
            redirect_with("/login", "error", &message)
        }
        Err(e) => {
            log_auth_error("Login", &e);
            redirect_with("/login", "error", &e.user_message())
        }
    }
}

// =============================================================================
// Signup
// =============================================================================

/// Display the signup page.
pub async fn signup_page(
    CurrentSession(session): CurrentSession,
    Query(query): Query<MessageQuery>,
) -> SignupTemplate {
    SignupTemplate {
        nav: AuthNav::for_session(&session),
        notice: query.success.as_deref().map(flash_text),
        error: query.error.as_deref().map(flash_text),
    }
}

/// Handle signup form submission.
///
/// Signup never logs the shopper in. Every outcome, including a blank form,
/// is carried to the login page.
#[instrument(skip_all)]
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    let password = SecretString::from(form.password);

    match AuthService::new(state.api())
        .signup(&form.name, &form.email, &password)
        .await
    {
        Ok(outcome) if outcome.accepted => {
            tracing::info!("Account created");
            redirect_with("/login", "success", &outcome.message)
        }
        Ok(outcome) => {
            tracing::info!(message = %outcome.message, "Signup rejected");
            redirect_with("/login", "error", &outcome.message)
        }
        Err(e) => {
            log_auth_error("Signup", &e);
            redirect_with("/login", "error", &e.user_message())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Clear the login keys and return to the home page.
///
/// Purely local: the backend is not told.
#[instrument(skip_all)]
pub async fn logout(store: SessionStore) -> Result<Redirect> {
    store.clear().await?;
    clear_sentry_user();
    tracing::info!("Shopper logged out");
    Ok(Redirect::to(&home_with_notice(flash::LOGGED_OUT)))
}

// =============================================================================
// Helpers
// =============================================================================

fn redirect_with(path: &str, key: &str, message: &str) -> Response {
    Redirect::to(&format!("{path}?{key}={}", urlencoding::encode(message))).into_response()
}

fn log_auth_error(action: &str, error: &AuthError) {
    if matches!(error, AuthError::Api(_)) {
        tracing::warn!(error = %error, "{action} failed: backend unavailable");
    } else {
        tracing::debug!(error = %error, "{action} form invalid");
    }
}
