//! Authentication service.
//!
//! Validates login and signup forms, then delegates to the backend. The
//! backend owns accounts and passwords; the storefront only keeps the token
//! and user id it hands back.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use swiftmart_core::Email;

use crate::api::{ApiClient, LoginOutcome, SignupOutcome};

/// Authentication service.
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::MissingField` for a
    /// malformed form, and `AuthError::Api` if the backend cannot be reached.
    /// Wrong credentials are not an error: they come back as
    /// [`LoginOutcome::Rejected`].
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome, AuthError> {
        let email = Email::parse(email)?;
        require_password(password)?;
        Ok(self.api.login(&email, password).await?)
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::MissingField` for a
    /// malformed form, and `AuthError::Api` if the backend cannot be reached.
    /// A backend refusal (e.g. email taken) is reported through
    /// [`SignupOutcome::accepted`].
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<SignupOutcome, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        let email = Email::parse(email)?;
        require_password(password)?;
        Ok(self.api.signup(name, &email, password).await?)
    }
}

fn require_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    Ok(())
}
