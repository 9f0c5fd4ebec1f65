//! Authentication error types.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur during login or signup.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email left blank or too long.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] swiftmart_core::EmailError),

    /// A required form field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The backend could not be reached or answered garbage.
    #[error("backend error: {0}")]
    Api(#[from] ApiError),
}

impl AuthError {
    /// Message safe to show on the login or signup page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(_) => "Please enter a valid email address".to_string(),
            Self::MissingField(field) => format!("Please enter your {field}"),
            Self::Api(_) => "The store is unavailable right now, please try again".to_string(),
        }
    }
}
