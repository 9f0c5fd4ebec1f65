//! Wire types for the SwiftMart backend.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use swiftmart_core::{CartItem, Product, UserId};

/// `POST /login` request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /signup` request body.
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /login` response body, success or failure.
///
/// Success carries `token` and `user_id`; failure carries only `detail`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub detail: Option<Value>,
}

/// Generic `{message}` / `{detail}` body used by signup, seeding and cart
/// mutations.
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
}

/// `GET /products` response body.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// `GET /cart/{user_id}` response body.
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    pub cart: Vec<CartItem>,
}

/// Result of a login attempt that reached the backend.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The backend issued a token.
    Authenticated { token: SecretString, user_id: UserId },
    /// No token in the response; `message` is what the backend said.
    Rejected { message: String },
}

/// Result of a signup attempt that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub accepted: bool,
    pub message: String,
}

impl LoginResponse {
    /// A response only counts as a login when it carries a token and a user id.
    #[must_use]
    pub fn into_outcome(self) -> LoginOutcome {
        match (self.token, self.user_id) {
            (Some(token), Some(user_id)) if !token.is_empty() => LoginOutcome::Authenticated {
                token: SecretString::from(token),
                user_id,
            },
            _ => LoginOutcome::Rejected {
                message: self
                    .detail
                    .as_ref()
                    .and_then(detail_message)
                    .unwrap_or_else(|| "Login failed".to_string()),
            },
        }
    }
}

/// Human-readable text from a backend `detail` field.
///
/// `detail` is a string for application errors and a list of
/// `{loc, msg, type}` objects for request validation errors.
#[must_use]
pub fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(errors) => errors
            .iter()
            .find_map(|e| e.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

/// `detail` text from a raw response body, if the body is a JSON error.
#[must_use]
pub fn detail_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<MessageResponse>(body)
        .ok()
        .and_then(|r| r.detail)
        .as_ref()
        .and_then(detail_message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_login_success() {
        let body = r#"{"message":"Login successful!","token":"eyJ.abc","user_id":3}"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();
        match response.into_outcome() {
            LoginOutcome::Authenticated { token, user_id } => {
                assert_eq!(token.expose_secret(), "eyJ.abc");
                assert_eq!(user_id, UserId::new(3));
            }
            LoginOutcome::Rejected { message } => panic!("unexpected rejection: {message}"),
        }
    }

    #[test]
    fn test_login_missing_token_surfaces_detail() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"detail":"Incorrect password"}"#).unwrap();
        assert!(matches!(
            response.into_outcome(),
            LoginOutcome::Rejected { message } if message == "Incorrect password"
        ));
    }

    #[test]
    fn test_login_empty_token_is_rejected() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token":"","user_id":1}"#).unwrap();
        assert!(matches!(
            response.into_outcome(),
            LoginOutcome::Rejected { message } if message == "Login failed"
        ));
    }

    #[test]
    fn test_validation_error_detail_list() {
        let detail: Value = serde_json::from_str(
            r#"[{"loc":["body","email"],"msg":"field required","type":"value_error.missing"}]"#,
        )
        .unwrap();
        assert_eq!(detail_message(&detail).as_deref(), Some("field required"));
    }

    #[test]
    fn test_detail_is_trimmed() {
        assert_eq!(
            detail_from_body(r#"{"detail":" Item not found in cart"}"#).as_deref(),
            Some("Item not found in cart")
        );
        assert_eq!(detail_from_body("<html>502</html>"), None);
    }
}
