//! Account commands.

use secrecy::SecretString;
use tracing::{info, warn};

use swiftmart_storefront::api::{ApiClient, LoginOutcome};
use swiftmart_storefront::services::AuthService;

/// Log in and print the user id the backend hands back.
///
/// The token itself is never printed.
///
/// # Errors
///
/// Returns an error if the form is invalid, the backend is unreachable or
/// the credentials are rejected.
pub async fn login(
    api: &ApiClient,
    email: &str,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = SecretString::from(password);

    match AuthService::new(api).login(email, &password).await? {
        LoginOutcome::Authenticated { user_id, .. } => {
            info!(user_id = %user_id, "Login successful!");
            Ok(())
        }
        LoginOutcome::Rejected { message } => {
            warn!("{message}");
            Err(message.into())
        }
    }
}
