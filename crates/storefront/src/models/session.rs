//! Session-related types.
//!
//! The storefront keeps exactly two values per browser: the backend token and
//! the user id. Both are written on login and removed on logout.

use secrecy::SecretString;

use swiftmart_core::UserId;

/// Per-browser login state as read from the session.
///
/// A present `token` means "authenticated" for display purposes; nothing
/// checks whether it is still valid. Cart actions need `user_id`.
#[derive(Debug, Clone, Default)]
pub struct ClientSession {
    pub token: Option<SecretString>,
    pub user_id: Option<UserId>,
}

impl ClientSession {
    /// Whether the login affordance should be replaced by logout.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Session keys for login state.
pub mod keys {
    /// Key for the backend-issued token.
    pub const TOKEN: &str = "token";

    /// Key for the backend user id.
    pub const USER_ID: &str = "user_id";
}
