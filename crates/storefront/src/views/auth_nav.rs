//! Login/logout affordance.

use crate::models::ClientSession;

/// Which auth control the header shows.
///
/// Exactly one of login or logout is visible: a token in the session means
/// logout, anything else means login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthNav {
    pub authenticated: bool,
}

impl AuthNav {
    #[must_use]
    pub const fn for_session(session: &ClientSession) -> Self {
        Self {
            authenticated: session.is_authenticated(),
        }
    }

    #[must_use]
    pub const fn show_login(&self) -> bool {
        !self.authenticated
    }

    #[must_use]
    pub const fn show_logout(&self) -> bool {
        self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use swiftmart_core::UserId;

    use super::*;

    #[test]
    fn test_anonymous_shows_login_only() {
        let nav = AuthNav::for_session(&ClientSession::default());
        assert!(nav.show_login());
        assert!(!nav.show_logout());
    }

    #[test]
    fn test_token_shows_logout_only() {
        let nav = AuthNav::for_session(&ClientSession {
            token: Some(SecretString::from("eyJ.abc")),
            user_id: Some(UserId::new(1)),
        });
        assert!(nav.show_logout());
        assert!(!nav.show_login());
    }

    #[test]
    fn test_user_id_without_token_is_anonymous() {
        let nav = AuthNav::for_session(&ClientSession {
            token: None,
            user_id: Some(UserId::new(1)),
        });
        assert!(nav.show_login());
    }
}
