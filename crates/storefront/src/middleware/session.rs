//! Session middleware and the session store.
//!
//! Sessions live in a bounded moka cache (`MokaStore`) and are keyed by an
//! `HttpOnly` cookie. Records leave the cache when they expire or when the
//! capacity is reached. [`SessionStore`] is the only code that reads or writes
//! the login keys.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use swiftmart_core::UserId;

use crate::config::StorefrontConfig;
use crate::models::{ClientSession, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "swiftmart_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session store holding at most `capacity` sessions.
#[must_use]
pub fn create_session_store(capacity: u64) -> MokaStore {
    MokaStore::new(Some(capacity))
}

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(create_session_store(config.session_capacity))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Get/set/clear access to the login keys of the current browser session.
///
/// Extract it in a handler like any other extractor; it requires the
/// session layer.
#[derive(Clone)]
pub struct SessionStore {
    session: Session,
}

impl SessionStore {
    /// Wrap an existing session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Read the login state. Unreadable values count as absent.
    pub async fn get(&self) -> ClientSession {
        let token = self
            .session
            .get::<String>(session_keys::TOKEN)
            .await
            .ok()
            .flatten()
            .map(SecretString::from);
        let user_id = self
            .session
            .get::<UserId>(session_keys::USER_ID)
            .await
            .ok()
            .flatten();

        ClientSession { token, user_id }
    }

    /// Store the token and user id handed out by a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_token(
        &self,
        token: &SecretString,
        user_id: UserId,
    ) -> Result<(), tower_sessions::session::Error> {
        self.session
            .insert(session_keys::TOKEN, token.expose_secret())
            .await?;
        self.session.insert(session_keys::USER_ID, user_id).await
    }

    /// Remove both login keys (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn clear(&self) -> Result<(), tower_sessions::session::Error> {
        self.session.remove::<String>(session_keys::TOKEN).await?;
        self.session.remove::<UserId>(session_keys::USER_ID).await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for SessionStore
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self::new)
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Session layer is not installed",
            ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use tower_sessions::SessionStore as _;
    use tower_sessions::cookie::time::{Duration, OffsetDateTime};
    use tower_sessions::session::{Id, Record};

    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Session::new(None, Arc::new(create_session_store(16)), None))
    }

    fn record(expiry_date: OffsetDateTime) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::default(),
            expiry_date,
        }
    }

    #[tokio::test]
    async fn test_empty_session_is_anonymous() {
        let session = store().get().await;
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id, None);
    }

    #[tokio::test]
    async fn test_set_token_then_get() {
        let store = store();
        store
            .set_token(&SecretString::from("eyJ.abc"), UserId::new(5))
            .await
            .unwrap();

        let session = store.get().await;
        assert!(session.is_authenticated());
        assert_eq!(session.user_id, Some(UserId::new(5)));
        assert_eq!(session.token.unwrap().expose_secret(), "eyJ.abc");
    }

    #[tokio::test]
    async fn test_clear_removes_both_keys() {
        let store = store();
        store
            .set_token(&SecretString::from("eyJ.abc"), UserId::new(5))
            .await
            .unwrap();
        store.clear().await.unwrap();

        let session = store.get().await;
        assert!(session.token.is_none());
        assert!(session.user_id.is_none());
    }

    #[tokio::test]
    async fn test_expired_records_are_not_kept() {
        let store = create_session_store(16);
        let mut expired = record(OffsetDateTime::now_utc() - Duration::seconds(1));
        store.create(&mut expired).await.unwrap();

        assert!(store.load(&expired.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_active_records_round_trip() {
        let store = create_session_store(16);
        let mut active = record(OffsetDateTime::now_utc() + Duration::hours(1));
        store.create(&mut active).await.unwrap();

        assert!(store.load(&active.id).await.unwrap().is_some());
        store.delete(&active.id).await.unwrap();
        assert!(store.load(&active.id).await.unwrap().is_none());
    }
}
