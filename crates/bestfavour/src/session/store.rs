//! Process-wide settings and session state.
//!
//! A single [`SessionStore`] owns the dark-mode preference and the signed-in
//! user. It reads the preference store once in [`SessionStore::initialize`],
//! writes through on every change, and broadcasts snapshots to subscribers
//! over a `watch` channel.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use super::preferences::{PreferenceError, PreferenceStore, AUTH_TOKEN_KEY, DARK_MODE_KEY};

const MOCK_TOKEN: &str = "mock_token";
const MOCK_USER_ID: &str = "1";
const MOCK_USER_NAME: &str = "John Doe";
const MOCK_USER_EMAIL: &str = "john@example.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserProfile {
    fn mock(email: &str) -> Self {
        Self {
            id: MOCK_USER_ID.to_string(),
            name: MOCK_USER_NAME.to_string(),
            email: email.to_string(),
        }
    }
}

/// Snapshot published to subscribers after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub dark_mode: bool,
    pub user: Option<UserProfile>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Failed to login. Please try again.")]
    InvalidCredentials,
    #[error(transparent)]
    Preferences(#[from] PreferenceError),
}

pub struct SessionStore {
    preferences: Arc<dyn PreferenceStore>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Reads the persisted flag and token. A stored token alone counts as signed in.
    pub fn initialize(preferences: Arc<dyn PreferenceStore>) -> Result<Self, PreferenceError> {
        let dark_mode = preferences
            .get(DARK_MODE_KEY)?
            .is_some_and(|value| value == "true");
        let user = preferences
            .get(AUTH_TOKEN_KEY)?
            .map(|_| UserProfile::mock(MOCK_USER_EMAIL));

        debug!(dark_mode, authenticated = user.is_some(), "session restored");
        let (state, _) = watch::channel(SessionState { dark_mode, user });
        Ok(Self { preferences, state })
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn toggle_dark_mode(&self) -> Result<bool, PreferenceError> {
        let enabled = !self.state.borrow().dark_mode;
        self.preferences
            .set(DARK_MODE_KEY, if enabled { "true" } else { "false" })?;
        self.state.send_modify(|state| state.dark_mode = enabled);
        Ok(enabled)
    }

    /// Mock sign-in: any non-blank email and password is accepted.
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        self.preferences.set(AUTH_TOKEN_KEY, MOCK_TOKEN)?;
        let profile = UserProfile::mock(email);
        self.state
            .send_modify(|state| state.user = Some(profile.clone()));
        info!(user_id = %profile.id, "user signed in");
        Ok(profile)
    }

    pub fn logout(&self) -> Result<(), PreferenceError> {
        self.preferences.remove(AUTH_TOKEN_KEY)?;
        self.state.send_modify(|state| state.user = None);
        info!("user signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::preferences::MemoryPreferenceStore;

    fn store_with(values: &[(&str, &str)]) -> Arc<MemoryPreferenceStore> {
        let store = Arc::new(MemoryPreferenceStore::default());
        for (key, value) in values {
            store.set(key, value).expect("seed preference");
        }
        store
    }

    #[test]
    fn initialize_reads_persisted_values() {
        let preferences = store_with(&[(DARK_MODE_KEY, "true"), (AUTH_TOKEN_KEY, "anything")]);
        let session = SessionStore::initialize(preferences).expect("session initializes");

        let state = session.snapshot();
        assert!(state.dark_mode);
        let user = state.user.expect("token implies a signed-in user");
        assert_eq!(user.email, MOCK_USER_EMAIL);
    }

    #[test]
    fn initialize_defaults_to_light_and_signed_out() {
        let session =
            SessionStore::initialize(store_with(&[(DARK_MODE_KEY, "yes")])).expect("initializes");
        assert_eq!(session.snapshot(), SessionState::default());
    }

    #[test]
    fn toggle_writes_through_to_preferences() {
        let preferences = store_with(&[]);
        let session = SessionStore::initialize(preferences.clone()).expect("initializes");

        assert!(session.toggle_dark_mode().expect("toggle on"));
        assert_eq!(
            preferences.get(DARK_MODE_KEY).expect("read").as_deref(),
            Some("true")
        );
        assert!(!session.toggle_dark_mode().expect("toggle off"));
        assert_eq!(
            preferences.get(DARK_MODE_KEY).expect("read").as_deref(),
            Some("false")
        );
    }

    #[test]
    fn login_rejects_blank_credentials_and_stays_usable() {
        let preferences = store_with(&[]);
        let session = SessionStore::initialize(preferences.clone()).expect("initializes");

        assert!(matches!(
            session.login("  ", "secret"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(preferences.get(AUTH_TOKEN_KEY).expect("read").is_none());

        let profile = session
            .login("thandi@example.com", "secret")
            .expect("retry succeeds");
        assert_eq!(profile.email, "thandi@example.com");
        assert_eq!(
            preferences.get(AUTH_TOKEN_KEY).expect("read").as_deref(),
            Some(MOCK_TOKEN)
        );
    }

    #[test]
    fn logout_clears_user_and_token() {
        let preferences = store_with(&[(AUTH_TOKEN_KEY, MOCK_TOKEN)]);
        let session = SessionStore::initialize(preferences.clone()).expect("initializes");

        session.logout().expect("logout");
        assert!(!session.snapshot().is_authenticated());
        assert!(preferences.get(AUTH_TOKEN_KEY).expect("read").is_none());
    }

    #[tokio::test]
    async fn subscribers_are_notified_of_changes() {
        let session = SessionStore::initialize(store_with(&[])).expect("initializes");
        let mut receiver = session.subscribe();

        session.toggle_dark_mode().expect("toggle");
        receiver.changed().await.expect("sender alive");
        assert!(receiver.borrow_and_update().dark_mode);

        session.login("a@b.co", "pw").expect("login");
        receiver.changed().await.expect("sender alive");
        assert!(receiver.borrow_and_update().is_authenticated());
    }
}
