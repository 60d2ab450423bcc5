//! User settings and mock authentication shared across the whole app.

pub mod preferences;
pub mod router;
pub mod store;

pub use preferences::{
    preference_store, FilePreferenceStore, MemoryPreferenceStore, PreferenceError,
    PreferenceStore, AUTH_TOKEN_KEY, DARK_MODE_KEY,
};
pub use router::session_router;
pub use store::{AuthError, SessionState, SessionStore, UserProfile};
