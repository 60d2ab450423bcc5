use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::preferences::PreferenceError;
use super::store::{AuthError, SessionStore};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Router builder exposing the settings and mock sign-in endpoints.
pub fn session_router(store: Arc<SessionStore>) -> Router {
    Router::new()
        .route("/api/v1/session", get(session_handler))
        .route("/api/v1/session/login", post(login_handler))
        .route("/api/v1/session/logout", post(logout_handler))
        .route("/api/v1/session/dark-mode", post(dark_mode_handler))
        .with_state(store)
}

pub(crate) async fn session_handler(State(store): State<Arc<SessionStore>>) -> Response {
    (StatusCode::OK, axum::Json(store.snapshot())).into_response()
}

pub(crate) async fn login_handler(
    State(store): State<Arc<SessionStore>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response {
    match store.login(&request.email, &request.password) {
        Ok(_) => (StatusCode::OK, axum::Json(store.snapshot())).into_response(),
        Err(AuthError::InvalidCredentials) => {
            let payload = json!({ "error": AuthError::InvalidCredentials.to_string() });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
        Err(AuthError::Preferences(err)) => storage_failure(err),
    }
}

pub(crate) async fn logout_handler(State(store): State<Arc<SessionStore>>) -> Response {
    match store.logout() {
        Ok(()) => (StatusCode::OK, axum::Json(store.snapshot())).into_response(),
        Err(err) => storage_failure(err),
    }
}

pub(crate) async fn dark_mode_handler(State(store): State<Arc<SessionStore>>) -> Response {
    match store.toggle_dark_mode() {
        Ok(_) => (StatusCode::OK, axum::Json(store.snapshot())).into_response(),
        Err(err) => storage_failure(err),
    }
}

fn storage_failure(err: PreferenceError) -> Response {
    warn!(error = %err, "preference store failed");
    let payload = json!({ "error": "preferences unavailable" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::preferences::MemoryPreferenceStore;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let store = SessionStore::initialize(Arc::new(MemoryPreferenceStore::default()))
            .expect("session initializes");
        session_router(Arc::new(store))
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    fn login_request(email: &str, password: &str) -> Request<Body> {
        let body = json!({ "email": email, "password": password }).to_string();
        Request::post("/api/v1/session/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request builds")
    }

    #[tokio::test]
    async fn login_with_blank_password_is_unauthorized() {
        let response = router()
            .oneshot(login_request("user@example.com", ""))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let payload = read_json(response).await;
        assert_eq!(payload["error"], "Failed to login. Please try again.");
    }

    #[tokio::test]
    async fn login_returns_signed_in_snapshot() {
        let response = router()
            .oneshot(login_request("user@example.com", "pw"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["user"]["email"], "user@example.com");
        assert_eq!(payload["dark_mode"], false);
    }

    #[tokio::test]
    async fn dark_mode_toggle_flips_flag() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/session/dark-mode")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        let payload = read_json(response).await;
        assert_eq!(payload["dark_mode"], true);
    }
}
