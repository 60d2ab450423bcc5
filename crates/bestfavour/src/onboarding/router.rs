use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::controller::{OnboardingError, OnboardingForm};
use super::domain::DraftId;
use super::repository::{DraftRepository, DraftView, RepositoryError};
use super::service::{OnboardingService, OnboardingServiceError};
use super::update::DraftUpdate;

/// Router builder exposing the provider onboarding form over HTTP.
pub fn onboarding_router<R>(service: Arc<OnboardingService<R>>) -> Router
where
    R: DraftRepository + 'static,
{
    Router::new()
        .route("/api/v1/onboarding/drafts", post(start_handler::<R>))
        .route(
            "/api/v1/onboarding/drafts/:draft_id",
            get(draft_handler::<R>),
        )
        .route(
            "/api/v1/onboarding/drafts/:draft_id/updates",
            post(update_handler::<R>),
        )
        .route(
            "/api/v1/onboarding/drafts/:draft_id/next",
            post(next_handler::<R>),
        )
        .route(
            "/api/v1/onboarding/drafts/:draft_id/previous",
            post(previous_handler::<R>),
        )
        .route(
            "/api/v1/onboarding/drafts/:draft_id/submit",
            post(submit_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn start_handler<R>(State(service): State<Arc<OnboardingService<R>>>) -> Response
where
    R: DraftRepository + 'static,
{
    match service.start() {
        Ok(form) => (StatusCode::CREATED, axum::Json(DraftView::from(&form))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn draft_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
{
    draft_response(service.get(&DraftId(draft_id)))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(draft_id): Path<String>,
    axum::Json(update): axum::Json<DraftUpdate>,
) -> Response
where
    R: DraftRepository + 'static,
{
    draft_response(service.apply(&DraftId(draft_id), update))
}

pub(crate) async fn next_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
{
    draft_response(service.next(&DraftId(draft_id)))
}

pub(crate) async fn previous_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
{
    draft_response(service.previous(&DraftId(draft_id)))
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
{
    match service.submit(&DraftId(draft_id)) {
        Ok(application) => (StatusCode::ACCEPTED, axum::Json(application)).into_response(),
        Err(err) => error_response(err),
    }
}

fn draft_response(result: Result<OnboardingForm, OnboardingServiceError>) -> Response {
    match result {
        Ok(form) => (StatusCode::OK, axum::Json(DraftView::from(&form))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: OnboardingServiceError) -> Response {
    let status = match &err {
        OnboardingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        OnboardingServiceError::Repository(RepositoryError::Conflict)
        | OnboardingServiceError::Onboarding(OnboardingError::StepMismatch { .. })
        | OnboardingServiceError::Onboarding(OnboardingError::AlreadySubmitted) => {
            StatusCode::CONFLICT
        }
        OnboardingServiceError::Onboarding(_) => StatusCode::UNPROCESSABLE_ENTITY,
        OnboardingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let mut payload = json!({ "error": err.to_string() });
    if let OnboardingServiceError::Onboarding(OnboardingError::MissingFields(fields)) = &err {
        payload["missing_fields"] = json!(fields);
    }

    (status, axum::Json(payload)).into_response()
}
