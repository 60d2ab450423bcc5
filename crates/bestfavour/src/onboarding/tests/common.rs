use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::onboarding::controller::OnboardingForm;
use crate::onboarding::domain::{
    BusinessType, DocumentUpload, DraftId, ExperienceBand, OfferedCategory, ProviderApplication,
};
use crate::onboarding::repository::{DraftRepository, InMemoryDraftRepository, RepositoryError};
use crate::onboarding::update::DraftUpdate;
use crate::onboarding::{onboarding_router, OnboardingService};

pub(super) fn draft_id(value: &str) -> DraftId {
    DraftId(value.to_string())
}

pub(super) fn upload(file_name: &str, mime_type: &str) -> DocumentUpload {
    DocumentUpload {
        file_name: file_name.to_string(),
        mime_type: mime_type.to_string(),
        size_bytes: 48_213,
    }
}

pub(super) fn personal_updates() -> Vec<DraftUpdate> {
    vec![
        DraftUpdate::FullName("Thandi Mokoena".to_string()),
        DraftUpdate::Email("thandi@mokoena-cleaning.co.za".to_string()),
        DraftUpdate::Phone("+27 21 555 0100".to_string()),
        DraftUpdate::IdNumber("8001015009087".to_string()),
    ]
}

pub(super) fn business_updates() -> Vec<DraftUpdate> {
    vec![
        DraftUpdate::BusinessName("Mokoena Cleaning".to_string()),
        DraftUpdate::BusinessType(BusinessType::Company),
    ]
}

pub(super) fn services_updates() -> Vec<DraftUpdate> {
    vec![
        DraftUpdate::Category(OfferedCategory::HomeServices),
        DraftUpdate::Experience(ExperienceBand::ThreeToFive),
        DraftUpdate::Services(vec!["Deep cleaning".to_string(), "Move-out".to_string()]),
    ]
}

pub(super) fn documents_updates() -> Vec<DraftUpdate> {
    vec![
        DraftUpdate::IdentityDocument(upload("id.pdf", "application/pdf")),
        DraftUpdate::AddressProof(upload("utility-bill.jpg", "image/jpeg")),
        DraftUpdate::TermsAccepted(true),
    ]
}

/// Walks a form through every step, filling each one before moving on.
pub(super) fn completed_form(id: &str) -> OnboardingForm {
    let mut form = OnboardingForm::new(draft_id(id));
    let steps = [
        personal_updates(),
        business_updates(),
        services_updates(),
        documents_updates(),
    ];
    for (index, updates) in steps.into_iter().enumerate() {
        for update in updates {
            form.apply(update).expect("update belongs to active step");
        }
        if index < 3 {
            form.next();
        }
    }
    form
}

pub(super) fn build_service() -> (
    Arc<OnboardingService<InMemoryDraftRepository>>,
    Arc<InMemoryDraftRepository>,
) {
    let repository = Arc::new(InMemoryDraftRepository::default());
    let service = Arc::new(OnboardingService::new(repository.clone()));
    (service, repository)
}

pub(super) fn router_with_service(
    service: Arc<OnboardingService<InMemoryDraftRepository>>,
) -> axum::Router {
    onboarding_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

/// Repository whose every call fails, for error mapping tests.
pub(super) struct UnavailableRepository;

impl DraftRepository for UnavailableRepository {
    fn insert(&self, _form: OnboardingForm) -> Result<OnboardingForm, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update(&self, _form: OnboardingForm) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &DraftId) -> Result<Option<OnboardingForm>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn submitted(&self) -> Result<Vec<ProviderApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}
