use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::controller::{OnboardingError, OnboardingForm};
use super::domain::{DraftId, ProviderApplication};
use super::repository::{DraftRepository, RepositoryError};
use super::update::DraftUpdate;

/// Service wrapping the step controller with draft storage.
pub struct OnboardingService<R> {
    repository: Arc<R>,
}

static DRAFT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_draft_id() -> DraftId {
    let id = DRAFT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DraftId(format!("draft-{id:06}"))
}

impl<R> OnboardingService<R>
where
    R: DraftRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Opens a fresh draft on the first step.
    pub fn start(&self) -> Result<OnboardingForm, OnboardingServiceError> {
        let form = OnboardingForm::new(next_draft_id());
        let stored = self.repository.insert(form)?;
        info!(draft_id = %stored.id(), "onboarding draft started");
        Ok(stored)
    }

    pub fn get(&self, id: &DraftId) -> Result<OnboardingForm, OnboardingServiceError> {
        let form = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(form)
    }

    pub fn apply(
        &self,
        id: &DraftId,
        update: DraftUpdate,
    ) -> Result<OnboardingForm, OnboardingServiceError> {
        self.modify(id, |form| form.apply(update))
    }

    pub fn next(&self, id: &DraftId) -> Result<OnboardingForm, OnboardingServiceError> {
        self.modify(id, |form| {
            form.next();
            Ok(())
        })
    }

    pub fn previous(&self, id: &DraftId) -> Result<OnboardingForm, OnboardingServiceError> {
        self.modify(id, |form| {
            form.previous();
            Ok(())
        })
    }

    pub fn submit(&self, id: &DraftId) -> Result<ProviderApplication, OnboardingServiceError> {
        let mut form = self.get(id)?;
        let application = form.submit(Utc::now())?.clone();
        self.repository.update(form)?;
        info!(draft_id = %id, "provider application received");
        Ok(application)
    }

    pub fn submitted(&self) -> Result<Vec<ProviderApplication>, OnboardingServiceError> {
        Ok(self.repository.submitted()?)
    }

    fn modify<F>(&self, id: &DraftId, change: F) -> Result<OnboardingForm, OnboardingServiceError>
    where
        F: FnOnce(&mut OnboardingForm) -> Result<(), OnboardingError>,
    {
        let mut form = self.get(id)?;
        change(&mut form)?;
        self.repository.update(form.clone())?;
        Ok(form)
    }
}

/// Error raised by the onboarding service.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingServiceError {
    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
