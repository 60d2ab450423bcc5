use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::controller::OnboardingForm;
use super::domain::{
    ApplicationDraft, DraftId, OnboardingStep, ProviderApplication, StepProgressEntry,
};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait DraftRepository: Send + Sync {
    fn insert(&self, form: OnboardingForm) -> Result<OnboardingForm, RepositoryError>;
    fn update(&self, form: OnboardingForm) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &DraftId) -> Result<Option<OnboardingForm>, RepositoryError>;
    fn submitted(&self) -> Result<Vec<ProviderApplication>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("draft already exists")]
    Conflict,
    #[error("draft not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local draft storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDraftRepository {
    forms: Arc<Mutex<HashMap<DraftId, OnboardingForm>>>,
}

impl InMemoryDraftRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<DraftId, OnboardingForm>>, RepositoryError> {
        self.forms
            .lock()
            .map_err(|_| RepositoryError::Unavailable("draft store mutex poisoned".to_string()))
    }
}

impl DraftRepository for InMemoryDraftRepository {
    fn insert(&self, form: OnboardingForm) -> Result<OnboardingForm, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(form.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(form.id().clone(), form.clone());
        Ok(form)
    }

    fn update(&self, form: OnboardingForm) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard.get_mut(form.id()) {
            Some(slot) => {
                *slot = form;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &DraftId) -> Result<Option<OnboardingForm>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn submitted(&self) -> Result<Vec<ProviderApplication>, RepositoryError> {
        let guard = self.lock()?;
        let mut applications: Vec<_> = guard
            .values()
            .filter_map(|form| form.submitted().cloned())
            .collect();
        applications.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(applications)
    }
}

/// Sanitized representation of a draft for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct DraftView {
    pub draft_id: DraftId,
    pub current_step: OnboardingStep,
    pub current_index: usize,
    pub steps: Vec<StepProgressEntry>,
    pub can_submit: bool,
    pub submitted: bool,
    pub draft: ApplicationDraft,
}

impl From<&OnboardingForm> for DraftView {
    fn from(form: &OnboardingForm) -> Self {
        Self {
            draft_id: form.id().clone(),
            current_step: form.current_step(),
            current_index: form.current_index(),
            steps: form.step_progress(),
            can_submit: form.can_submit(),
            submitted: form.submitted().is_some(),
            draft: form.draft().clone(),
        }
    }
}
