//! Step controller for the provider application form.
//!
//! The active step only moves one position at a time and saturates at both
//! ends. Field updates go through [`OnboardingForm::apply`], which rejects
//! updates for a step other than the active one. Submission is allowed from
//! the last step once the terms are accepted and every required field is set.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::domain::{
    ApplicationDraft, DocumentSlot, DraftId, OnboardingStep, ProviderApplication, RequiredField,
    StepProgressEntry,
};
use super::update::{reduce, DraftUpdate};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OnboardingError {
    #[error("{field} belongs to the {expected} step but the form is on {active}")]
    StepMismatch {
        field: &'static str,
        expected: OnboardingStep,
        active: OnboardingStep,
    },
    #[error("{slot} must be an image or PDF (got {file_name})")]
    UnsupportedDocument {
        slot: DocumentSlot,
        file_name: String,
    },
    #[error("the application can only be submitted from the final step (currently on {active})")]
    NotOnFinalStep { active: OnboardingStep },
    #[error("the terms and conditions must be accepted before submitting")]
    TermsNotAccepted,
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),
    #[error("the application has already been submitted")]
    AlreadySubmitted,
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Draft plus the active step index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingForm {
    id: DraftId,
    current: usize,
    draft: ApplicationDraft,
    submitted: Option<ProviderApplication>,
}

impl OnboardingForm {
    pub fn new(id: DraftId) -> Self {
        Self {
            id,
            current: 0,
            draft: ApplicationDraft::default(),
            submitted: None,
        }
    }

    pub fn id(&self) -> &DraftId {
        &self.id
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> OnboardingStep {
        OnboardingStep::from_index(self.current).unwrap_or(OnboardingStep::Personal)
    }

    pub fn submitted(&self) -> Option<&ProviderApplication> {
        self.submitted.as_ref()
    }

    /// Advances one step; a no-op on the last step.
    pub fn next(&mut self) -> OnboardingStep {
        if self.current < OnboardingStep::COUNT - 1 {
            self.current += 1;
        }
        self.current_step()
    }

    /// Goes back one step; a no-op on the first step.
    pub fn previous(&mut self) -> OnboardingStep {
        if self.current > 0 {
            self.current -= 1;
        }
        self.current_step()
    }

    pub fn apply(&mut self, update: DraftUpdate) -> Result<(), OnboardingError> {
        if self.submitted.is_some() {
            return Err(OnboardingError::AlreadySubmitted);
        }

        let active = self.current_step();
        if update.step() != active {
            return Err(OnboardingError::StepMismatch {
                field: update.field_name(),
                expected: update.step(),
                active,
            });
        }

        if let Some((slot, upload)) = update.document() {
            if !upload.matches_accept_hint() {
                return Err(OnboardingError::UnsupportedDocument {
                    slot,
                    file_name: upload.file_name.clone(),
                });
            }
        }

        debug!(draft_id = %self.id, field = update.field_name(), "applied draft update");
        reduce(&mut self.draft, update);
        Ok(())
    }

    /// Whether the submit button would be enabled.
    pub fn can_submit(&self) -> bool {
        self.submitted.is_none() && self.current_step().is_last() && self.draft.terms_accepted
    }

    pub fn submit(&mut self, at: DateTime<Utc>) -> Result<&ProviderApplication, OnboardingError> {
        if self.submitted.is_some() {
            return Err(OnboardingError::AlreadySubmitted);
        }

        let active = self.current_step();
        if !active.is_last() {
            return Err(OnboardingError::NotOnFinalStep { active });
        }
        if !self.draft.terms_accepted {
            return Err(OnboardingError::TermsNotAccepted);
        }

        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(OnboardingError::MissingFields(missing));
        }

        let application = ProviderApplication {
            draft_id: self.id.clone(),
            submitted_at: at,
            draft: self.draft.clone(),
        };
        debug!(draft_id = %self.id, "provider application submitted");
        let frozen: &ProviderApplication = self.submitted.insert(application);
        Ok(frozen)
    }

    pub fn step_progress(&self) -> Vec<StepProgressEntry> {
        OnboardingStep::ordered()
            .into_iter()
            .map(|step| StepProgressEntry {
                step,
                title: step.title(),
                index: step.index(),
                reached: step.index() <= self.current,
            })
            .collect()
    }
}
