//! Provider onboarding: the multi-step application form, its draft storage,
//! and the HTTP surface used by the apply page.

pub mod controller;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod update;

#[cfg(test)]
mod tests;

pub use controller::{OnboardingError, OnboardingForm};
pub use domain::{
    ApplicationDraft, BusinessDetails, BusinessType, DocumentSet, DocumentSlot, DocumentUpload,
    DraftId, ExperienceBand, OfferedCategory, OnboardingStep, PersonalDetails,
    ProviderApplication, RequiredField, ServiceDetails, StepProgressEntry,
};
pub use repository::{DraftRepository, DraftView, InMemoryDraftRepository, RepositoryError};
pub use router::onboarding_router;
pub use service::{OnboardingService, OnboardingServiceError};
pub use update::DraftUpdate;
