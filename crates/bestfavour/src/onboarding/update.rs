use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationDraft, BusinessType, DocumentSlot, DocumentUpload, ExperienceBand,
    OfferedCategory, OnboardingStep,
};

/// One message per draft field. Each variant belongs to exactly one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum DraftUpdate {
    FullName(String),
    Email(String),
    Phone(String),
    IdNumber(String),
    BusinessName(String),
    BusinessType(BusinessType),
    Category(OfferedCategory),
    Experience(ExperienceBand),
    Services(Vec<String>),
    IdentityDocument(DocumentUpload),
    AddressProof(DocumentUpload),
    TermsAccepted(bool),
}

impl DraftUpdate {
    pub const fn step(&self) -> OnboardingStep {
        match self {
            Self::FullName(_) | Self::Email(_) | Self::Phone(_) | Self::IdNumber(_) => {
                OnboardingStep::Personal
            }
            Self::BusinessName(_) | Self::BusinessType(_) => OnboardingStep::Business,
            Self::Category(_) | Self::Experience(_) | Self::Services(_) => {
                OnboardingStep::Services
            }
            Self::IdentityDocument(_) | Self::AddressProof(_) | Self::TermsAccepted(_) => {
                OnboardingStep::Documents
            }
        }
    }

    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::FullName(_) => "full_name",
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
            Self::IdNumber(_) => "id_number",
            Self::BusinessName(_) => "business_name",
            Self::BusinessType(_) => "business_type",
            Self::Category(_) => "category",
            Self::Experience(_) => "experience",
            Self::Services(_) => "services",
            Self::IdentityDocument(_) => "identity_document",
            Self::AddressProof(_) => "address_proof",
            Self::TermsAccepted(_) => "terms_accepted",
        }
    }

    /// Document slot targeted by this update, if any.
    pub fn document(&self) -> Option<(DocumentSlot, &DocumentUpload)> {
        match self {
            Self::IdentityDocument(upload) => Some((DocumentSlot::Identity, upload)),
            Self::AddressProof(upload) => Some((DocumentSlot::AddressProof, upload)),
            _ => None,
        }
    }
}

/// Merges a single field into the draft, leaving every other field untouched.
pub(crate) fn reduce(draft: &mut ApplicationDraft, update: DraftUpdate) {
    match update {
        DraftUpdate::FullName(value) => draft.personal.full_name = value,
        DraftUpdate::Email(value) => draft.personal.email = value,
        DraftUpdate::Phone(value) => draft.personal.phone = value,
        DraftUpdate::IdNumber(value) => draft.personal.id_number = value,
        DraftUpdate::BusinessName(value) => draft.business.business_name = value,
        DraftUpdate::BusinessType(value) => draft.business.business_type = Some(value),
        DraftUpdate::Category(value) => draft.services.category = Some(value),
        DraftUpdate::Experience(value) => draft.services.experience = Some(value),
        DraftUpdate::Services(values) => {
            draft.services.services = values
                .into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect();
        }
        DraftUpdate::IdentityDocument(upload) => {
            draft.documents.replace(DocumentSlot::Identity, upload)
        }
        DraftUpdate::AddressProof(upload) => {
            draft.documents.replace(DocumentSlot::AddressProof, upload)
        }
        DraftUpdate::TermsAccepted(value) => draft.terms_accepted = value,
    }
}
