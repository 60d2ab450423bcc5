use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for onboarding drafts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(pub String);

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered steps of the provider application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Personal,
    Business,
    Services,
    Documents,
}

impl OnboardingStep {
    pub const COUNT: usize = 4;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Personal,
            Self::Business,
            Self::Services,
            Self::Documents,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Personal => 0,
            Self::Business => 1,
            Self::Services => 2,
            Self::Documents => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Personal),
            1 => Some(Self::Business),
            2 => Some(Self::Services),
            3 => Some(Self::Documents),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Business => "Business Details",
            Self::Services => "Services Offered",
            Self::Documents => "Documents",
        }
    }

    pub const fn is_last(self) -> bool {
        self.index() == Self::COUNT - 1
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub id_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Individual,
    Company,
    Partnership,
}

impl BusinessType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Company => "Registered Company",
            Self::Partnership => "Partnership",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDetails {
    pub business_name: String,
    pub business_type: Option<BusinessType>,
}

/// Categories a provider can register under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferedCategory {
    HomeServices,
    PersonalCare,
    ProfessionalServices,
    Education,
    HealthAndWellness,
    TechSupport,
    EventsAndEntertainment,
    Automotive,
}

impl OfferedCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HomeServices => "Home Services",
            Self::PersonalCare => "Personal Care",
            Self::ProfessionalServices => "Professional Services",
            Self::Education => "Education",
            Self::HealthAndWellness => "Health & Wellness",
            Self::TechSupport => "Tech Support",
            Self::EventsAndEntertainment => "Events & Entertainment",
            Self::Automotive => "Automotive",
        }
    }
}

/// Years of experience, as offered on the services step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBand {
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5+")]
    FivePlus,
}

impl ExperienceBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneToTwo => "1-2 years",
            Self::ThreeToFive => "3-5 years",
            Self::FivePlus => "5+ years",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetails {
    pub category: Option<OfferedCategory>,
    pub experience: Option<ExperienceBand>,
    pub services: Vec<String>,
}

/// Metadata for an attached file. Contents are not held by the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl DocumentUpload {
    /// Mirrors the `image/*,.pdf` accept hint on the upload inputs.
    pub fn matches_accept_hint(&self) -> bool {
        let by_mime = self
            .mime_type
            .parse::<mime::Mime>()
            .map(|parsed| {
                parsed.type_() == mime::IMAGE
                    || (parsed.type_() == mime::APPLICATION && parsed.subtype() == mime::PDF)
            })
            .unwrap_or(false);

        let by_extension = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        by_mime || by_extension
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSlot {
    Identity,
    AddressProof,
}

impl DocumentSlot {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identity => "ID Document",
            Self::AddressProof => "Proof of Address",
        }
    }
}

impl fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One file per slot; a new upload replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSet {
    pub identity: Option<DocumentUpload>,
    pub address_proof: Option<DocumentUpload>,
}

impl DocumentSet {
    pub fn slot(&self, slot: DocumentSlot) -> Option<&DocumentUpload> {
        match slot {
            DocumentSlot::Identity => self.identity.as_ref(),
            DocumentSlot::AddressProof => self.address_proof.as_ref(),
        }
    }

    pub(crate) fn replace(&mut self, slot: DocumentSlot, upload: DocumentUpload) {
        let target = match slot {
            DocumentSlot::Identity => &mut self.identity,
            DocumentSlot::AddressProof => &mut self.address_proof,
        };
        *target = Some(upload);
    }
}

/// The in-progress provider application, grouped by the step that owns each field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub personal: PersonalDetails,
    pub business: BusinessDetails,
    pub services: ServiceDetails,
    pub documents: DocumentSet,
    pub terms_accepted: bool,
}

/// Field that must be filled before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    FullName,
    Email,
    Phone,
    IdNumber,
    BusinessName,
}

impl RequiredField {
    pub const fn step(self) -> OnboardingStep {
        match self {
            Self::FullName | Self::Email | Self::Phone | Self::IdNumber => {
                OnboardingStep::Personal
            }
            Self::BusinessName => OnboardingStep::Business,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::IdNumber => "ID Number",
            Self::BusinessName => "Business Name",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ApplicationDraft {
    /// Required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let blank = |value: &str| value.trim().is_empty();
        let mut missing = Vec::new();

        if blank(&self.personal.full_name) {
            missing.push(RequiredField::FullName);
        }
        if blank(&self.personal.email) || !self.personal.email.contains('@') {
            missing.push(RequiredField::Email);
        }
        if blank(&self.personal.phone) {
            missing.push(RequiredField::Phone);
        }
        if blank(&self.personal.id_number) {
            missing.push(RequiredField::IdNumber);
        }
        if blank(&self.business.business_name) {
            missing.push(RequiredField::BusinessName);
        }

        missing
    }
}

/// Frozen application produced by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderApplication {
    pub draft_id: DraftId,
    pub submitted_at: DateTime<Utc>,
    pub draft: ApplicationDraft,
}

/// Progress indicator entry for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepProgressEntry {
    pub step: OnboardingStep,
    pub title: &'static str,
    pub index: usize,
    pub reached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(file_name: &str, mime_type: &str) -> DocumentUpload {
        DocumentUpload {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes: 1024,
        }
    }

    #[test]
    fn step_indices_round_trip() {
        for step in OnboardingStep::ordered() {
            assert_eq!(OnboardingStep::from_index(step.index()), Some(step));
        }
        assert_eq!(OnboardingStep::from_index(4), None);
        assert!(OnboardingStep::Documents.is_last());
    }

    #[test]
    fn accept_hint_allows_images_and_pdfs() {
        assert!(upload("id.png", "image/png").matches_accept_hint());
        assert!(upload("scan.PDF", "application/octet-stream").matches_accept_hint());
        assert!(upload("proof", "application/pdf").matches_accept_hint());
        assert!(!upload("notes.docx", "application/msword").matches_accept_hint());
        assert!(!upload("archive.zip", "not a mime").matches_accept_hint());
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        let mut draft = ApplicationDraft::default();
        draft.personal.email = "no-at-sign".to_string();
        draft.personal.phone = "021 555 0100".to_string();

        assert_eq!(
            draft.missing_fields(),
            vec![
                RequiredField::FullName,
                RequiredField::Email,
                RequiredField::IdNumber,
                RequiredField::BusinessName,
            ]
        );
    }

    #[test]
    fn experience_bands_use_form_values_on_the_wire() {
        let encoded = serde_json::to_string(&ExperienceBand::FivePlus).expect("serializes");
        assert_eq!(encoded, "\"5+\"");
        let decoded: ExperienceBand = serde_json::from_str("\"3-5\"").expect("deserializes");
        assert_eq!(decoded, ExperienceBand::ThreeToFive);
    }
}
