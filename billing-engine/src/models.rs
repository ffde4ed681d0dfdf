use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ParseError;

/// A billable OTP service, drawn from two disjoint statically known sets:
/// bundle-qualifying services and services that require separate APG
/// fee-for-service billing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCode {
    // Qualifying (bundle-eligible)
    IndividualCounseling,
    GroupCounseling,
    MedicationAdmin,
    MedicationManagement,
    BriefTreatment,
    ToxicologyTesting,
    // Non-qualifying (separate APG billing)
    AdmissionAssessment,
    PeriodicAssessment,
    PsychiatricEval,
    PeerServices,
    SmokingCessation,
    MedicalVisit,
}

/// Services that count toward the weekly bundle.
pub const QUALIFYING_SERVICES: [ServiceCode; 6] = [
    ServiceCode::IndividualCounseling,
    ServiceCode::GroupCounseling,
    ServiceCode::MedicationAdmin,
    ServiceCode::MedicationManagement,
    ServiceCode::BriefTreatment,
    ServiceCode::ToxicologyTesting,
];

/// Services billed outside the bundle as APG fee-for-service lines.
pub const NON_QUALIFYING_SERVICES: [ServiceCode; 6] = [
    ServiceCode::AdmissionAssessment,
    ServiceCode::PeriodicAssessment,
    ServiceCode::PsychiatricEval,
    ServiceCode::PeerServices,
    ServiceCode::SmokingCessation,
    ServiceCode::MedicalVisit,
];

impl ServiceCode {
    /// Every service code, qualifying first.
    pub const ALL: [ServiceCode; 12] = [
        ServiceCode::IndividualCounseling,
        ServiceCode::GroupCounseling,
        ServiceCode::MedicationAdmin,
        ServiceCode::MedicationManagement,
        ServiceCode::BriefTreatment,
        ServiceCode::ToxicologyTesting,
        ServiceCode::AdmissionAssessment,
        ServiceCode::PeriodicAssessment,
        ServiceCode::PsychiatricEval,
        ServiceCode::PeerServices,
        ServiceCode::SmokingCessation,
        ServiceCode::MedicalVisit,
    ];

    /// Whether this service counts toward bundle billing.
    pub const fn is_qualifying(self) -> bool {
        matches!(
            self,
            ServiceCode::IndividualCounseling
                | ServiceCode::GroupCounseling
                | ServiceCode::MedicationAdmin
                | ServiceCode::MedicationManagement
                | ServiceCode::BriefTreatment
                | ServiceCode::ToxicologyTesting
        )
    }

    /// Wire identifier for this service code.
    pub const fn as_str(self) -> &'static str {
        match self {
            ServiceCode::IndividualCounseling => "individual-counseling",
            ServiceCode::GroupCounseling => "group-counseling",
            ServiceCode::MedicationAdmin => "medication-admin",
            ServiceCode::MedicationManagement => "medication-management",
            ServiceCode::BriefTreatment => "brief-treatment",
            ServiceCode::ToxicologyTesting => "toxicology-testing",
            ServiceCode::AdmissionAssessment => "admission-assessment",
            ServiceCode::PeriodicAssessment => "periodic-assessment",
            ServiceCode::PsychiatricEval => "psychiatric-eval",
            ServiceCode::PeerServices => "peer-services",
            ServiceCode::SmokingCessation => "smoking-cessation",
            ServiceCode::MedicalVisit => "medical-visit",
        }
    }

    /// Human-readable label as shown on the billing worksheet.
    pub const fn label(self) -> &'static str {
        match self {
            ServiceCode::IndividualCounseling => "Individual Counseling",
            ServiceCode::GroupCounseling => "Group Counseling",
            ServiceCode::MedicationAdmin => "Medication Administration / Observation",
            ServiceCode::MedicationManagement => "Medication Management",
            ServiceCode::BriefTreatment => "Brief Treatment",
            ServiceCode::ToxicologyTesting => "Presumptive Toxicology Testing",
            ServiceCode::AdmissionAssessment => "Admission Assessment",
            ServiceCode::PeriodicAssessment => "Periodic Assessment",
            ServiceCode::PsychiatricEval => "Psychiatric Evaluation",
            ServiceCode::PeerServices => "Peer Support Services",
            ServiceCode::SmokingCessation => "Smoking Cessation",
            ServiceCode::MedicalVisit => "Unrelated Medical Visit",
        }
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| ParseError::UnknownServiceCode(s.to_string()))
    }
}

/// A set of selected services for one billing week. Duplicates are
/// impossible and order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceSelection(BTreeSet<ServiceCode>);

impl ServiceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: ServiceCode) -> bool {
        self.0.insert(code)
    }

    pub fn contains(&self, code: ServiceCode) -> bool {
        self.0.contains(&code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// At least one selected service counts toward the bundle.
    pub fn has_qualifying(&self) -> bool {
        self.0.iter().any(|code| code.is_qualifying())
    }

    /// At least one selected service must be billed outside the bundle.
    pub fn has_non_qualifying(&self) -> bool {
        self.0.iter().any(|code| !code.is_qualifying())
    }

    pub fn iter(&self) -> impl Iterator<Item = ServiceCode> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ServiceCode> for ServiceSelection {
    fn from_iter<I: IntoIterator<Item = ServiceCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Medication dispensed by the program.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum MedicationType {
    Methadone,
    Buprenorphine,
}

impl MedicationType {
    pub const ALL: [MedicationType; 2] = [MedicationType::Methadone, MedicationType::Buprenorphine];

    pub const fn as_str(self) -> &'static str {
        match self {
            MedicationType::Methadone => "methadone",
            MedicationType::Buprenorphine => "buprenorphine",
        }
    }
}

impl fmt::Display for MedicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MedicationType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "methadone" => Ok(MedicationType::Methadone),
            "buprenorphine" => Ok(MedicationType::Buprenorphine),
            other => Err(ParseError::UnknownMedicationType(other.to_string())),
        }
    }
}

/// Payer/enrollment category of the patient for the billing week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum PatientCategory {
    MedicaidOnly,
    DualEligible,
    GuestDosing,
    NursingHome,
}

impl PatientCategory {
    pub const ALL: [PatientCategory; 4] = [
        PatientCategory::MedicaidOnly,
        PatientCategory::DualEligible,
        PatientCategory::GuestDosing,
        PatientCategory::NursingHome,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PatientCategory::MedicaidOnly => "medicaid-only",
            PatientCategory::DualEligible => "dual-eligible",
            PatientCategory::GuestDosing => "guest-dosing",
            PatientCategory::NursingHome => "nursing-home",
        }
    }
}

impl fmt::Display for PatientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatientCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatientCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseError::UnknownPatientCategory(s.to_string()))
    }
}

/// Facility designation of the billing program.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum FacilityCategory {
    Freestanding,
    HospitalBased,
    Fqhc,
    Ccbhc,
}

impl FacilityCategory {
    pub const ALL: [FacilityCategory; 4] = [
        FacilityCategory::Freestanding,
        FacilityCategory::HospitalBased,
        FacilityCategory::Fqhc,
        FacilityCategory::Ccbhc,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FacilityCategory::Freestanding => "freestanding",
            FacilityCategory::HospitalBased => "hospital-based",
            FacilityCategory::Fqhc => "fqhc",
            FacilityCategory::Ccbhc => "ccbhc",
        }
    }

    /// Rate tier used by the bundle rate tables. Freestanding programs bill
    /// their own rate codes; hospital-based, FQHC, and CCBHC programs share
    /// the other tier.
    pub const fn tier(self) -> FacilityTier {
        match self {
            FacilityCategory::Freestanding => FacilityTier::Freestanding,
            FacilityCategory::HospitalBased | FacilityCategory::Fqhc | FacilityCategory::Ccbhc => {
                FacilityTier::Other
            }
        }
    }
}

impl fmt::Display for FacilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FacilityCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FacilityCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseError::UnknownFacilityCategory(s.to_string()))
    }
}

/// Rate tier keying the bundle tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityTier {
    Freestanding,
    Other,
}

/// Immutable input to one classification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationInput {
    pub services: ServiceSelection,
    pub medication: MedicationType,
    pub patient_category: PatientCategory,
    pub facility_category: FacilityCategory,
}

impl ClassificationInput {
    pub fn new(
        services: ServiceSelection,
        medication: MedicationType,
        patient_category: PatientCategory,
        facility_category: FacilityCategory,
    ) -> Self {
        Self {
            services,
            medication,
            patient_category,
            facility_category,
        }
    }
}

/// Advisory billing recommendation for one week of services. Recomputed on
/// every call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecommendation {
    /// Human-readable label of the chosen billing method.
    #[schema(example = "Full Bundle (Recommended)")]
    pub billing_method: String,
    /// Medicaid rate codes to submit, in evaluation order. May be empty.
    #[schema(example = json!(["7969"]))]
    pub rate_codes: Vec<String>,
    /// Medicare procedure (G) codes, in evaluation order. May be empty.
    #[schema(example = json!(["G2067"]))]
    pub procedure_codes: Vec<String>,
    /// Accumulated estimated weekly reimbursement. Never negative.
    #[schema(value_type = String, example = "247.50")]
    pub estimated_reimbursement: Decimal,
    /// Advisory and compliance notes in evaluation order.
    pub notes: Vec<String>,
}
