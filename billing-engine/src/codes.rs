//! Static OASAS weekly bundle rate tables.
//!
//! The rate/procedure/reimbursement triples live in one explicit table keyed
//! by bundle scope and medication, with the facility tier selecting between
//! the two Medicaid rate codes of a row. Keeping the published figures here
//! makes them auditable and testable in isolation from the classification
//! rules.

use rust_decimal::Decimal;

use crate::models::{FacilityTier, MedicationType};

/// Scope of a weekly bundle claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleScope {
    /// Medication administered or observed on site during the week.
    Full,
    /// Qualifying services only, medication dispensed for unsupervised use.
    TakeHome,
}

/// One row of the bundle rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleRate {
    /// Medicaid rate code billed by freestanding programs.
    pub freestanding_rate_code: &'static str,
    /// Medicaid rate code billed by hospital-based, FQHC, and CCBHC programs.
    pub other_rate_code: &'static str,
    /// Medicare HCPCS G procedure code.
    pub procedure_code: &'static str,
    /// Expected weekly reimbursement in cents.
    pub reimbursement_cents: i64,
}

impl BundleRate {
    /// Medicaid rate code for the given facility tier.
    pub const fn rate_code(&self, tier: FacilityTier) -> &'static str {
        match tier {
            FacilityTier::Freestanding => self.freestanding_rate_code,
            FacilityTier::Other => self.other_rate_code,
        }
    }

    /// Expected weekly reimbursement as a currency amount.
    pub fn reimbursement(&self) -> Decimal {
        Decimal::new(self.reimbursement_cents, 2)
    }
}

const METHADONE_FULL: BundleRate = BundleRate {
    freestanding_rate_code: "7969",
    other_rate_code: "7973",
    procedure_code: "G2067",
    reimbursement_cents: 24750,
};

const BUPRENORPHINE_FULL: BundleRate = BundleRate {
    freestanding_rate_code: "7971",
    other_rate_code: "7975",
    procedure_code: "G2068",
    reimbursement_cents: 23575,
};

const METHADONE_TAKE_HOME: BundleRate = BundleRate {
    freestanding_rate_code: "7970",
    other_rate_code: "7974",
    procedure_code: "G2078",
    reimbursement_cents: 8925,
};

const BUPRENORPHINE_TAKE_HOME: BundleRate = BundleRate {
    freestanding_rate_code: "7972",
    other_rate_code: "7976",
    procedure_code: "G2079",
    reimbursement_cents: 8550,
};

/// Bundle rate table lookup.
pub const fn bundle_rate(scope: BundleScope, medication: MedicationType) -> BundleRate {
    match (scope, medication) {
        (BundleScope::Full, MedicationType::Methadone) => METHADONE_FULL,
        (BundleScope::Full, MedicationType::Buprenorphine) => BUPRENORPHINE_FULL,
        (BundleScope::TakeHome, MedicationType::Methadone) => METHADONE_TAKE_HOME,
        (BundleScope::TakeHome, MedicationType::Buprenorphine) => BUPRENORPHINE_TAKE_HOME,
    }
}

/// Flat APG estimate for one fee-for-service line.
pub fn apg_line_rate() -> Decimal {
    Decimal::new(4525, 2)
}
