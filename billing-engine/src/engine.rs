//! OTP bundle vs APG classification rules.

use rust_decimal::Decimal;

use crate::codes::{apg_line_rate, bundle_rate, BundleScope};
use crate::models::{
    BillingRecommendation, ClassificationInput, FacilityCategory, PatientCategory, ServiceCode,
};

/// Classify one week of selected services into a billing recommendation.
///
/// Pure and total: no I/O, no shared state, identical inputs always produce
/// identical output. Rules are evaluated in a fixed order and later rules
/// append to (or, for guest dosing, relabel) earlier conclusions but never
/// retract them:
///
/// 1. Any qualifying service selects a bundle: the full bundle when
///    medication administration is the only selection or accompanies other
///    qualifying services, the take-home bundle otherwise. Non-qualifying
///    services alongside a bundle add one flat APG line and a claim-splitting
///    note.
/// 2. A selection with no qualifying services bills APG only, one line per
///    selected service.
/// 3. Payer and facility overlays append their compliance notes; guest
///    dosing also replaces the method label, leaving the codes and amount
///    from the earlier rules in place.
///
/// Callers gate on a non-empty selection. Called with an empty selection
/// anyway, no billing rule fires and the result carries only the overlay
/// notes.
pub fn classify(input: &ClassificationInput) -> BillingRecommendation {
    let has_qualifying = input.services.has_qualifying();
    let has_non_qualifying = input.services.has_non_qualifying();
    let has_med_admin = input.services.contains(ServiceCode::MedicationAdmin);
    let tier = input.facility_category.tier();

    let mut billing_method = String::new();
    let mut rate_codes = Vec::new();
    let mut procedure_codes = Vec::new();
    let mut estimated_reimbursement = Decimal::ZERO;
    let mut notes = Vec::new();

    if has_qualifying {
        let (label, scope) = if has_med_admin && input.services.len() == 1 {
            ("Full Bundle (Recommended)", BundleScope::Full)
        } else if !has_med_admin {
            ("Take-Home Bundle", BundleScope::TakeHome)
        } else {
            ("Full Bundle", BundleScope::Full)
        };

        let rate = bundle_rate(scope, input.medication);
        billing_method.push_str(label);
        rate_codes.push(rate.rate_code(tier).to_string());
        procedure_codes.push(rate.procedure_code.to_string());
        estimated_reimbursement += rate.reimbursement();

        if has_non_qualifying {
            billing_method.push_str(" + APG for Non-Qualifying Services");
            notes.push("Submit separate APG claim for non-qualifying services".to_string());
            estimated_reimbursement += apg_line_rate();
        }
    } else if has_non_qualifying {
        billing_method.push_str("APG Only");
        rate_codes.push("APG".to_string());
        estimated_reimbursement += apg_line_rate() * Decimal::from(input.services.len());
        notes.push("No qualifying services for bundle billing".to_string());
    }

    if input.patient_category == PatientCategory::DualEligible {
        notes.push("Dual Eligible: Submit to Medicare first, then crossover to Medicaid".to_string());
        notes.push("Use Medicare G codes, then Medicaid bundle rate codes".to_string());
    }

    if input.patient_category == PatientCategory::GuestDosing {
        // Replaces the label only. Codes and reimbursement accumulated above
        // stay attached, matching the published worksheet behavior.
        billing_method = "APG Only (Guest Dosing)".to_string();
        notes.push("Guest dosing cannot use bundle billing per OASAS guidelines".to_string());
    }

    if input.facility_category == FacilityCategory::Fqhc {
        notes.push("FQHC: Cannot bill 1671 rate code and bundle in same week".to_string());
    }

    if input.facility_category == FacilityCategory::Ccbhc {
        notes.push("CCBHC: Medication administration carved out of 1147 rate".to_string());
    }

    BillingRecommendation {
        billing_method,
        rate_codes,
        procedure_codes,
        estimated_reimbursement,
        notes,
    }
}
