use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use billing_engine::{
    classify, BillingRecommendation, ClassificationInput, FacilityCategory, MedicationType,
    PatientCategory, ServiceCode, ServiceSelection,
};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::validate_field;
use crate::validation::RequestValidation;

/// One week of services to classify for a patient
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    /// Services delivered during the billing week; duplicates collapse
    /// into a single selection
    #[schema(example = json!(["medication-admin", "individual-counseling"]))]
    pub services: Vec<ServiceCode>,
    pub medication: MedicationType,
    pub patient_category: PatientCategory,
    pub facility_category: FacilityCategory,
}

impl RequestValidation for ClassifyRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(
            self.services,
            !self.services.is_empty(),
            "At least one service must be selected"
        );
        Ok(())
    }
}

/// Catalog entry for one billable service code
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceCodeEntry {
    pub code: ServiceCode,
    /// Human-readable label as shown on the billing worksheet
    #[schema(example = "Individual Counseling")]
    pub label: String,
    /// Whether the service counts toward bundle billing
    pub qualifying: bool,
}

impl From<ServiceCode> for ServiceCodeEntry {
    fn from(code: ServiceCode) -> Self {
        Self {
            code,
            label: code.label().to_string(),
            qualifying: code.is_qualifying(),
        }
    }
}

/// Service code catalog query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ServiceCodeParams {
    /// Return only the entry with this wire identifier
    pub code: Option<String>,
}

/// Classify one week of selected services into a billing recommendation
#[utoipa::path(
    post,
    path = crate::routes::paths::api_v1::BILLING_CLASSIFY,
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Billing recommendation computed", body = BillingRecommendation),
        (status = 400, description = "Empty selection or unknown enum identifier")
    ),
    tag = "billing"
)]
pub async fn classify_week(
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ApiResponse<BillingRecommendation>>, ApiError> {
    req.validate()?;

    let services: ServiceSelection = req.services.iter().copied().collect();
    let input = ClassificationInput::new(
        services,
        req.medication,
        req.patient_category,
        req.facility_category,
    );

    Ok(Json(api_success(classify(&input))))
}

/// Service code catalog handler
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::BILLING_SERVICE_CODES,
    responses(
        (status = 200, description = "Service code catalog retrieved", body = Vec<ServiceCodeEntry>),
        (status = 400, description = "Unknown service code filter")
    ),
    params(ServiceCodeParams),
    tag = "billing"
)]
pub async fn list_service_codes(
    Query(params): Query<ServiceCodeParams>,
) -> Result<Json<ApiResponse<Vec<ServiceCodeEntry>>>, ApiError> {
    let entries = match params.code.as_deref() {
        Some(raw) => vec![ServiceCodeEntry::from(raw.parse::<ServiceCode>()?)],
        None => ServiceCode::ALL
            .iter()
            .copied()
            .map(ServiceCodeEntry::from)
            .collect(),
    };

    Ok(Json(api_success(entries)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_request_requires_services() {
        let request = ClassifyRequest {
            services: vec![],
            medication: MedicationType::Methadone,
            patient_category: PatientCategory::MedicaidOnly,
            facility_category: FacilityCategory::Freestanding,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_classify_request_deserializes_camel_case() {
        let request: ClassifyRequest = serde_json::from_value(serde_json::json!({
            "services": ["medication-admin"],
            "medication": "methadone",
            "patientCategory": "medicaid-only",
            "facilityCategory": "freestanding"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.services, vec![ServiceCode::MedicationAdmin]);
        assert_eq!(request.patient_category, PatientCategory::MedicaidOnly);
    }

    #[test]
    fn test_catalog_entry_carries_label_and_flag() {
        let entry = ServiceCodeEntry::from(ServiceCode::PsychiatricEval);
        assert_eq!(entry.label, "Psychiatric Evaluation");
        assert!(!entry.qualifying);
    }
}
