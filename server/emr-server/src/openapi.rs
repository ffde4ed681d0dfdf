use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::EmrServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,
        crate::handlers::health::system_status,

        // Billing endpoints
        crate::handlers::billing::classify_week,
        crate::handlers::billing::list_service_codes,

        // Order endpoints
        crate::handlers::orders::create_order,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::approve_order,
        crate::handlers::orders::deny_order,

        // Navigation endpoints
        crate::handlers::navigation::navigation_counts,
    ),
    components(
        schemas(
            // Health schemas
            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,
            crate::handlers::health::StatusResponse,
            crate::handlers::health::ServiceStatus,

            // Billing schemas
            crate::handlers::billing::ClassifyRequest,
            crate::handlers::billing::ServiceCodeEntry,
            billing_engine::BillingRecommendation,
            billing_engine::ServiceCode,
            billing_engine::MedicationType,
            billing_engine::PatientCategory,
            billing_engine::FacilityCategory,

            // Order schemas
            crate::handlers::orders::CreateOrderRequest,
            crate::handlers::orders::ApproveOrderRequest,
            crate::handlers::orders::DenyOrderRequest,
            medication_orders::MedicationOrder,
            medication_orders::ApprovalSignature,
            medication_orders::OrderStatus,

            // Navigation schemas
            crate::services::NavigationCount,
        )
    ),
    tags(
        (name = "health", description = "System health and status endpoints"),
        (name = "billing", description = "OTP bundle and APG billing classification"),
        (name = "orders", description = "Medication order workflow"),
        (name = "navigation", description = "Sidebar navigation counts"),
    ),
    info(
        title = "Bridgeway EMR API",
        version = "0.1.0",
        description = "Outpatient behavioral health clinic API: OTP billing classification, medication order workflow, and navigation counts.",
        contact(
            name = "Bridgeway EMR Team",
            email = "team@bridgeway-emr.dev",
            url = "https://bridgeway-emr.dev"
        ),
        license(
            name = "AGPL-3.0-only",
            url = "https://github.com/bridgeway-health/bridgeway-emr/blob/main/LICENSE"
        ),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
        (url = "https://api.bridgeway-emr.dev", description = "Production server"),
    ),
)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
pub fn create_docs_routes() -> Router<EmrServer> {
    Router::new().merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
}
