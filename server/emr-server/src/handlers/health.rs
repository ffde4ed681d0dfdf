use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::EmrServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// System uptime in seconds
    #[schema(example = 3600)]
    pub uptime: u64,
    /// Individual service health checks
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    /// Application name
    #[schema(example = "Bridgeway EMR")]
    pub name: String,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Enabled features
    pub features: Vec<String>,
}

/// System status response
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Server name
    #[schema(example = "Bridgeway EMR")]
    pub server_name: String,
    /// Uptime in seconds
    #[schema(example = 3600)]
    pub uptime_seconds: u64,
    /// Audit logging enabled
    pub audit_logging: bool,
    /// Individual service statuses
    pub services: HashMap<String, ServiceStatus>,
}

/// Service status information
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    /// Service name
    #[schema(example = "Medication Orders")]
    pub name: String,
    /// Current status
    #[schema(example = "running")]
    pub status: String,
    /// Last health check timestamp
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub last_check: String,
    /// Error message if any
    pub error: Option<String>,
}

/// Health check handler
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::HEALTH,
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<EmrServer>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    let mut checks = HashMap::new();

    // The order store is in-process; probe it with a wildcard count
    let orders_check = match server
        .orders
        .count(&medication_orders::OrderFilter::default())
        .await
    {
        Ok(_) => "healthy".to_string(),
        Err(error) => format!("unhealthy: {error}"),
    };
    checks.insert("order_store".to_string(), orders_check);
    checks.insert("billing_engine".to_string(), "healthy".to_string());

    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime_seconds(),
        checks,
    };

    Ok(Json(api_success(response)))
}

/// Version information handler
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::HEALTH_VERSION,
    tag = "health",
    responses(
        (status = 200, description = "Version information retrieved successfully", body = VersionResponse)
    )
)]
pub async fn version_info() -> Result<Json<ApiResponse<VersionResponse>>, ApiError> {
    let features = vec![
        "otp-bundle-billing".to_string(),
        "medication-orders".to_string(),
        "navigation-counts".to_string(),
    ];

    let response = VersionResponse {
        name: "Bridgeway EMR".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features,
    };

    Ok(Json(api_success(response)))
}

/// System status handler
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::HEALTH_STATUS,
    tag = "health",
    responses(
        (status = 200, description = "System status retrieved successfully", body = StatusResponse)
    )
)]
pub async fn system_status(
    State(server): State<EmrServer>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let mut services = HashMap::new();

    services.insert(
        "medication_orders".to_string(),
        ServiceStatus {
            name: "Medication Orders".to_string(),
            status: "running".to_string(),
            last_check: chrono::Utc::now().to_rfc3339(),
            error: None,
        },
    );

    services.insert(
        "billing_engine".to_string(),
        ServiceStatus {
            name: "Billing Classification Engine".to_string(),
            status: "running".to_string(),
            last_check: chrono::Utc::now().to_rfc3339(),
            error: None,
        },
    );

    services.insert(
        "navigation".to_string(),
        ServiceStatus {
            name: "Navigation Counts".to_string(),
            status: "running".to_string(),
            last_check: chrono::Utc::now().to_rfc3339(),
            error: None,
        },
    );

    let response = StatusResponse {
        server_name: server.config.name.clone(),
        uptime_seconds: server.uptime_seconds(),
        audit_logging: server.config.audit_logging,
        services,
    };

    Ok(Json(api_success(response)))
}
