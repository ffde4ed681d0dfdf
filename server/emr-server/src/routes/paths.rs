//! Centralized API route path constants
//!
//! This module provides constants for all API routes to ensure consistency
//! between runtime route definitions and OpenAPI documentation.
//!
//! Router-relative constants (`paths::<domain>::*`) use axum's `:param`
//! capture syntax and are mounted under [`API_V1`]; the `api_v1` module
//! carries the full `{param}`-style paths that the `#[utoipa::path]`
//! attributes reference.

/// API base paths
pub const API_V1: &str = "/api/v1";

/// Health check endpoints (mounted at the router root)
pub mod health {
    pub const HEALTH: &str = "/health";
    pub const VERSION: &str = "/health/version";
    pub const STATUS: &str = "/health/status";
}

/// Billing classification endpoints
pub mod billing {
    pub const CLASSIFY: &str = "/billing/classify";
    pub const SERVICE_CODES: &str = "/billing/service-codes";
}

/// Medication order endpoints
pub mod orders {
    pub const ORDERS: &str = "/orders";
    pub const ORDER_BY_ID: &str = "/orders/:id";
    pub const APPROVE: &str = "/orders/:id/approve";
    pub const DENY: &str = "/orders/:id/deny";
}

/// Navigation count endpoints
pub mod navigation {
    pub const COUNTS: &str = "/navigation/counts";
}

/// Full API paths (for utoipa documentation and tests)
///
/// These are the full paths including the `/api/v1` prefix, with `{param}`
/// placeholders in OpenAPI syntax.
pub mod api_v1 {
    // Health
    pub const HEALTH: &str = "/health";
    pub const HEALTH_VERSION: &str = "/health/version";
    pub const HEALTH_STATUS: &str = "/health/status";

    // Billing
    pub const BILLING_CLASSIFY: &str = "/api/v1/billing/classify";
    pub const BILLING_SERVICE_CODES: &str = "/api/v1/billing/service-codes";

    // Orders
    pub const ORDERS: &str = "/api/v1/orders";
    pub const ORDER_BY_ID: &str = "/api/v1/orders/{id}";
    pub const ORDER_APPROVE: &str = "/api/v1/orders/{id}/approve";
    pub const ORDER_DENY: &str = "/api/v1/orders/{id}/deny";

    // Navigation
    pub const NAVIGATION_COUNTS: &str = "/api/v1/navigation/counts";
}
