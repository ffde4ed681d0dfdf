pub mod paths;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{billing, health, navigation, orders},
    openapi,
    server::EmrServer,
};

/// Create health check routes
pub fn health_routes() -> Router<EmrServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
        .route(paths::health::STATUS, get(health::system_status))
}

/// Create billing classification routes
pub fn billing_routes() -> Router<EmrServer> {
    Router::new()
        .route(paths::billing::CLASSIFY, post(billing::classify_week))
        .route(paths::billing::SERVICE_CODES, get(billing::list_service_codes))
}

/// Create medication order routes
pub fn order_routes() -> Router<EmrServer> {
    Router::new()
        .route(paths::orders::ORDERS, post(orders::create_order))
        .route(paths::orders::ORDERS, get(orders::list_orders))
        .route(paths::orders::ORDER_BY_ID, get(orders::get_order))
        .route(paths::orders::APPROVE, post(orders::approve_order))
        .route(paths::orders::DENY, post(orders::deny_order))
}

/// Create navigation count routes
pub fn navigation_routes() -> Router<EmrServer> {
    Router::new().route(paths::navigation::COUNTS, get(navigation::navigation_counts))
}

/// Create all API v1 routes
pub fn api_v1_routes() -> Router<EmrServer> {
    Router::new()
        .merge(billing_routes())
        .merge(order_routes())
        .merge(navigation_routes())
}

/// Create the main application routes
pub fn create_routes() -> Router<EmrServer> {
    Router::new()
        // Health check routes (outside the versioned prefix)
        .merge(health_routes())
        // API documentation routes
        .merge(openapi::create_docs_routes())
        // API v1 routes
        .nest(paths::API_V1, api_v1_routes())
}
