use std::env;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use medication_orders::OrderService;

use crate::services::NavigationService;

/// Main EMR server state
///
/// Cheap to clone; all services are behind `Arc`s. One instance is shared
/// across every request as axum state.
#[derive(Clone)]
pub struct EmrServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Medication order workflow service
    pub orders: Arc<OrderService>,
    /// Sidebar count aggregation service
    pub navigation: Arc<NavigationService>,
    /// Instant the server state was built, for uptime reporting
    pub started_at: DateTime<Utc>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Maximum concurrent connections
    pub max_connections: usize,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Enable audit logging
    pub audit_logging: bool,
}

impl EmrServer {
    /// Create a new EMR server instance over fresh in-memory services
    pub fn new() -> Self {
        let config = ServerConfig::from_env();
        let orders = Arc::new(OrderService::in_memory());
        let navigation = Arc::new(NavigationService::new(Arc::clone(&orders)));

        Self {
            config,
            orders,
            navigation,
            started_at: Utc::now(),
        }
    }

    /// Get server configuration
    pub fn get_config(&self) -> &ServerConfig {
        &self.config
    }

    /// Seconds elapsed since the server state was built
    pub fn uptime_seconds(&self) -> u64 {
        let elapsed = Utc::now().signed_duration_since(self.started_at);
        elapsed.num_seconds().max(0) as u64
    }
}

impl Default for EmrServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        Self {
            name: env::var("EMR_SERVER_NAME").unwrap_or_else(|_| "Bridgeway EMR".to_string()),
            max_connections: env_parse("EMR_MAX_CONNECTIONS", 1000),
            request_timeout: env_parse("EMR_REQUEST_TIMEOUT_SECONDS", 30),
            audit_logging: env_parse("EMR_AUDIT_LOGGING", true),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Bridgeway EMR".to_string(),
            max_connections: 1000,
            request_timeout: 30,
            audit_logging: true,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
