//! Sidebar navigation count aggregation
//!
//! The clinic front end decorates its navigation tree with live counts
//! (pending orders, worklist sizes, catalog sizes). Each count is an
//! independent probe; probes run concurrently and a failing probe degrades
//! to zero instead of failing the whole aggregation.

use std::sync::Arc;

use billing_engine::{MedicationType, NON_QUALIFYING_SERVICES, QUALIFYING_SERVICES};
use futures::future::join_all;
use medication_orders::{OrderFilter, OrderService, OrderStatus};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

/// One labeled count for the navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavigationCount {
    /// Stable probe label the front end keys on
    #[schema(example = "pending-orders")]
    pub label: String,
    #[schema(example = 4)]
    pub count: u64,
}

impl NavigationCount {
    fn new(label: &str, count: u64) -> Self {
        Self {
            label: label.to_string(),
            count,
        }
    }
}

/// Aggregates the counts shown next to navigation entries
pub struct NavigationService {
    orders: Arc<OrderService>,
}

impl NavigationService {
    pub fn new(orders: Arc<OrderService>) -> Self {
        Self { orders }
    }

    /// Run every probe concurrently and return counts in probe-list order.
    ///
    /// A failed probe is logged at warn level and reported as zero; partial
    /// results are preferred over failing the whole response.
    pub async fn counts(&self) -> Vec<NavigationCount> {
        let order_probes = [
            ("pending-orders", OrderFilter::by_status(OrderStatus::Pending)),
            ("approved-orders", OrderFilter::by_status(OrderStatus::Approved)),
            ("denied-orders", OrderFilter::by_status(OrderStatus::Denied)),
            ("total-orders", OrderFilter::default()),
            (
                "pending-methadone-orders",
                OrderFilter {
                    status: Some(OrderStatus::Pending),
                    medication: Some(MedicationType::Methadone),
                    ..OrderFilter::default()
                },
            ),
            (
                "pending-buprenorphine-orders",
                OrderFilter {
                    status: Some(OrderStatus::Pending),
                    medication: Some(MedicationType::Buprenorphine),
                    ..OrderFilter::default()
                },
            ),
        ];

        let probes = order_probes
            .map(|(label, filter)| async move { (label, self.orders.count(&filter).await) });

        let mut counts: Vec<NavigationCount> = join_all(probes)
            .await
            .into_iter()
            .map(|(label, result)| match result {
                Ok(count) => NavigationCount::new(label, count as u64),
                Err(error) => {
                    warn!(probe = label, %error, "Navigation count probe failed, reporting zero");
                    NavigationCount::new(label, 0)
                }
            })
            .collect();

        // Catalog sizes are static but the front end keys on them the same way
        counts.push(NavigationCount::new(
            "qualifying-services",
            QUALIFYING_SERVICES.len() as u64,
        ));
        counts.push(NavigationCount::new(
            "non-qualifying-services",
            NON_QUALIFYING_SERVICES.len() as u64,
        ));

        counts
    }
}
