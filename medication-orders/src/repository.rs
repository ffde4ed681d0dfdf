use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{MedicationOrder, OrderFilter, OrderStatus};

/// Repository interface for storing medication orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a newly created order
    async fn insert(&self, order: MedicationOrder) -> OrderResult<MedicationOrder>;

    /// Fetch one order by id
    async fn get(&self, id: Uuid) -> OrderResult<MedicationOrder>;

    /// Replace a pending order with its decided form.
    ///
    /// Fails with an invalid-transition error when the stored order has
    /// already been decided, so a decision can never be overwritten.
    async fn decide(&self, order: MedicationOrder) -> OrderResult<MedicationOrder>;

    /// List orders matching the filter, newest first
    async fn list(&self, filter: &OrderFilter) -> OrderResult<Vec<MedicationOrder>>;

    /// Count orders matching the filter
    async fn count(&self, filter: &OrderFilter) -> OrderResult<usize>;
}

/// In-memory order repository for testing and development
pub struct InMemoryOrderRepository {
    orders: Arc<DashMap<Uuid, MedicationOrder>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: MedicationOrder) -> OrderResult<MedicationOrder> {
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> OrderResult<MedicationOrder> {
        self.orders
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(OrderError::NotFound(id))
    }

    async fn decide(&self, order: MedicationOrder) -> OrderResult<MedicationOrder> {
        // The entry guard holds the shard lock, so the pending check and the
        // replacement happen atomically for this order.
        match self.orders.entry(order.id) {
            Entry::Occupied(mut entry) => {
                if entry.get().status != OrderStatus::Pending {
                    return Err(OrderError::InvalidTransition {
                        from: entry.get().status,
                        to: order.status,
                    });
                }
                entry.insert(order.clone());
                Ok(order)
            }
            Entry::Vacant(_) => Err(OrderError::NotFound(order.id)),
        }
    }

    async fn list(&self, filter: &OrderFilter) -> OrderResult<Vec<MedicationOrder>> {
        let mut orders: Vec<MedicationOrder> = self
            .orders
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(orders)
    }

    async fn count(&self, filter: &OrderFilter) -> OrderResult<usize> {
        Ok(self
            .orders
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewOrder;
    use billing_engine::MedicationType;
    use rust_decimal::Decimal;

    fn pending_order(medication: MedicationType) -> MedicationOrder {
        MedicationOrder::pending(NewOrder {
            patient_id: Uuid::new_v4(),
            medication,
            dose_mg: Decimal::new(160, 1),
            prescriber: "Dr. Okafor".to_string(),
            instructions: Some("Observe dosing".to_string()),
        })
    }

    #[tokio::test]
    async fn test_in_memory_order_repository() {
        let repo = InMemoryOrderRepository::new();

        let order = pending_order(MedicationType::Methadone);
        repo.insert(order.clone()).await.unwrap();

        // Fetch it back
        let fetched = repo.get(order.id).await.unwrap();
        assert_eq!(fetched, order);

        // Filtered listing and counting
        let pending = repo
            .list(&OrderFilter::by_status(OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(
            repo.count(&OrderFilter::by_status(OrderStatus::Approved))
                .await
                .unwrap(),
            0
        );

        // Missing id
        let missing = Uuid::new_v4();
        assert_eq!(
            repo.get(missing).await.unwrap_err(),
            OrderError::NotFound(missing)
        );
    }

    #[tokio::test]
    async fn test_decide_replaces_pending_exactly_once() {
        let repo = InMemoryOrderRepository::new();
        let order = pending_order(MedicationType::Buprenorphine);
        repo.insert(order.clone()).await.unwrap();

        let mut approved = order.clone();
        approved.status = OrderStatus::Approved;
        repo.decide(approved).await.unwrap();

        // A second decision must be rejected
        let mut denied = order.clone();
        denied.status = OrderStatus::Denied;
        let err = repo.decide(denied).await.unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Approved,
                to: OrderStatus::Denied,
            }
        );
    }

    #[tokio::test]
    async fn test_decide_unknown_order_is_not_found() {
        let repo = InMemoryOrderRepository::new();
        let order = pending_order(MedicationType::Methadone);
        let err = repo.decide(order.clone()).await.unwrap_err();
        assert_eq!(err, OrderError::NotFound(order.id));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryOrderRepository::new();
        for _ in 0..3 {
            repo.insert(pending_order(MedicationType::Methadone))
                .await
                .unwrap();
        }

        let orders = repo.list(&OrderFilter::default()).await.unwrap();
        assert_eq!(orders.len(), 3);
        for window in orders.windows(2) {
            assert!(window[0].created_at >= window[1].created_at);
        }
    }
}
