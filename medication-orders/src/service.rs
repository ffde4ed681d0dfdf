use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{ApprovalSignature, MedicationOrder, NewOrder, OrderFilter, OrderStatus};
use crate::repository::{InMemoryOrderRepository, OrderRepository};

/// Medication order workflow service.
///
/// Owns the order lifecycle: creation, review decisions, and the filtered
/// reads that back worklists and dashboard counts. Storage is behind the
/// repository trait.
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    /// Create a service over the given repository
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    /// Create a service over a fresh in-memory repository
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryOrderRepository::new()))
    }

    /// Create a new pending order
    pub async fn create(&self, new_order: NewOrder) -> OrderResult<MedicationOrder> {
        if new_order.prescriber.trim().is_empty() {
            return Err(OrderError::Validation(
                "Prescriber name is required".to_string(),
            ));
        }
        if new_order.dose_mg <= Decimal::ZERO {
            return Err(OrderError::Validation(
                "Dose must be greater than zero".to_string(),
            ));
        }

        let order = MedicationOrder::pending(new_order);
        let order = self.repository.insert(order).await?;
        info!(
            order_id = %order.id,
            medication = %order.medication,
            "Created pending medication order"
        );
        Ok(order)
    }

    /// Fetch one order by id
    pub async fn get(&self, id: Uuid) -> OrderResult<MedicationOrder> {
        self.repository.get(id).await
    }

    /// List orders matching the filter, newest first
    pub async fn list(&self, filter: &OrderFilter) -> OrderResult<Vec<MedicationOrder>> {
        self.repository.list(filter).await
    }

    /// Count orders matching the filter
    pub async fn count(&self, filter: &OrderFilter) -> OrderResult<usize> {
        self.repository.count(filter).await
    }

    /// Approve a pending order, capturing the reviewing clinician's signature
    pub async fn approve(
        &self,
        id: Uuid,
        signed_by: &str,
        credentials: Option<String>,
    ) -> OrderResult<MedicationOrder> {
        let signed_by = signed_by.trim();
        if signed_by.is_empty() {
            return Err(OrderError::Validation(
                "Approval requires a signer name".to_string(),
            ));
        }

        let order = self.repository.get(id).await?;
        if order.status != OrderStatus::Pending {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Approved,
            });
        }

        let now = Utc::now();
        let mut approved = order;
        approved.status = OrderStatus::Approved;
        approved.signature = Some(ApprovalSignature {
            signed_by: signed_by.to_string(),
            credentials,
            signed_at: now,
        });
        approved.updated_at = now;

        let approved = self.repository.decide(approved).await?;
        info!(order_id = %approved.id, signed_by, "Approved medication order");
        Ok(approved)
    }

    /// Deny a pending order with a reason
    pub async fn deny(&self, id: Uuid, reason: &str) -> OrderResult<MedicationOrder> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(OrderError::Validation(
                "Denial requires a reason".to_string(),
            ));
        }

        let order = self.repository.get(id).await?;
        if order.status != OrderStatus::Pending {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Denied,
            });
        }

        let mut denied = order;
        denied.status = OrderStatus::Denied;
        denied.denial_reason = Some(reason.to_string());
        denied.updated_at = Utc::now();

        let denied = self.repository.decide(denied).await?;
        info!(order_id = %denied.id, "Denied medication order");
        Ok(denied)
    }
}
