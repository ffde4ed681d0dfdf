use std::fmt;

use billing_engine::MedicationType;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a medication order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Denied,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Denied,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Denied => "denied",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signature captured when a clinician approves an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalSignature {
    pub signed_by: String,
    pub credentials: Option<String>,
    pub signed_at: DateTime<Utc>,
}

/// A dosing order for an OTP patient.
///
/// Orders start pending and are decided exactly once: approval attaches a
/// signature, denial attaches a reason. Decisions are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOrder {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub prescriber: String,
    pub medication: MedicationType,
    #[schema(value_type = String, example = "80")]
    pub dose_mg: Decimal,
    pub instructions: Option<String>,
    pub status: OrderStatus,
    pub signature: Option<ApprovalSignature>,
    pub denial_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MedicationOrder {
    /// Create a new pending order from a creation payload.
    pub fn pending(new_order: NewOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            patient_id: new_order.patient_id,
            prescriber: new_order.prescriber,
            medication: new_order.medication,
            dose_mg: new_order.dose_mg,
            instructions: new_order.instructions,
            status: OrderStatus::Pending,
            signature: None,
            denial_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating a medication order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub patient_id: Uuid,
    pub medication: MedicationType,
    pub dose_mg: Decimal,
    pub prescriber: String,
    pub instructions: Option<String>,
}

/// Filter for listing and counting orders. None values act as wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub patient_id: Option<Uuid>,
    pub medication: Option<MedicationType>,
}

impl OrderFilter {
    pub fn by_status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Whether an order passes every set field of the filter.
    pub fn matches(&self, order: &MedicationOrder) -> bool {
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        if let Some(patient_id) = self.patient_id {
            if order.patient_id != patient_id {
                return false;
            }
        }
        if let Some(medication) = self.medication {
            if order.medication != medication {
                return false;
            }
        }
        true
    }
}
