use thiserror::Error;
use uuid::Uuid;

use crate::models::OrderStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Medication order not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid status transition: {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type OrderResult<T> = Result<T, OrderError>;
