//! Request validation utilities for consistent validation across handlers
//!
//! This module provides a `RequestValidation` trait and helper macros to
//! centralize validation logic and ensure consistent error messages.

use crate::error::ApiError;

/// Trait for validating request payloads
///
/// Implement this trait for all create/update request types to ensure
/// consistent validation across the API.
///
/// # Example
///
/// ```rust
/// use emr_server::error::ApiError;
/// use emr_server::validation::RequestValidation;
/// use emr_server::{validate_field, validate_required};
///
/// struct CreateOrderRequest {
///     prescriber: String,
///     dose_mg: f64,
/// }
///
/// impl RequestValidation for CreateOrderRequest {
///     fn validate(&self) -> Result<(), ApiError> {
///         validate_required!(self.prescriber, "Prescriber is required");
///         validate_field!(self.dose_mg, self.dose_mg > 0.0, "Dose must be greater than zero");
///         Ok(())
///     }
/// }
/// ```
pub trait RequestValidation {
    /// Validates the request and returns an error if validation fails
    ///
    /// Returns `Ok(())` if validation passes, or `Err(ApiError)` with
    /// a validation error message if validation fails.
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```rust,ignore
/// validate_field!(self.services, !self.services.is_empty(), "At least one service is required");
/// validate_field!(self.dose_mg, self.dose_mg > Decimal::ZERO, "Dose must be greater than zero");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-empty strings)
///
/// # Usage
///
/// ```rust,ignore
/// validate_required!(self.prescriber, "Prescriber is required");
/// validate_required!(self.signed_by, "Signer name is required");
/// ```
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating UUID fields (non-nil)
///
/// # Usage
///
/// ```rust,ignore
/// validate_uuid!(self.patient_id, "Patient ID is required");
/// ```
#[macro_export]
macro_rules! validate_uuid {
    ($field:expr, $message:expr) => {
        validate_field!($field, !$field.is_nil(), $message);
    };
}

/// Macro for validating string length
///
/// # Usage
///
/// ```rust,ignore
/// validate_length!(self.reason, 3, 500, "Reason must be between 3 and 500 characters");
/// ```
#[macro_export]
macro_rules! validate_length {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        let len = $field.len();
        validate_field!($field, len >= $min && len <= $max, $message);
    };
}

/// Macro for validating numeric ranges
///
/// # Usage
///
/// ```rust,ignore
/// validate_range!(self.page_size, 1, 100, "Page size must be between 1 and 100");
/// ```
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        validate_field!($field, $field >= $min && $field <= $max, $message);
    };
}
