//! Medication order workflow for OTP dosing
//!
//! Orders are created pending and decided exactly once:
//! - Approval captures the reviewing clinician's signature
//! - Denial captures a reason
//! - Decisions are terminal; any later transition is rejected
//!
//! Storage sits behind a repository trait with an in-memory implementation.

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::*;
pub use models::*;
pub use repository::*;
pub use service::*;
