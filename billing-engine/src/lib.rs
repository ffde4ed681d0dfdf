//! OTP billing classification engine
//!
//! Classifies one week of selected Opioid Treatment Program services into a
//! billing recommendation:
//! - Full and take-home weekly bundles with OASAS rate codes and Medicare G codes
//! - APG fee-for-service fallback for non-qualifying services
//! - Payer and facility overlays (dual eligible crossover, guest dosing, FQHC, CCBHC)
//!
//! The engine is a pure function over an immutable input; persistence and
//! transport live in the crates around it.

pub mod codes;
pub mod engine;
pub mod error;
pub mod models;

pub use codes::*;
pub use engine::*;
pub use error::*;
pub use models::*;
