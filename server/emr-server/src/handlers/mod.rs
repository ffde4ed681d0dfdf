//! HTTP request handlers grouped by API domain

pub mod billing;
pub mod health;
pub mod navigation;
pub mod orders;
