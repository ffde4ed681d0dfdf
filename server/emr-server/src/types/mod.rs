//! Shared request/response types used across handlers

pub mod pagination;

pub use pagination::PaginationParams;
