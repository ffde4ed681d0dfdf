//! Pagination types and utilities for consistent pagination across all endpoints

use crate::error::{PaginationInfo, ResponseMetadata};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

/// Standard pagination parameters for list endpoints
///
/// All list endpoints should use this type for consistent pagination behavior.
/// This struct is flattened into endpoint-specific query structs, and flattened
/// query values arrive as strings, so the numeric fields accept both forms.
#[derive(Debug, Deserialize, IntoParams, ToSchema, Clone)]
pub struct PaginationParams {
    #[param(example = 1, minimum = 1)]
    #[serde(default, deserialize_with = "deserialize_optional_u32")]
    pub page: Option<u32>,

    #[param(example = 20, minimum = 1, maximum = 100)]
    #[serde(default, deserialize_with = "deserialize_optional_u32")]
    pub page_size: Option<u32>,
}

fn deserialize_optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(value)) => Ok(Some(value)),
        Some(NumberOrString::Text(text)) => {
            text.parse::<u32>().map(Some).map_err(serde::de::Error::custom)
        }
    }
}

impl PaginationParams {
    /// Get the page number (defaults to 1, minimum 1)
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get the page size (defaults to 20, clamped between 1 and 100)
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(20).min(100).max(1)
    }

    /// Calculate the number of records to skip before this page
    pub fn offset(&self) -> usize {
        ((self.page() - 1) * self.page_size()) as usize
    }

    /// Get the maximum number of records on a page (alias for page_size)
    pub fn limit(&self) -> usize {
        self.page_size() as usize
    }

    /// Calculate total pages given a total count
    pub fn total_pages(&self, total_count: i64) -> u32 {
        if total_count == 0 {
            return 1;
        }
        ((total_count as f64) / (self.page_size() as f64)).ceil() as u32
    }

    /// Create response metadata with pagination info
    pub fn to_metadata(&self, total_count: i64) -> ResponseMetadata {
        let total_pages = self.total_pages(total_count);

        ResponseMetadata {
            pagination: Some(PaginationInfo {
                page: self.page() as i32,
                page_size: self.page_size() as i32,
                total_pages: total_pages as i32,
                has_next: self.page() < total_pages,
                has_previous: self.page() > 1,
            }),
            total_count: Some(total_count),
            request_id: None,
        }
    }

    /// Wrap data with pagination metadata
    pub fn wrap_response<T>(&self, data: T, total_count: i64) -> crate::error::ApiResponse<T> {
        crate::error::api_success_with_meta(data, self.to_metadata(total_count))
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: Some(20),
        }
    }
}
