//! Pagination query parameters and response metadata.

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::StatusError,
};
use serde::{Deserialize, Serialize};

use bazaar_app::pagination::{Page, PageRequest};

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationResponse {
    /// 1-based page number
    pub page: u32,

    /// Items per page
    pub page_size: u32,

    /// Total number of items across all pages
    pub total: u64,

    /// Total number of pages
    pub total_pages: u64,
}

impl<T> From<&Page<T>> for PaginationResponse {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            total_pages: page.total_pages,
        }
    }
}

/// Build a validated page request from `?page=&page_size=`.
pub(crate) fn page_request(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
) -> Result<PageRequest, StatusError> {
    PageRequest::from_query(page.into_inner(), page_size.into_inner())
        .validate()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))
}
