//! Shared query parameter types for API handlers.

use kennel_core::pagination::{PageRequest, SortOrder};
use kennel_core::types::Timestamp;
use kennel_db::Criteria;
use serde::Deserialize;

/// Paging and creation-range parameters accepted by every list endpoint
/// (`?limit=&offset=&order=&createdAfter=&createdBefore=`).
///
/// Entity-specific equality filters are extracted separately from the same
/// query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order: Option<SortOrder>,
    pub created_after: Option<Timestamp>,
    pub created_before: Option<Timestamp>,
}

impl ListParams {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset, self.order)
    }

    pub fn criteria<F>(&self, fields: F) -> Criteria<F> {
        Criteria {
            fields,
            created_after: self.created_after,
            created_before: self.created_before,
        }
    }
}

/// Generic pagination parameters (`?limit=&offset=&order=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order: Option<SortOrder>,
}

impl PaginationParams {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset, self.order)
    }
}

/// `GET /<prefix>/search?q=&limit=&offset=`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchParams {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset, None)
    }
}
