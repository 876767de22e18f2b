//! Offset-based pagination primitives shared by list endpoints.

use serde::{Deserialize, Serialize};

/// Default number of records per page when the caller omits `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Upper bound on `limit` to keep list queries bounded.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a caller-supplied limit into `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a caller-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Sort direction applied to an entity's fixed sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortOrder {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A validated page request. Construct via [`PageRequest::new`] so the
/// limit and offset are always clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
    pub order: SortOrder,
}

impl PageRequest {
    pub fn new(limit: Option<i64>, offset: Option<i64>, order: Option<SortOrder>) -> Self {
        Self {
            limit: clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            offset: clamp_offset(offset),
            order: order.unwrap_or_default(),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// Pagination metadata returned alongside every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    /// 1-based page number of this window.
    pub page: i64,
    pub page_count: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMeta {
    pub fn new(total: i64, request: &PageRequest) -> Self {
        let limit = request.limit.max(1);
        let total = total.max(0);
        Self {
            total,
            limit,
            offset: request.offset,
            page: (request.offset / limit).saturating_add(1),
            page_count: total / limit + i64::from(total % limit != 0),
            has_previous_page: request.offset > 0,
            // Offsets come straight from the query string and may be near i64::MAX.
            has_next_page: request.offset.saturating_add(limit) < total,
        }
    }
}

/// A page of records plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            data,
            meta: PageMeta::new(total, request),
        }
    }
}
