//! Pagination envelope shared by every listing endpoint.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 20;
/// Hard cap on page size; larger requests are clamped, not rejected.
pub const MAX_LIMIT: u32 = 100;

/// Query parameters for a paginated listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    /// Page that was served (1-based).
    pub current: u32,
    /// Limit the page was computed with, after clamping.
    pub limit: u32,
    /// Total matching records across all pages.
    pub records: u64,
    /// Total page count for this limit.
    pub pages: u64,
}

impl Pagination {
    /// Page count for a record total at a given limit.
    pub fn pages_for(records: u64, limit: u32) -> u64 {
        if limit == 0 {
            return 0;
        }
        records.div_ceil(u64::from(limit))
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub pagination: Pagination,
    pub data: Vec<T>,
}
