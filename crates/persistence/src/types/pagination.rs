//! Offset pagination types for listing results.

use serde::{Deserialize, Serialize};

/// Default page size when none (or zero) is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A bounded slice of the result set.
///
/// Always satisfies `page >= 1`, `1 <= limit <= MAX_PAGE_SIZE` and
/// `offset == (page - 1) * limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum number of rows to return.
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Number of rows matching the predicate.
    pub total: u64,
    /// `ceil(total / limit)`; 0 when nothing matches.
    pub total_pages: u64,
    /// `page < total_pages`
    pub has_next_page: bool,
    /// `page > 1`
    pub has_prev_page: bool,
}
