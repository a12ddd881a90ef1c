//! Page window planning and pagination metadata.

use crate::types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageWindow, PaginationMeta};

use super::coerce;

/// Turns raw `page`/`limit` values into a bounded [`PageWindow`] and computes
/// [`PaginationMeta`] once the total is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationPlanner;

impl PaginationPlanner {
    /// Plans the page window.
    ///
    /// Missing, malformed, zero or negative pages become page 1. Missing,
    /// malformed or zero limits become [`DEFAULT_PAGE_SIZE`]; other limits are
    /// clamped into `1..=MAX_PAGE_SIZE`.
    pub fn plan(raw_page: Option<&str>, raw_limit: Option<&str>) -> PageWindow {
        let page = coerce::integer(raw_page)
            .filter(|p| *p >= 1)
            .map_or(1, |p| u32::try_from(p).unwrap_or(u32::MAX));

        let limit = match coerce::integer(raw_limit) {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(l) => l.clamp(1, i64::from(MAX_PAGE_SIZE)) as u32,
        };

        PageWindow {
            offset: u64::from(page - 1) * u64::from(limit),
            limit,
            page,
        }
    }

    /// Computes pagination metadata for `total` matching rows.
    pub fn metadata(total: u64, page: u32, limit: u32) -> PaginationMeta {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        PaginationMeta {
            page,
            limit,
            total,
            total_pages,
            has_next_page: u64::from(page) < total_pages,
            has_prev_page: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_defaults() {
        let window = PaginationPlanner::plan(None, None);
        assert_eq!(
            window,
            PageWindow {
                offset: 0,
                limit: 10,
                page: 1
            }
        );
    }

    #[test]
    fn test_plan_offset() {
        let window = PaginationPlanner::plan(Some("3"), Some("20"));
        assert_eq!(window.offset, 40);
        assert_eq!(window.limit, 20);
        assert_eq!(window.page, 3);
    }

    #[test]
    fn test_plan_zero_limit_means_default() {
        assert_eq!(PaginationPlanner::plan(None, Some("0")).limit, 10);
    }

    #[test]
    fn test_plan_clamps_limit() {
        assert_eq!(PaginationPlanner::plan(None, Some("1000")).limit, 100);
        assert_eq!(PaginationPlanner::plan(None, Some("-5")).limit, 1);
    }

    #[test]
    fn test_plan_bad_page_is_first_page() {
        for raw in ["0", "-3", "abc", ""] {
            let window = PaginationPlanner::plan(Some(raw), Some("10"));
            assert_eq!(window.page, 1, "{raw}");
            assert_eq!(window.offset, 0, "{raw}");
        }
    }

    #[test]
    fn test_plan_bounds_hold_for_any_input() {
        let samples = [
            None,
            Some(""),
            Some("0"),
            Some("1"),
            Some("-1"),
            Some("99999999999"),
            Some("-99999999999"),
            Some("4.7"),
            Some("NaN"),
            Some("x"),
        ];
        for page in samples {
            for limit in samples {
                let w = PaginationPlanner::plan(page, limit);
                assert!(w.page >= 1);
                assert!((1..=100).contains(&w.limit));
                assert_eq!(w.offset, u64::from(w.page - 1) * u64::from(w.limit));
            }
        }
    }

    #[test]
    fn test_metadata_empty() {
        let meta = PaginationPlanner::metadata(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_metadata_middle_page() {
        let meta = PaginationPlanner::metadata(25, 2, 10);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_metadata_last_page() {
        let meta = PaginationPlanner::metadata(25, 3, 10);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let json = serde_json::to_value(PaginationPlanner::metadata(25, 2, 10)).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["hasPrevPage"], true);
    }
}
