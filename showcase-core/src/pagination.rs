//! Pagination parameters and the list response envelope

use serde::{Deserialize, Serialize};

use crate::models::ValidationError;

/// Page used when the caller doesn't ask for one
pub const DEFAULT_PAGE: u32 = 1;

/// Items per page when the caller doesn't ask for a size
pub const DEFAULT_LIMIT: u32 = 10;

/// Validated page/limit pair.
///
/// Pages are 1-indexed. Out-of-range values are rejected rather than
/// clamped so callers see a 400 instead of a silently different page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    /// Create pagination, requiring `page >= 1` and `limit >= 1`.
    pub fn new(page: u32, limit: u32) -> Result<Self, ValidationError> {
        Self::bounded(page, limit, None)
    }

    /// Like [`Pagination::new`], additionally capping `limit` at `max_limit`.
    pub fn bounded(page: u32, limit: u32, max_limit: Option<u32>) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::OutOfRange {
                field: "page",
                min: 1,
                max: None,
            });
        }
        if limit < 1 || max_limit.is_some_and(|max| limit > max) {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                min: 1,
                max: max_limit,
            });
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> Page<T> {
    /// Wrap one page of results. `total_results` is the unpaginated count.
    pub fn new(results: Vec<T>, pagination: Pagination, total_results: u64) -> Self {
        Self {
            results,
            page: pagination.page(),
            limit: pagination.limit(),
            total_pages: total_results.div_ceil(u64::from(pagination.limit())),
            total_results,
        }
    }

    /// Convert each result, keeping the envelope numbers.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).unwrap().offset(), 0);
        assert_eq!(Pagination::new(2, 10).unwrap().offset(), 10);
        assert_eq!(Pagination::new(3, 25).unwrap().offset(), 50);
    }

    #[test]
    fn offset_does_not_overflow_u32() {
        let p = Pagination::new(u32::MAX, u32::MAX).unwrap();
        assert_eq!(p.offset(), u64::from(u32::MAX - 1) * u64::from(u32::MAX));
    }

    #[test]
    fn rejects_zero_page_and_limit() {
        assert!(matches!(
            Pagination::new(0, 10),
            Err(ValidationError::OutOfRange { field: "page", .. })
        ));
        assert!(matches!(
            Pagination::new(1, 0),
            Err(ValidationError::OutOfRange { field: "limit", .. })
        ));
    }

    #[test]
    fn bounded_limit() {
        assert!(Pagination::bounded(1, 100, Some(100)).is_ok());
        assert!(matches!(
            Pagination::bounded(1, 101, Some(100)),
            Err(ValidationError::OutOfRange {
                field: "limit",
                max: Some(100),
                ..
            })
        ));
        assert!(Pagination::bounded(1, 5000, None).is_ok());
    }

    #[test]
    fn defaults() {
        let p = Pagination::default();
        assert_eq!((p.page(), p.limit()), (1, 10));
    }

    #[test]
    fn total_pages() {
        let p = Pagination::new(1, 10).unwrap();
        assert_eq!(Page::<()>::new(vec![], p, 0).total_pages, 0);
        assert_eq!(Page::<()>::new(vec![], p, 25).total_pages, 3);
        assert_eq!(Page::<()>::new(vec![], p, 100).total_pages, 10);
        assert_eq!(Page::<()>::new(vec![], p, 1).total_pages, 1);
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let page = Page::new(vec![1, 2], Pagination::new(2, 2).unwrap(), 5);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "results": [1, 2],
                "page": 2,
                "limit": 2,
                "totalPages": 3,
                "totalResults": 5
            })
        );
    }

    #[test]
    fn map_keeps_counts() {
        let page = Page::new(vec![1, 2], Pagination::new(1, 2).unwrap(), 7).map(|n| n * 10);
        assert_eq!(page.results, vec![10, 20]);
        assert_eq!(page.total_results, 7);
        assert_eq!(page.total_pages, 4);
    }
}
