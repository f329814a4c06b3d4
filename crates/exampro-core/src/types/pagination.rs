//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 20;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamped to sane bounds.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self::bounded(page, page_size, MAX_PAGE_SIZE)
    }

    /// Create a page request with a caller-supplied maximum page size.
    pub fn bounded(page: u64, page_size: u64, max_page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, max_page_size.max(1)),
        }
    }

    /// Number of items to skip. Saturates for absurd page numbers.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Maximum number of items to return.
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// `OFFSET` bind value for SQL, capped at `i64::MAX`.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }

    /// `LIMIT` bind value for SQL.
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit()).unwrap_or(i64::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: &PageRequest, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page.page_size)
        };
        Self {
            items,
            page: page.page,
            page_size: page.page_size,
            total_items,
            total_pages,
            has_next: page.page < total_pages,
            has_previous: page.page > 1,
        }
    }

    /// Build a page by slicing an already ordered, fully materialised list.
    pub fn from_ordered(all: Vec<T>, page: &PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Self::new(items, page, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(0, 1000);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_from_ordered_slices_and_counts() {
        let page = PageRequest::new(2, 2);
        let resp = PageResponse::from_ordered(vec![1, 2, 3, 4, 5], &page);
        assert_eq!(resp.items, vec![3, 4]);
        assert_eq!(resp.total_items, 5);
        assert_eq!(resp.total_pages, 3);
        assert!(resp.has_next);
        assert!(resp.has_previous);
    }

    #[test]
    fn test_empty_has_one_page() {
        let resp: PageResponse<u8> =
            PageResponse::from_ordered(Vec::new(), &PageRequest::default());
        assert_eq!(resp.total_pages, 1);
        assert!(!resp.has_next);
    }

    #[test]
    fn test_huge_page_number_saturates() {
        let page = PageRequest::new(u64::MAX, 100);
        assert_eq!(page.offset(), u64::MAX);
        assert_eq!(page.sql_offset(), i64::MAX);
        assert_eq!(page.sql_limit(), 100);

        let resp = PageResponse::from_ordered(vec![1, 2, 3], &page);
        assert!(resp.items.is_empty());
        assert_eq!(resp.total_items, 3);
        assert!(!resp.has_next);
    }
}
