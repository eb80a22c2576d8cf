//! Page arithmetic for offset-paginated listings.

use serde::Serialize;

/// Products shown per listing page.
pub const PAGE_SIZE: i64 = 20;

/// A normalised page request. Page numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    /// Build a request; pages below 1 become page 1.
    #[must_use]
    pub fn new(page: Option<i64>, per_page: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.max(1),
        }
    }

    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.per_page
    }

    /// Row offset, saturating for absurd page numbers.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// One page of results plus the totals needed for navigation.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
        }
    }

    /// Number of pages; 0 when there are no items at all.
    #[must_use]
    pub const fn total_pages(&self) -> i64 {
        if self.total <= 0 {
            0
        } else {
            (self.total + self.per_page - 1) / self.per_page
        }
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside `ILIKE`.
#[must_use]
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_low_pages() {
        assert_eq!(PageRequest::new(None, PAGE_SIZE).page(), 1);
        assert_eq!(PageRequest::new(Some(0), PAGE_SIZE).page(), 1);
        assert_eq!(PageRequest::new(Some(-4), PAGE_SIZE).page(), 1);
        assert_eq!(PageRequest::new(Some(3), PAGE_SIZE).offset(), 40);
    }

    #[test]
    fn test_offset_saturates() {
        let request = PageRequest::new(Some(i64::MAX), PAGE_SIZE);
        assert_eq!(request.offset(), i64::MAX);
    }

    #[test]
    fn test_total_pages() {
        let request = PageRequest::new(Some(1), PAGE_SIZE);
        assert_eq!(Page::<()>::new(vec![], request, 0).total_pages(), 0);
        assert_eq!(Page::<()>::new(vec![], request, 1).total_pages(), 1);
        assert_eq!(Page::<()>::new(vec![], request, 20).total_pages(), 1);
        assert_eq!(Page::<()>::new(vec![], request, 21).total_pages(), 2);
        assert_eq!(Page::<()>::new(vec![], request, 45).total_pages(), 3);
    }

    #[test]
    fn test_prev_next_flags() {
        let first = Page::<()>::new(vec![], PageRequest::new(Some(1), PAGE_SIZE), 45);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = Page::<()>::new(vec![], PageRequest::new(Some(3), PAGE_SIZE), 45);
        assert!(last.has_prev());
        assert!(!last.has_next());

        let beyond = Page::<()>::new(vec![], PageRequest::new(Some(9), PAGE_SIZE), 45);
        assert!(beyond.items.is_empty());
        assert!(!beyond.has_next());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("UltraTech"), "UltraTech");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("tmt_bar"), "tmt\\_bar");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
