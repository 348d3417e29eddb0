//! Page-number pagination utilities.
//!
//! Pages are 1-based. A page beyond the last one is not an error: it simply
//! selects no rows.

use serde::{Deserialize, Serialize};

/// Default number of rows per page in listing tables.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Summary of the current page for rendering a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl PageInfo {
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        Self {
            page,
            per_page,
            total,
            total_pages: page_count(total, per_page),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed to show `total` rows, `ceil(total / per_page)`.
///
/// A zero page size yields zero pages.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Index range of the rows on `page` within a collection of `total` rows.
///
/// Out-of-range pages (including page 0) produce an empty range.
pub fn page_bounds(page: usize, per_page: usize, total: usize) -> std::ops::Range<usize> {
    if page == 0 || per_page == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= total {
        return total..total;
    }
    let end = start.saturating_add(per_page).min(total);
    start..end
}

/// Returns the slice of `items` shown on `page`.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    &items[page_bounds(page, per_page, items.len())]
}
