//! Pagination metadata and the page-number window shown under a list.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Terminals narrower than this get the reduced window
pub const NARROW_WIDTH: usize = 80;
pub const NARROW_WINDOW: usize = 3;

/// Computed pagination descriptors for one page of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    /// 1-based index of the first item on this page, 0 when the page is empty
    pub start_index: usize,
    /// 1-based index of the last item on this page, 0 when the page is empty
    pub end_index: usize,
}

impl PaginationMeta {
    pub fn new(page: usize, page_size: usize, total_count: usize) -> Self {
        let page = page.max(1);
        let total_pages = if page_size > 0 {
            total_count.div_ceil(page_size).max(1)
        } else {
            1
        };

        let first = (page - 1).saturating_mul(page_size).saturating_add(1);
        let (start_index, end_index) = if total_count == 0 || page_size == 0 || first > total_count
        {
            (0, 0)
        } else {
            (first, page.saturating_mul(page_size).min(total_count))
        };

        Self {
            page,
            page_size,
            total_count,
            total_pages,
            has_previous_page: page > 1,
            has_next_page: page < total_pages,
            start_index,
            end_index,
        }
    }

    /// Metadata for a collection that arrived whole, as a single page.
    pub fn single_page(item_count: usize, requested_page_size: usize) -> Self {
        Self::new(1, item_count.max(requested_page_size).max(1), item_count)
    }

    /// Zero-based slice bounds of this page within the full collection.
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.page_size).min(self.total_count);
        let end = self.page.saturating_mul(self.page_size).min(self.total_count);
        (start, end)
    }
}

/// Navigation request emitted by the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIntent {
    Previous,
    Next,
    Go(usize),
}

/// Bounded window of page buttons plus previous/next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControl {
    window: usize,
}

impl PaginationControl {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Shrink the window on narrow terminals.
    pub fn for_width(columns: usize, window: usize) -> Self {
        if columns < NARROW_WIDTH {
            Self::new(window.min(NARROW_WINDOW))
        } else {
            Self::new(window)
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Page numbers to render for `meta`.
    pub fn pages(&self, meta: &PaginationMeta) -> RangeInclusive<usize> {
        page_window(meta.page, meta.total_pages, self.window)
    }

    /// Target page for an intent, or `None` when the button is disabled.
    pub fn resolve(&self, meta: &PaginationMeta, intent: PageIntent) -> Option<usize> {
        match intent {
            PageIntent::Previous if meta.has_previous_page => Some(meta.page - 1),
            PageIntent::Next if meta.has_next_page => Some(meta.page + 1),
            PageIntent::Go(n) if self.pages(meta).contains(&n) => Some(n),
            _ => None,
        }
    }
}

/// Window of at most `window` pages around `current`, shifted left when it
/// would run past `total_pages`.
pub fn page_window(current: usize, total_pages: usize, window: usize) -> RangeInclusive<usize> {
    let total = total_pages.max(1);
    let window = window.max(1);

    let current = current.clamp(1, total);
    let mut start = current.saturating_sub(window / 2).max(1);
    let end = start.saturating_add(window - 1).min(total);
    if end - start + 1 < window {
        start = end.saturating_sub(window - 1).max(1);
    }
    start..=end
}
