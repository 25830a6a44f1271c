//! Pagination over the filtered row set.
//!
//! The page index is always kept inside `[0, max(page_count - 1, 0)]`.
//! Out-of-range requests are clamped, never rejected.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of pages needed for `total_rows` rows. Zero rows means zero pages.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1))
}

/// Current page index and page size.
///
/// Deserialized state goes through [`PaginationState::new`], so a stored
/// page size of 0 comes back as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPagination")]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
}

#[derive(Deserialize)]
struct StoredPagination {
    #[serde(default)]
    page_index: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
}

fn default_page_size() -> usize {
    crate::config::DEFAULT_PAGE_SIZE
}

impl From<StoredPagination> for PaginationState {
    fn from(stored: StoredPagination) -> Self {
        Self {
            page_index: stored.page_index,
            ..Self::new(stored.page_size)
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// Creates state on the first page. A page size of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: normalize_size(page_size),
        }
    }

    /// Returns the zero-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the page count for `total_rows` rows.
    pub fn page_count(&self, total_rows: usize) -> usize {
        page_count(total_rows, self.page_size)
    }

    /// Returns `true` if there is a page before the current one.
    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Returns `true` if there is a page after the current one.
    pub fn can_next(&self, total_rows: usize) -> bool {
        self.page_index + 1 < self.page_count(total_rows)
    }

    /// Returns the index range of the current page within the filtered rows.
    pub fn row_range(&self, total_rows: usize) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(total_rows);
        let end = (start + self.page_size).min(total_rows);
        start..end
    }

    /// Pulls the page index back into range. Returns `true` if it moved.
    pub fn clamp(&mut self, total_rows: usize) -> bool {
        let last = self.page_count(total_rows).saturating_sub(1);
        if self.page_index > last {
            log::debug!("Clamping page index {} to {}", self.page_index, last);
            self.page_index = last;
            true
        } else {
            false
        }
    }

    /// Jumps to a page, clamped into range. Returns `true` if the page changed.
    pub fn goto_page(&mut self, page_index: usize, total_rows: usize) -> bool {
        let last = self.page_count(total_rows).saturating_sub(1);
        let target = page_index.min(last);
        self.move_to(target)
    }

    /// Moves to the next page. A no-op on the last page.
    pub fn next_page(&mut self, total_rows: usize) -> bool {
        if !self.can_next(total_rows) {
            return false;
        }
        self.move_to(self.page_index + 1)
    }

    /// Moves to the previous page. A no-op on the first page.
    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.move_to(self.page_index - 1)
    }

    /// Moves to the first page.
    pub fn first_page(&mut self) -> bool {
        self.move_to(0)
    }

    /// Moves to the last page.
    pub fn last_page(&mut self, total_rows: usize) -> bool {
        self.goto_page(usize::MAX, total_rows)
    }

    /// Returns to the first page. Used when a filter edit resets paging.
    pub fn reset(&mut self) -> bool {
        self.move_to(0)
    }

    /// Changes the page size, keeping the first visible row on screen.
    ///
    /// The new index is `page_index * old_size / new_size`, then clamped.
    /// Returns `true` if the size or the index changed.
    pub fn set_page_size(&mut self, page_size: usize, total_rows: usize) -> bool {
        let page_size = normalize_size(page_size);
        if page_size == self.page_size {
            return self.clamp(total_rows);
        }

        let top_row = self.page_index * self.page_size;
        log::debug!("Page size {} -> {}", self.page_size, page_size);
        self.page_size = page_size;
        self.page_index = top_row / page_size;
        self.clamp(total_rows);
        true
    }

    fn move_to(&mut self, page_index: usize) -> bool {
        if self.page_index == page_index {
            return false;
        }
        log::debug!("Page {} -> {}", self.page_index, page_index);
        self.page_index = page_index;
        true
    }
}

fn normalize_size(page_size: usize) -> usize {
    if page_size == 0 {
        log::warn!("Page size 0 requested, using 1");
        1
    } else {
        page_size
    }
}

/// One page of rows with its navigation affordances.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    rows: &'a [T],
    page_index: usize,
    page_size: usize,
    page_count: usize,
    total_rows: usize,
}

impl<'a, T> Page<'a, T> {
    /// Returns the rows on this page.
    pub fn rows(&self) -> &'a [T] {
        self.rows
    }

    /// Returns the zero-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the page size the page was cut with.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns the number of rows across all pages.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Returns `true` if there is a previous page.
    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Returns `true` if there is a next page.
    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// Returns every page index, for a page picker.
    pub fn page_options(&self) -> Vec<usize> {
        (0..self.page_count).collect()
    }

    /// Returns the 1-based `(first, last)` row numbers shown, or `None` if the page is empty.
    pub fn row_span(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = self.page_index * self.page_size + 1;
        Some((first, first + self.rows.len() - 1))
    }

    /// Returns `true` if there are no rows on this page.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Cuts the current page out of the filtered rows.
///
/// An index past the end yields an empty page rather than panicking.
pub fn paginate<'a, T>(rows: &'a [T], state: &PaginationState) -> Page<'a, T> {
    let range = state.row_range(rows.len());
    Page {
        rows: &rows[range],
        page_index: state.page_index,
        page_size: state.page_size,
        page_count: state.page_count(rows.len()),
        total_rows: rows.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(12, 5), 3);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn test_twelve_rows_three_pages() {
        let rows: Vec<usize> = (0..12).collect();
        let mut state = PaginationState::new(5);
        assert_eq!(state.page_count(rows.len()), 3);

        assert!(state.goto_page(5, rows.len()));
        assert_eq!(state.page_index(), 2);

        let page = paginate(&rows, &state);
        assert_eq!(page.rows(), &[10, 11]);
        assert!(page.can_previous());
        assert!(!page.can_next());
        assert_eq!(page.row_span(), Some((11, 12)));
        assert_eq!(page.page_options(), vec![0, 1, 2]);
    }

    #[test]
    fn test_navigation_is_noop_at_boundaries() {
        let mut state = PaginationState::new(5);
        assert!(!state.previous_page());
        assert_eq!(state.page_index(), 0);

        assert!(state.next_page(12));
        assert!(state.next_page(12));
        assert!(!state.next_page(12));
        assert_eq!(state.page_index(), 2);

        assert!(state.previous_page());
        assert_eq!(state.page_index(), 1);
    }

    #[test]
    fn test_first_and_last() {
        let mut state = PaginationState::new(4);
        assert!(state.last_page(10));
        assert_eq!(state.page_index(), 2);
        assert!(!state.last_page(10));
        assert!(state.first_page());
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<u8> = Vec::new();
        let mut state = PaginationState::new(5);
        assert!(!state.goto_page(3, 0));
        assert_eq!(state.page_index(), 0);

        let page = paginate(&rows, &state);
        assert_eq!(page.page_count(), 0);
        assert!(page.is_empty());
        assert!(!page.can_next());
        assert!(!page.can_previous());
        assert_eq!(page.row_span(), None);
    }

    #[test]
    fn test_shrinking_rows_clamps() {
        let mut state = PaginationState::new(5);
        state.goto_page(2, 12);
        assert!(state.clamp(6));
        assert_eq!(state.page_index(), 1);
        assert!(state.clamp(0));
        assert_eq!(state.page_index(), 0);
        assert!(!state.clamp(0));
    }

    #[test]
    fn test_page_size_change_keeps_top_row() {
        let mut state = PaginationState::new(5);
        state.goto_page(2, 30);
        // Top row is 10; with 4 rows per page that is page 2
        assert!(state.set_page_size(4, 30));
        assert_eq!(state.page_index(), 2);
        assert_eq!(state.row_range(30), 8..12);

        // Top row 8 with 20 per page lands on page 0
        assert!(state.set_page_size(20, 30));
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_page_size_change_clamps() {
        let mut state = PaginationState::new(2);
        state.goto_page(5, 12);
        assert!(state.set_page_size(10, 12));
        assert_eq!(state.page_index(), 1);
        assert_eq!(state.page_count(12), 2);
    }

    #[test]
    fn test_zero_page_size_is_normalised() {
        let mut state = PaginationState::new(0);
        assert_eq!(state.page_size(), 1);
        state.set_page_size(0, 3);
        assert_eq!(state.page_size(), 1);
    }

    #[test]
    fn test_deserialized_zero_page_size_is_normalised() {
        let state: PaginationState =
            serde_json::from_str(r#"{"page_index":0,"page_size":0}"#).unwrap();
        assert_eq!(state.page_size(), 1);

        let rows = [1, 2, 3];
        let page = paginate(&rows, &state);
        assert_eq!(page.page_count(), 3);
        assert_eq!(page.rows(), &[1]);
    }

    #[test]
    fn test_deserialized_index_is_clamped_on_use() {
        let mut state: PaginationState = serde_json::from_str(r#"{"page_index":9}"#).unwrap();
        assert_eq!(state.page_size(), 5);
        assert!(state.clamp(12));
        assert_eq!(state.page_index(), 2);
    }

    #[test]
    fn test_stale_index_yields_empty_page() {
        let rows: Vec<usize> = (0..12).collect();
        let mut state = PaginationState::new(5);
        state.goto_page(2, 12);
        let page = paginate(&rows[..3], &state);
        assert!(page.is_empty());
    }
}
