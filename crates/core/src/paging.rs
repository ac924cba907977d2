//! Page-number pagination.
//!
//! Pages are 1-based and index-only: page `n` skips `(n - 1) * size` rows and
//! takes at most `size`. There is no total count and no cursor, so concurrent
//! inserts can shift rows between pages.

use std::ops::Range;

use crate::error::CoreError;

/// Page used when the caller omits `pageNumber`.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Page size used when the caller omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
    offset: i64,
}

impl PageRequest {
    /// Build a page window, rejecting non-positive numbers and offsets that
    /// overflow `i64`.
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, CoreError> {
        if page_number < 1 {
            return Err(CoreError::Validation(format!(
                "pageNumber must be at least 1, got {page_number}"
            )));
        }
        if page_size < 1 {
            return Err(CoreError::Validation(format!(
                "pageSize must be at least 1, got {page_size}"
            )));
        }
        let offset = (page_number - 1)
            .checked_mul(page_size)
            .ok_or_else(|| CoreError::Validation("page window is out of range".into()))?;

        Ok(Self {
            page_number,
            page_size,
            offset,
        })
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    /// Rows to take (SQL `LIMIT`).
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip (SQL `OFFSET`).
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// The slice of an in-memory, already filtered sequence of `total` rows
    /// that this page covers. Empty when the page starts past the end.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(total);
        let len = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        let end = start.saturating_add(len).min(total);
        start..end
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}
