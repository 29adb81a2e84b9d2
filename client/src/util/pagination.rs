//! Client-side pagination for the trip and receipt tables.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

pub const PAGE_SIZE: usize = 10;

/// One page of a list of `total` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// Zero-based, always within `0..count`.
    pub index: usize,
    /// Never below 1, even for an empty list.
    pub count: usize,
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl Page {
    /// Clamp `requested` into range for a list of `total` rows.
    #[must_use]
    pub fn new(total: usize, requested: usize, size: usize) -> Self {
        let size = size.max(1);
        let count = total.div_ceil(size).max(1);
        let index = requested.min(count - 1);
        let start = (index * size).min(total);
        let end = (start + size).min(total);
        Self { index, count, start, end, total }
    }

    /// The rows on this page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.start..self.end).unwrap_or(&[])
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.count
    }

    /// "Showing a-b of n", one-based.
    #[must_use]
    pub fn label(&self) -> String {
        if self.total == 0 {
            return "No records".to_owned();
        }
        format!("Showing {}-{} of {}", self.start + 1, self.end, self.total)
    }
}
