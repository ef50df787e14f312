//! Limit/offset page requests and clamped windowing.

use serde::{Deserialize, Serialize};

/// Page size applied when a caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 20;

/// Largest page size accepted from untrusted callers.
pub const MAX_LIMIT: usize = 100;

/// A `limit`/`offset` window over an ordered sequence.
///
/// The request is deliberately permissive: any offset is accepted, and an
/// offset past the end of the sequence yields an empty window rather than an
/// error.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 1);
/// assert_eq!(request.window(&[10, 20, 30, 40]), &[20, 30]);
/// assert!(PageRequest::new(5, 10).window(&[1, 2]).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    limit: usize,
    offset: usize,
}

impl PageRequest {
    /// Build a request from raw values.
    #[must_use]
    pub const fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Build a request whose limit is capped at [`MAX_LIMIT`].
    ///
    /// A missing limit falls back to [`DEFAULT_LIMIT`]. An explicit zero is
    /// kept and produces an empty window.
    ///
    /// # Examples
    /// ```
    /// use pagination::{DEFAULT_LIMIT, MAX_LIMIT, PageRequest};
    ///
    /// assert_eq!(PageRequest::bounded(None, 0).limit(), DEFAULT_LIMIT);
    /// assert_eq!(PageRequest::bounded(Some(0), 0).limit(), 0);
    /// assert_eq!(PageRequest::bounded(Some(5_000), 0).limit(), MAX_LIMIT);
    /// ```
    #[must_use]
    pub fn bounded(limit: Option<usize>, offset: usize) -> Self {
        let effective = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        Self::new(effective, offset)
    }

    /// Maximum number of items in the window.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of leading items skipped before the window starts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Exclusive end index of the window, saturating on overflow.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }

    /// Request for the window that immediately follows this one.
    #[must_use]
    pub const fn following(&self) -> Self {
        Self::new(self.limit, self.end())
    }

    /// Borrow the window out of `items`, clamping both bounds to its length.
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = self.end().min(items.len());
        items.get(start..end).unwrap_or_default()
    }

    /// Consume `items` and keep only the window.
    #[must_use]
    pub fn into_window<T>(self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

/// Number of items a window of `limit` at `offset` holds over `total` items.
///
/// Equals `max(0, min(limit, total - offset))`.
///
/// # Examples
/// ```
/// assert_eq!(pagination::window_len(10, 0, 2), 2);
/// assert_eq!(pagination::window_len(10, 10, 2), 0);
/// assert_eq!(pagination::window_len(3, 4, 9), 3);
/// ```
#[must_use]
pub fn window_len(limit: usize, offset: usize, total: usize) -> usize {
    total.saturating_sub(offset).min(limit)
}

#[cfg(test)]
mod tests {
    //! Windowing edge cases.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 0, 2, 2)]
    #[case(10, 10, 2, 0)]
    #[case(1, 1, 2, 1)]
    #[case(2, 2, 2, 0)]
    #[case(2, 3, 2, 0)]
    #[case(0, 0, 5, 0)]
    #[case(3, 4, 9, 3)]
    fn window_matches_window_len(
        #[case] limit: usize,
        #[case] offset: usize,
        #[case] total: usize,
        #[case] expected: usize,
    ) {
        let items: Vec<usize> = (0..total).collect();
        let request = PageRequest::new(limit, offset);

        assert_eq!(request.window(&items).len(), expected);
        assert_eq!(window_len(limit, offset, total), expected);
        assert_eq!(request.into_window(items).len(), expected);
    }

    #[rstest]
    fn window_preserves_order() {
        let items = ["a", "b", "c", "d", "e"];
        assert_eq!(PageRequest::new(2, 2).window(&items), &["c", "d"]);
    }

    #[rstest]
    fn end_saturates_instead_of_overflowing() {
        let request = PageRequest::new(usize::MAX, 5);
        assert_eq!(request.end(), usize::MAX);
        assert_eq!(request.window(&[1, 2, 3]), &[] as &[i32]);
    }

    #[rstest]
    fn following_advances_by_limit() {
        let next = PageRequest::new(20, 40).following();
        assert_eq!(next, PageRequest::new(20, 60));
    }

    #[rstest]
    #[case(None, DEFAULT_LIMIT)]
    #[case(Some(0), 0)]
    #[case(Some(7), 7)]
    #[case(Some(MAX_LIMIT + 1), MAX_LIMIT)]
    fn bounded_caps_limit(#[case] limit: Option<usize>, #[case] expected: usize) {
        assert_eq!(PageRequest::bounded(limit, 3).limit(), expected);
        assert_eq!(PageRequest::bounded(limit, 3).offset(), 3);
    }
}
