//! Response envelope pairing a window of items with a continuation cursor.

use serde::{Deserialize, Serialize};

use crate::{OffsetCursor, PageRequest};

/// One page of results.
///
/// `next_cursor` is present when the page came back full, which is the only
/// signal the offset model has that more items may follow.
///
/// # Examples
/// ```
/// use pagination::{OffsetCursor, Page, PageRequest};
///
/// let page = Page::from_window(vec![1, 2], PageRequest::new(2, 4));
/// let next = page.next_cursor().map(OffsetCursor::decode);
/// assert_eq!(next, Some(Ok(OffsetCursor::new(6))));
///
/// let last = Page::from_window(vec![1], PageRequest::new(2, 6));
/// assert!(last.next_cursor().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Wrap a window produced for `request`.
    #[must_use]
    pub fn from_window(items: Vec<T>, request: PageRequest) -> Self {
        let full = request.limit() > 0 && items.len() >= request.limit();
        let next_cursor = full.then(|| OffsetCursor::new(request.end()).encode());
        Self { items, next_cursor }
    }

    /// Items in the page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Token for the following page, if any.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Convert every item, keeping the cursor.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }

    /// Decompose into items and cursor.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.items, self.next_cursor)
    }
}
