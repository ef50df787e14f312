//! Offset pagination primitives shared by Chirp endpoints.
//!
//! The feed pipeline orders a merged sequence in memory and then cuts a page
//! out of it. [`PageRequest`] describes that cut as a `limit`/`offset` pair
//! and clamps it against whatever length the sequence turns out to have.
//! [`OffsetCursor`] lets HTTP clients carry the next offset around as an
//! opaque token, and [`Page`] is the response envelope pairing a window of
//! items with the cursor for the following window.

mod cursor;
mod page;
mod request;

pub use cursor::{CursorError, OffsetCursor};
pub use page::Page;
pub use request::{DEFAULT_LIMIT, MAX_LIMIT, PageRequest, window_len};
