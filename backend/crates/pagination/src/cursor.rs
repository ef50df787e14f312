//! Opaque cursor tokens carrying an offset between requests.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised when decoding a client-supplied cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The token is not valid URL-safe base64.
    #[error("cursor is not valid base64")]
    InvalidEncoding,
    /// The decoded bytes are not a cursor payload.
    #[error("cursor payload is malformed")]
    InvalidPayload,
}

/// Offset position wrapped in an opaque, URL-safe token.
///
/// The token is base64 over a small JSON object so the payload can grow
/// without breaking clients that treat it as opaque.
///
/// # Examples
/// ```
/// use pagination::OffsetCursor;
///
/// let token = OffsetCursor::new(40).encode();
/// assert_eq!(OffsetCursor::decode(&token).map(|c| c.offset()), Ok(40));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OffsetCursor {
    #[serde(rename = "o")]
    offset: usize,
}

impl OffsetCursor {
    /// Wrap an offset.
    #[must_use]
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Offset carried by the cursor.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Render the cursor as an opaque token.
    #[must_use]
    pub fn encode(&self) -> String {
        // A struct with a single integer field always serialises.
        let payload = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(payload)
    }

    /// Parse a token produced by [`OffsetCursor::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::InvalidEncoding`] for non-base64 input and
    /// [`CursorError::InvalidPayload`] when the decoded bytes are not a
    /// cursor.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| CursorError::InvalidEncoding)?;
        serde_json::from_slice(&bytes).map_err(|_| CursorError::InvalidPayload)
    }
}
