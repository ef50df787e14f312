//! Posts published by users.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Maximum number of Unicode scalar values allowed in a post.
pub const POST_CONTENT_MAX: usize = 280;

/// Validation errors returned by [`PostContent::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Content was empty or whitespace only.
    EmptyContent,
    /// Content exceeded [`POST_CONTENT_MAX`] characters.
    ContentTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length that was submitted.
        actual: usize,
    },
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "post content must not be empty"),
            Self::ContentTooLong { max, actual } => write!(
                f,
                "post content must be at most {max} characters (got {actual})"
            ),
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Unique post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a new random [`PostId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Validated post body.
///
/// # Examples
/// ```
/// use chirp::domain::{POST_CONTENT_MAX, PostContent};
///
/// assert!(PostContent::new("hello").is_ok());
/// assert!(PostContent::new("  ").is_err());
/// assert!(PostContent::new("x".repeat(POST_CONTENT_MAX + 1)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostContent(String);

impl PostContent {
    /// Validate and construct post content.
    pub fn new(content: impl Into<String>) -> Result<Self, PostValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }
        let actual = content.chars().count();
        if actual > POST_CONTENT_MAX {
            return Err(PostValidationError::ContentTooLong {
                max: POST_CONTENT_MAX,
                actual,
            });
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PostContent> for String {
    fn from(value: PostContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for PostContent {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Immutable published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: PostId,
    author_id: UserId,
    content: PostContent,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Assemble a post from validated parts.
    #[must_use]
    pub const fn new(
        id: PostId,
        author_id: UserId,
        content: PostContent,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            content,
            created_at,
        }
    }

    /// Post identifier.
    #[must_use]
    pub const fn id(&self) -> PostId {
        self.id
    }

    /// Author of the post.
    #[must_use]
    pub const fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Post body.
    #[must_use]
    pub const fn content(&self) -> &PostContent {
        &self.content
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Content validation rules.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn rejects_blank_content(#[case] raw: &str) {
        assert_eq!(PostContent::new(raw), Err(PostValidationError::EmptyContent));
    }

    #[rstest]
    fn accepts_exactly_the_maximum() {
        let raw = "é".repeat(POST_CONTENT_MAX);
        assert!(PostContent::new(raw).is_ok());
    }

    #[rstest]
    fn counts_characters_not_bytes() {
        let raw = "é".repeat(POST_CONTENT_MAX + 1);
        assert_eq!(
            PostContent::new(raw),
            Err(PostValidationError::ContentTooLong {
                max: POST_CONTENT_MAX,
                actual: POST_CONTENT_MAX + 1,
            })
        );
    }

    #[rstest]
    fn post_serialises_camel_case() {
        let id = PostId::random();
        let created_at = DateTime::<Utc>::UNIX_EPOCH;
        let post = Post::new(
            id,
            UserId::new("alice").expect("valid id"),
            PostContent::new("hi").expect("valid content"),
            created_at,
        );
        let value = serde_json::to_value(&post).expect("post serialises");
        assert_eq!(
            value,
            serde_json::json!({
                "id": id.to_string(),
                "authorId": "alice",
                "content": "hi",
                "createdAt": "1970-01-01T00:00:00Z",
            })
        );
    }
}
