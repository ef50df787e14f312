//! Notifications announced after successful writes.
//!
//! Events leave the service as JSON bytes so any [`EventAnnouncer`] adapter
//! can forward them without knowing the domain types.
//!
//! [`EventAnnouncer`]: crate::domain::ports::EventAnnouncer

use serde::{Deserialize, Serialize};

use crate::domain::{PostId, UserId};

/// Event describing a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A post was stored.
    PostCreated {
        /// New post.
        post_id: PostId,
        /// Author of the post.
        author_id: UserId,
    },
    /// A follow edge was stored.
    FollowCreated {
        /// User who followed.
        follower_id: UserId,
        /// User who was followed.
        followee_id: UserId,
    },
}

impl FeedEvent {
    /// Stable event name carried in the `type` field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PostCreated { .. } => "post_created",
            Self::FollowCreated { .. } => "follow_created",
        }
    }

    /// Human-readable summary.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::PostCreated { post_id, .. } => format!("New post published: {post_id}"),
            Self::FollowCreated { follower_id, .. } => format!("User followed: {follower_id}"),
        }
    }

    /// Encode the event as a JSON payload.
    ///
    /// # Examples
    /// ```
    /// use chirp::domain::{FeedEvent, UserId};
    ///
    /// let event = FeedEvent::FollowCreated {
    ///     follower_id: UserId::new("a").expect("valid id"),
    ///     followee_id: UserId::new("b").expect("valid id"),
    /// };
    /// let bytes = event.to_bytes();
    /// assert_eq!(FeedEvent::from_bytes(&bytes).ok(), Some(event));
    /// ```
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        // Plain strings and UUIDs always serialise.
        serde_json::to_vec(&FeedEventEnvelope::from(self)).unwrap_or_default()
    }

    /// Decode a payload produced by [`FeedEvent::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<FeedEventEnvelope>(bytes).map(Self::from)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum FeedEventBody {
    #[serde(rename_all = "camelCase")]
    PostCreated { post_id: PostId, author_id: UserId },
    #[serde(rename_all = "camelCase")]
    FollowCreated {
        follower_id: UserId,
        followee_id: UserId,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct FeedEventEnvelope {
    #[serde(flatten)]
    body: FeedEventBody,
    message: String,
}

impl From<&FeedEvent> for FeedEventEnvelope {
    fn from(value: &FeedEvent) -> Self {
        let body = match value.clone() {
            FeedEvent::PostCreated { post_id, author_id } => {
                FeedEventBody::PostCreated { post_id, author_id }
            }
            FeedEvent::FollowCreated {
                follower_id,
                followee_id,
            } => FeedEventBody::FollowCreated {
                follower_id,
                followee_id,
            },
        };
        Self {
            body,
            message: value.message(),
        }
    }
}

impl From<FeedEventEnvelope> for FeedEvent {
    fn from(value: FeedEventEnvelope) -> Self {
        match value.body {
            FeedEventBody::PostCreated { post_id, author_id } => {
                Self::PostCreated { post_id, author_id }
            }
            FeedEventBody::FollowCreated {
                follower_id,
                followee_id,
            } => Self::FollowCreated {
                follower_id,
                followee_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn post_created_payload_shape() {
        let post_id = PostId::random();
        let event = FeedEvent::PostCreated {
            post_id,
            author_id: UserId::new("alice").expect("valid id"),
        };
        let value: Value = serde_json::from_slice(&event.to_bytes()).expect("valid JSON");
        assert_eq!(
            value,
            json!({
                "type": "post_created",
                "postId": post_id.to_string(),
                "authorId": "alice",
                "message": format!("New post published: {post_id}"),
            })
        );
        assert_eq!(event.kind(), "post_created");
    }

    #[rstest]
    fn follow_created_message_names_follower() {
        let event = FeedEvent::FollowCreated {
            follower_id: UserId::new("alice").expect("valid id"),
            followee_id: UserId::new("bob").expect("valid id"),
        };
        assert_eq!(event.message(), "User followed: alice");
        let value: Value = serde_json::from_slice(&event.to_bytes()).expect("valid JSON");
        assert_eq!(value.get("type"), Some(&json!("follow_created")));
        assert_eq!(value.get("followeeId"), Some(&json!("bob")));
    }

    #[rstest]
    fn decoding_rejects_unknown_types() {
        let bytes = br#"{"type":"unfollowed","message":"x"}"#;
        assert!(FeedEvent::from_bytes(bytes).is_err());
    }
}
