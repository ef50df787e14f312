//! Driving port for recording follow relationships.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserId};

/// Request for `follower_id` to follow `followee_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    /// User who follows.
    pub follower_id: UserId,
    /// User to be followed.
    pub followee_id: UserId,
}

/// Driving port for follow operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowCommand: Send + Sync {
    /// Add a follow edge.
    ///
    /// Following an already-followed user succeeds without side effects.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when a user tries to follow themselves.
    /// - `NotFound` when either user does not exist.
    /// - `ServiceUnavailable` or `InternalError` when the store or the
    ///   announcer fails.
    async fn follow(&self, request: FollowRequest) -> Result<(), Error>;
}

/// Fixture command that only enforces the self-follow rule.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFollowCommand;

#[async_trait]
impl FollowCommand for FixtureFollowCommand {
    async fn follow(&self, request: FollowRequest) -> Result<(), Error> {
        if request.follower_id == request.followee_id {
            return Err(Error::invalid_follow_action("users cannot follow themselves"));
        }
        Ok(())
    }
}
