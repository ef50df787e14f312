//! Follow relationship workflow.
//!
//! Implements [`FollowCommand`]. A self-follow is rejected before any store
//! access; re-following an existing edge succeeds without writing or
//! announcing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::port_error_mapping::{map_announce_error, map_user_store_error};
use crate::domain::ports::{EventAnnouncer, FollowCommand, FollowRequest, UserRepository};
use crate::domain::{Error, FeedEvent, FollowOutcome};

/// Service implementing [`FollowCommand`].
#[derive(Clone)]
pub struct RelationshipService<U, A> {
    users: Arc<U>,
    announcer: Arc<A>,
}

impl<U, A> RelationshipService<U, A> {
    /// Create the service.
    pub const fn new(users: Arc<U>, announcer: Arc<A>) -> Self {
        Self { users, announcer }
    }
}

#[async_trait]
impl<U, A> FollowCommand for RelationshipService<U, A>
where
    U: UserRepository,
    A: EventAnnouncer,
{
    async fn follow(&self, request: FollowRequest) -> Result<(), Error> {
        let FollowRequest {
            follower_id,
            followee_id,
        } = request;

        if follower_id == followee_id {
            return Err(Error::invalid_follow_action("users cannot follow themselves"));
        }

        let mut follower = self
            .users
            .find_by_id(&follower_id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(|| Error::user_not_found(&follower_id))?;

        if self
            .users
            .find_by_id(&followee_id)
            .await
            .map_err(map_user_store_error)?
            .is_none()
        {
            return Err(Error::user_not_found(&followee_id));
        }

        let outcome = follower
            .follow(followee_id.clone())
            .map_err(|err| Error::invalid_follow_action(err.to_string()))?;
        if outcome == FollowOutcome::AlreadyFollowing {
            debug!(%follower_id, %followee_id, "follow edge already present");
            return Ok(());
        }

        self.users
            .save(&follower)
            .await
            .map_err(map_user_store_error)?;

        let event = FeedEvent::FollowCreated {
            follower_id: follower_id.clone(),
            followee_id: followee_id.clone(),
        };
        self.announcer
            .publish(&event.to_bytes())
            .await
            .map_err(map_announce_error)?;

        info!(%follower_id, %followee_id, "follow recorded");
        Ok(())
    }
}

#[cfg(test)]
#[path = "relationship_service_tests.rs"]
mod tests;
