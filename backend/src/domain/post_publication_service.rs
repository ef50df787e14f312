//! Post publication workflow.
//!
//! Implements [`PostCommand`]: the author must exist, the content must pass
//! validation, then the post is stored and announced. An announcement
//! failure is reported to the caller but the stored post stays in place.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::port_error_mapping::{
    map_announce_error, map_post_store_error, map_user_store_error,
};
use crate::domain::ports::{
    EventAnnouncer, PostCommand, PostRepository, PublishPostRequest, UserRepository,
};
use crate::domain::{Error, FeedEvent, Post, PostContent, PostId};

/// Service implementing [`PostCommand`].
#[derive(Clone)]
pub struct PostPublicationService<U, P, A> {
    users: Arc<U>,
    posts: Arc<P>,
    announcer: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<U, P, A> PostPublicationService<U, P, A> {
    /// Create the service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use chirp::domain::PostPublicationService;
    /// use chirp::domain::ports::{
    ///     FixtureEventAnnouncer, FixturePostRepository, FixtureUserRepository,
    /// };
    ///
    /// let _service = PostPublicationService::new(
    ///     Arc::new(FixtureUserRepository),
    ///     Arc::new(FixturePostRepository),
    ///     Arc::new(FixtureEventAnnouncer),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(
        users: Arc<U>,
        posts: Arc<P>,
        announcer: Arc<A>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            posts,
            announcer,
            clock,
        }
    }
}

#[async_trait]
impl<U, P, A> PostCommand for PostPublicationService<U, P, A>
where
    U: UserRepository,
    P: PostRepository,
    A: EventAnnouncer,
{
    async fn publish(&self, request: PublishPostRequest) -> Result<Post, Error> {
        let PublishPostRequest { author_id, content } = request;

        let author = self
            .users
            .find_by_id(&author_id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(|| Error::user_not_found(&author_id))?;

        let content =
            PostContent::new(content).map_err(|err| Error::invalid_content(err.to_string()))?;

        let post = Post::new(
            PostId::random(),
            author.id().clone(),
            content,
            self.clock.utc(),
        );
        self.posts.save(&post).await.map_err(map_post_store_error)?;

        let event = FeedEvent::PostCreated {
            post_id: post.id(),
            author_id: post.author_id().clone(),
        };
        self.announcer
            .publish(&event.to_bytes())
            .await
            .map_err(map_announce_error)?;

        info!(post_id = %post.id(), author_id = %post.author_id(), "post published");
        Ok(post)
    }
}

#[cfg(test)]
#[path = "post_publication_service_tests.rs"]
mod tests;
