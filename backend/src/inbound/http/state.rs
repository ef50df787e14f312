//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised without any store behind them.

use std::sync::Arc;

use crate::domain::ports::{
    FeedQuery, FixtureFeedQuery, FixtureFollowCommand, FixturePostCommand,
    FixtureUserDirectoryCommand, FollowCommand, PostCommand, UserDirectoryCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Publishes posts.
    pub posts: Arc<dyn PostCommand>,
    /// Creates follow relationships.
    pub follows: Arc<dyn FollowCommand>,
    /// Assembles feeds.
    pub feed: Arc<dyn FeedQuery>,
    /// Imports user directories.
    pub directory: Arc<dyn UserDirectoryCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    #[must_use]
    pub fn new(
        posts: Arc<dyn PostCommand>,
        follows: Arc<dyn FollowCommand>,
        feed: Arc<dyn FeedQuery>,
        directory: Arc<dyn UserDirectoryCommand>,
    ) -> Self {
        Self {
            posts,
            follows,
            feed,
            directory,
        }
    }

    /// Replace the post command.
    #[must_use]
    pub fn with_posts(mut self, posts: Arc<dyn PostCommand>) -> Self {
        self.posts = posts;
        self
    }

    /// Replace the follow command.
    #[must_use]
    pub fn with_follows(mut self, follows: Arc<dyn FollowCommand>) -> Self {
        self.follows = follows;
        self
    }

    /// Replace the feed query.
    #[must_use]
    pub fn with_feed(mut self, feed: Arc<dyn FeedQuery>) -> Self {
        self.feed = feed;
        self
    }

    /// Replace the directory command.
    #[must_use]
    pub fn with_directory(mut self, directory: Arc<dyn UserDirectoryCommand>) -> Self {
        self.directory = directory;
        self
    }
}

impl Default for HttpState {
    /// State backed entirely by fixture ports.
    fn default() -> Self {
        Self::new(
            Arc::new(FixturePostCommand),
            Arc::new(FixtureFollowCommand),
            Arc::new(FixtureFeedQuery),
            Arc::new(FixtureUserDirectoryCommand),
        )
    }
}
