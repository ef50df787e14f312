//! Driving port for reading a user's feed.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, Post, UserId};

/// Request for one page of a user's feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    /// User whose follow-set drives the feed.
    pub user_id: UserId,
    /// Window applied per followee and again to the merged feed.
    pub page: PageRequest,
}

/// Driving port for feed assembly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Posts from followed users, newest first.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the user does not exist.
    /// - `ServiceUnavailable` or `InternalError` when a store read fails.
    async fn assemble(&self, request: FeedRequest) -> Result<Vec<Post>, Error>;
}

/// Fixture query returning an empty feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedQuery;

#[async_trait]
impl FeedQuery for FixtureFeedQuery {
    async fn assemble(&self, _request: FeedRequest) -> Result<Vec<Post>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_returns_empty_feed() {
        let feed = FixtureFeedQuery
            .assemble(FeedRequest {
                user_id: UserId::new("alice").expect("valid id"),
                page: PageRequest::default(),
            })
            .await
            .expect("fixture succeeds");
        assert!(feed.is_empty());
    }
}
