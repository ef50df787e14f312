//! Feed assembly workflow.
//!
//! Implements [`FeedQuery`]:
//!
//! 1. resolve the requesting user;
//! 2. resolve each followee and fetch their posts with the caller's own
//!    `limit`/`offset`, at most `fanout_limit` followees at a time;
//! 3. merge, sort newest first and cut the caller's window from the merged
//!    sequence.
//!
//! Because every followee is windowed before the merge, a page can come back
//! shorter than `limit` even when older posts exist further down the merged
//! timeline. Followees that no longer exist are skipped; any store error
//! aborts the whole request and drops the fetches still in flight.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt, stream};
use pagination::PageRequest;
use tracing::{debug, warn};

use crate::domain::port_error_mapping::{map_post_store_error, map_user_store_error};
use crate::domain::ports::{FeedQuery, FeedRequest, PostRepository, UserRepository};
use crate::domain::{Error, Post, UserId};

/// Number of followees fetched concurrently unless configured otherwise.
pub const DEFAULT_FANOUT_LIMIT: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

enum FolloweeFetch {
    Posts(Vec<Post>),
    Dangling(UserId),
}

/// Service implementing [`FeedQuery`].
#[derive(Clone)]
pub struct FeedAssemblyService<U, P> {
    users: Arc<U>,
    posts: Arc<P>,
    fanout_limit: NonZeroUsize,
}

impl<U, P> FeedAssemblyService<U, P> {
    /// Create the service with [`DEFAULT_FANOUT_LIMIT`].
    pub const fn new(users: Arc<U>, posts: Arc<P>) -> Self {
        Self {
            users,
            posts,
            fanout_limit: DEFAULT_FANOUT_LIMIT,
        }
    }

    /// Bound the number of followees fetched at the same time.
    #[must_use]
    pub const fn with_fanout_limit(mut self, fanout_limit: NonZeroUsize) -> Self {
        self.fanout_limit = fanout_limit;
        self
    }

    /// Configured fan-out bound.
    #[must_use]
    pub const fn fanout_limit(&self) -> NonZeroUsize {
        self.fanout_limit
    }
}

impl<U, P> FeedAssemblyService<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn fetch_followee(
        &self,
        followee_id: UserId,
        page: PageRequest,
    ) -> Result<FolloweeFetch, Error> {
        let Some(followee) = self
            .users
            .find_by_id(&followee_id)
            .await
            .map_err(map_user_store_error)?
        else {
            return Ok(FolloweeFetch::Dangling(followee_id));
        };

        self.posts
            .find_by_author(followee.id(), page)
            .await
            .map(FolloweeFetch::Posts)
            .map_err(map_post_store_error)
    }
}

/// Order posts newest first. Equal timestamps keep no particular order.
fn merge_newest_first(batches: Vec<Vec<Post>>) -> Vec<Post> {
    let mut merged: Vec<Post> = batches.into_iter().flatten().collect();
    merged.sort_unstable_by(|a, b| b.created_at().cmp(&a.created_at()));
    merged
}

#[async_trait]
impl<U, P> FeedQuery for FeedAssemblyService<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn assemble(&self, request: FeedRequest) -> Result<Vec<Post>, Error> {
        let FeedRequest { user_id, page } = request;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(|| Error::user_not_found(&user_id))?;

        let followees: Vec<UserId> = user.follows().iter().cloned().collect();
        let followee_count = followees.len();

        let fetched: Vec<FolloweeFetch> = stream::iter(followees)
            .map(|followee_id| self.fetch_followee(followee_id, page))
            .buffer_unordered(self.fanout_limit.get())
            .try_collect()
            .await?;

        let mut batches = Vec::with_capacity(fetched.len());
        let mut dangling = 0_usize;
        for outcome in fetched {
            match outcome {
                FolloweeFetch::Posts(posts) => batches.push(posts),
                FolloweeFetch::Dangling(followee_id) => {
                    warn!(%user_id, %followee_id, "skipping followee that no longer exists");
                    dangling += 1;
                }
            }
        }

        let merged = merge_newest_first(batches);
        let merged_len = merged.len();
        let feed = page.into_window(merged);

        debug!(
            %user_id,
            followees = followee_count,
            dangling,
            merged = merged_len,
            returned = feed.len(),
            limit = page.limit(),
            offset = page.offset(),
            "feed assembled"
        );
        Ok(feed)
    }
}

#[cfg(test)]
#[path = "feed_assembly_service_tests.rs"]
mod tests;
