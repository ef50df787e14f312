//! Port abstraction for post persistence adapters and their errors.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Post, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Port for storing posts and reading them back per author.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post.
    async fn save(&self, post: &Post) -> Result<(), PostPersistenceError>;

    /// Posts written by `author_id`, newest first, windowed by `page`.
    async fn find_by_author(
        &self,
        author_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostPersistenceError>;
}

/// Fixture repository holding no posts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostRepository;

#[async_trait]
impl PostRepository for FixturePostRepository {
    async fn save(&self, _post: &Post) -> Result<(), PostPersistenceError> {
        Ok(())
    }

    async fn find_by_author(
        &self,
        _author_id: &UserId,
        _page: PageRequest,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        Ok(Vec::new())
    }
}
