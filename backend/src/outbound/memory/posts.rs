//! In-memory post store indexed by author.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{Post, UserId};

/// [`PostRepository`] backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    by_author: RwLock<HashMap<UserId, Vec<Post>>>,
}

impl InMemoryPostRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored posts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_author
            .read()
            .map_or(0, |map| map.values().map(Vec::len).sum())
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> PostPersistenceError {
    PostPersistenceError::query("post table lock poisoned")
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save(&self, post: &Post) -> Result<(), PostPersistenceError> {
        let mut map = self.by_author.write().map_err(|_| poisoned())?;
        let posts = map.entry(post.author_id().clone()).or_default();
        if posts.iter().any(|existing| existing.id() == post.id()) {
            return Err(PostPersistenceError::query(format!(
                "post {} already exists",
                post.id()
            )));
        }
        // Keep each author's posts newest first so reads only window.
        let position = posts.partition_point(|existing| existing.created_at() >= post.created_at());
        posts.insert(position, post.clone());
        Ok(())
    }

    async fn find_by_author(
        &self,
        author_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        let map = self.by_author.read().map_err(|_| poisoned())?;
        Ok(map
            .get(author_id)
            .map(|posts| page.window(posts).to_vec())
            .unwrap_or_default())
    }
}
