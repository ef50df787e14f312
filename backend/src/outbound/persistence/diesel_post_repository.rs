//! PostgreSQL-backed [`PostRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{Post, PostContent, PostId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPostRow, PostRow};
use super::pool::DbPool;
use super::schema::posts;

/// Diesel implementation of the post store.
///
/// Reads order by `created_at` then `id`, both descending, so windows are
/// stable when two posts share a timestamp.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a repository over `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> PostPersistenceError {
    map_diesel_error(
        error,
        PostPersistenceError::query,
        PostPersistenceError::connection,
    )
}

fn row_to_post(row: PostRow) -> Result<Post, PostPersistenceError> {
    let author_id = UserId::new(&row.author_id)
        .map_err(|err| PostPersistenceError::query(format!("stored author id: {err}")))?;
    let content = PostContent::new(row.content)
        .map_err(|err| PostPersistenceError::query(format!("stored post {}: {err}", row.id)))?;
    Ok(Post::new(
        PostId::from_uuid(row.id),
        author_id,
        content,
        row.created_at,
    ))
}

fn sql_bound(value: usize) -> Result<i64, PostPersistenceError> {
    i64::try_from(value).map_err(|_| PostPersistenceError::query("page bound out of range"))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn save(&self, post: &Post) -> Result<(), PostPersistenceError> {
        let row = NewPostRow {
            id: *post.id().as_uuid(),
            author_id: post.author_id().as_ref(),
            content: post.content().as_ref(),
            created_at: post.created_at(),
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PostPersistenceError::connection))?;

        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_author(
        &self,
        author_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        let limit = sql_bound(page.limit())?;
        let offset = sql_bound(page.offset())?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PostPersistenceError::connection))?;

        let rows = posts::table
            .filter(posts::author_id.eq(author_id.as_ref()))
            .order((posts::created_at.desc(), posts::id.desc()))
            .limit(limit)
            .offset(offset)
            .select(PostRow::as_select())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_post).collect()
    }
}
