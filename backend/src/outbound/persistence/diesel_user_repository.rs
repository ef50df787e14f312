//! PostgreSQL-backed [`UserRepository`].
//!
//! A user is one `users` row plus its ordered `user_follows` edges. Saving
//! replaces the whole follow-set inside one transaction so readers never see
//! a half-written set.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewFollowRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{user_follows, users};

/// Diesel implementation of the user store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use chirp::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/chirp")).await?;
    /// let _users = DieselUserRepository::new(pool);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow, followees: Vec<String>) -> Result<User, UserPersistenceError> {
    let id = UserId::new(&row.id)
        .map_err(|err| UserPersistenceError::query(format!("stored user id {}: {err}", row.id)))?;
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| UserPersistenceError::query(format!("stored display name: {err}")))?;
    let follows = followees
        .into_iter()
        .map(|raw| {
            UserId::new(&raw)
                .map_err(|err| UserPersistenceError::query(format!("stored followee {raw}: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(User::with_follows(id, display_name, follows))
}

fn follow_rows(user: &User) -> Result<Vec<NewFollowRow<'_>>, UserPersistenceError> {
    user.follows()
        .iter()
        .enumerate()
        .map(|(index, followee)| {
            let position = i32::try_from(index)
                .map_err(|_| UserPersistenceError::query("follow set too large"))?;
            Ok(NewFollowRow {
                follower_id: user.id().as_ref(),
                followee_id: followee.as_ref(),
                position,
            })
        })
        .collect()
}

async fn load_user(
    conn: &mut AsyncPgConnection,
    row: UserRow,
) -> Result<User, UserPersistenceError> {
    let followees = user_follows::table
        .filter(user_follows::follower_id.eq(&row.id))
        .order(user_follows::position.asc())
        .select(user_follows::followee_id)
        .load::<String>(conn)
        .await
        .map_err(diesel_error)?;
    row_to_user(row, followees)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        match row {
            Some(row) => load_user(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_name(
        &self,
        name: &DisplayName,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::display_name.eq(name.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        match row {
            Some(row) => load_user(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let user_row = NewUserRow {
            id: user.id().as_ref(),
            display_name: user.display_name().as_ref(),
        };
        let edges = follow_rows(user)?;
        let follower_id = user.id().as_ref();

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .on_conflict(users::id)
                    .do_update()
                    .set((
                        users::display_name.eq(excluded(users::display_name)),
                        users::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)
                    .await?;

                diesel::delete(user_follows::table.filter(user_follows::follower_id.eq(follower_id)))
                    .execute(conn)
                    .await?;

                if !edges.is_empty() {
                    diesel::insert_into(user_follows::table)
                        .values(&edges)
                        .execute(conn)
                        .await?;
                }

                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }
}
