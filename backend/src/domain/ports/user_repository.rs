//! Port abstraction for user persistence adapters and their errors.
//!
//! The store holds users keyed by id with a secondary unique lookup by
//! display name. `save` is an upsert that replaces the stored follow-set.

use async_trait::async_trait;

use crate::domain::{DisplayName, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for reading and writing users and their follow-sets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by display name.
    async fn find_by_name(
        &self,
        name: &DisplayName,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert or update a user record, replacing its follow-set.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;
}

/// Fixture repository that knows no users and discards writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_by_name(
        &self,
        _name: &DisplayName,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn save(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_repository_knows_nobody() {
        let repo = FixtureUserRepository;
        let user = User::from_strings("alice", "alice");

        repo.save(&user).await.expect("fixture save succeeds");
        let by_id = repo.find_by_id(user.id()).await.expect("lookup succeeds");
        let by_name = repo
            .find_by_name(user.display_name())
            .await
            .expect("lookup succeeds");
        assert!(by_id.is_none());
        assert!(by_name.is_none());
    }

    #[rstest]
    fn connection_error_formats_message() {
        let error = UserPersistenceError::connection("refused");
        assert_eq!(
            error.to_string(),
            "user repository connection failed: refused"
        );
    }
}
