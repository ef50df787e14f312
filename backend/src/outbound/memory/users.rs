//! In-memory user store with a unique display-name index.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, User, UserId};

#[derive(Debug, Default)]
struct UserTable {
    by_id: HashMap<UserId, User>,
    by_name: HashMap<DisplayName, UserId>,
}

impl UserTable {
    /// Insert or replace `user`, dropping the index entry for a previous name.
    fn put(&mut self, user: User) {
        if let Some(previous) = self.by_id.get(user.id()) {
            self.by_name.remove(previous.display_name());
        }
        self.by_name
            .insert(user.display_name().clone(), user.id().clone());
        self.by_id.insert(user.id().clone(), user);
    }
}

/// [`UserRepository`] backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `users`; later duplicates win.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut table = UserTable::default();
        for user in users {
            table.put(user);
        }
        Self {
            table: RwLock::new(table),
        }
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().map_or(0, |table| table.by_id.len())
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::query("user table lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.by_id.get(id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &DisplayName,
    ) -> Result<Option<User>, UserPersistenceError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .by_name
            .get(name)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        if let Some(owner) = table.by_name.get(user.display_name())
            && owner != user.id()
        {
            return Err(UserPersistenceError::query(format!(
                "display name {} already belongs to {owner}",
                user.display_name()
            )));
        }
        table.put(user.clone());
        Ok(())
    }
}
