//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

/// Users keyed by id. Seed with [`InMemoryUserRepository::with_users`] or
/// [`InMemoryUserRepository::insert`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::default();
        for user in users {
            repo.insert(user);
        }
        repo
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: User) {
        if let Ok(mut users) = self.users.lock() {
            users.insert(user.id().clone(), user);
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, HashMap<UserId, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.state()?.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .state()?
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn update_avatar(
        &self,
        id: &UserId,
        avatar: &str,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self.state()?;
        Ok(users.get_mut(id).map(|user| {
            *user = user.clone().with_avatar(avatar);
            user.clone()
        }))
    }
}
