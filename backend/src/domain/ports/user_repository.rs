//! Port abstraction for account lookups and avatar writes.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{User, UserId};

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

/// Read access to accounts plus the single write the profile domain owns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by their unique username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;

    /// Replace the avatar URL, stamping the account with `updated_at`.
    /// Returns the updated user or `None` when no such user exists.
    async fn update_avatar(
        &self,
        id: &UserId,
        avatar: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, UserPersistenceError>;
}
