//! Driving port for profile reads.
//!
//! The three lookups deliberately differ when no profile is stored:
//! by username fails, by owner id renders a placeholder, and "mine" yields
//! `None`.

use async_trait::async_trait;

use crate::domain::{Error, ProfileView, ProfileWithOwner, RequestContext, UserId};

/// Domain use-case port for reading profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Public lookup by username; `NotFound` for unknown users and for users
    /// without a profile.
    async fn by_username(&self, username: &str) -> Result<ProfileWithOwner, Error>;

    /// Lookup by owner id; `NotFound` only when the user is unknown.
    async fn by_owner_id(&self, owner: &UserId) -> Result<ProfileView, Error>;

    /// The caller's own profile, or `None` if they have not created one yet.
    async fn mine(&self, context: &RequestContext) -> Result<Option<ProfileWithOwner>, Error>;
}
