//! Port for profile persistence.
//!
//! Profiles are keyed by their owner. Adapters must enforce at most one
//! profile per owner and report a second insert for the same owner as
//! [`ProfileRepositoryError::DuplicateOwner`] so the service can fall back
//! to an update.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Profile, ProfileChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// A profile already exists for the owner.
        DuplicateOwner { owner: String } =>
            "a profile already exists for user {owner}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile owned by `owner`, if one exists.
    async fn find_by_owner(&self, owner: &UserId)
    -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Insert a new profile.
    async fn create(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    /// Write the present fields of `changes` onto the owner's profile and
    /// stamp `updated_at`.
    ///
    /// Returns the stored profile after the write, or `None` when the owner
    /// has no profile.
    async fn apply_changes(
        &self,
        owner: &UserId,
        changes: &ProfileChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}
