//! Driving port for profile updates.

use async_trait::async_trait;

use crate::domain::{AvatarInput, Error, ProfilePatch, ProfileWithOwner, RequestContext};

/// A single "update my profile" call as received from the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    pub patch: ProfilePatch,
    pub avatar: AvatarInput,
}

/// Domain use-case port for creating or partially updating the caller's
/// profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Resolve the avatar, then create or merge the caller's profile.
    ///
    /// Fails with `UploadFailed` before touching the profile when a binary
    /// avatar cannot be stored.
    async fn update_mine(
        &self,
        context: &RequestContext,
        request: UpdateProfileRequest,
    ) -> Result<ProfileWithOwner, Error>;
}
