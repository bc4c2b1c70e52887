//! Profile domain service.
//!
//! Implements both driving ports over the user, profile, and avatar ports.
//! An update resolves the avatar first and only then merges profile fields,
//! so a failed upload leaves the profile untouched.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{
    AvatarStore, AvatarStoreError, ProfileCommand, ProfileQuery, ProfileRepository,
    ProfileRepositoryError, UpdateProfileRequest, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AvatarFolder, AvatarInput, Error, Profile, ProfileChanges, ProfileId, ProfileView,
    ProfileWithOwner, RequestContext, User, UserId,
};

const USER_NOT_FOUND: &str = "User not found";
const PROFILE_NOT_FOUND: &str = "Profile not found";
const STORAGE_UNAVAILABLE: &str = "Service temporarily unavailable";

/// Profile service implementing [`ProfileQuery`] and [`ProfileCommand`].
pub struct ProfileService<U: ?Sized, P: ?Sized, A: ?Sized> {
    users: Arc<U>,
    profiles: Arc<P>,
    avatars: Arc<A>,
    avatar_folder: AvatarFolder,
    clock: Arc<dyn Clock>,
}

impl<U: ?Sized, P: ?Sized, A: ?Sized> ProfileService<U, P, A> {
    /// Create a new service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use talentlayer_backend::domain::{AvatarFolder, ProfileService};
    /// use talentlayer_backend::outbound::blob::DisabledAvatarStore;
    /// use talentlayer_backend::outbound::memory::{InMemoryProfileRepository, InMemoryUserRepository};
    ///
    /// let service = ProfileService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(InMemoryProfileRepository::default()),
    ///     Arc::new(DisabledAvatarStore),
    ///     AvatarFolder::for_namespace("talentlayer"),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(
        users: Arc<U>,
        profiles: Arc<P>,
        avatars: Arc<A>,
        avatar_folder: AvatarFolder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            profiles,
            avatars,
            avatar_folder,
            clock,
        }
    }
}

impl<U, P, A> ProfileService<U, P, A>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
    A: AvatarStore + ?Sized,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                error!(%message, "user repository unavailable");
                Error::service_unavailable(STORAGE_UNAVAILABLE)
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_profile_error(error: ProfileRepositoryError) -> Error {
        match error {
            ProfileRepositoryError::Connection { message } => {
                error!(%message, "profile repository unavailable");
                Error::service_unavailable(STORAGE_UNAVAILABLE)
            }
            ProfileRepositoryError::Query { message } => {
                Error::internal(format!("profile repository error: {message}"))
            }
            ProfileRepositoryError::DuplicateOwner { owner } => {
                Error::internal(format!("unexpected duplicate profile for user {owner}"))
            }
        }
    }

    fn map_avatar_error(error: AvatarStoreError) -> Error {
        error!(%error, "avatar upload failed");
        Error::upload_failed("Avatar upload failed")
    }

    async fn load_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn find_profile(&self, owner: &UserId) -> Result<Option<Profile>, Error> {
        self.profiles
            .find_by_owner(owner)
            .await
            .map_err(Self::map_profile_error)
    }

    async fn write_avatar(&self, owner: &UserId, avatar: &str) -> Result<User, Error> {
        self.users
            .update_avatar(owner, avatar, self.clock.utc())
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    /// Apply the avatar action and return the owner as stored afterwards.
    async fn resolve_avatar(&self, owner: User, input: AvatarInput) -> Result<User, Error> {
        match input {
            AvatarInput::Upload(upload) => {
                let stored = self
                    .avatars
                    .upload(&self.avatar_folder, &upload)
                    .await
                    .map_err(Self::map_avatar_error)?;
                self.write_avatar(owner.id(), &stored.secure_url).await
            }
            AvatarInput::Url(url) => self.write_avatar(owner.id(), &url).await,
            AvatarInput::Unchanged => Ok(owner),
        }
    }

    async fn merge_existing(
        &self,
        owner: &UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<Profile>, Error> {
        self.profiles
            .apply_changes(owner, changes, self.clock.utc())
            .await
            .map_err(Self::map_profile_error)
    }

    async fn upsert(&self, owner: &UserId, changes: &ProfileChanges) -> Result<Profile, Error> {
        if self.find_profile(owner).await?.is_some() {
            if let Some(profile) = self.merge_existing(owner, changes).await? {
                return Ok(profile);
            }
        }

        let profile = Profile::create(
            ProfileId::random(),
            owner.clone(),
            changes,
            self.clock.utc(),
        );
        match self.profiles.create(&profile).await {
            Ok(()) => Ok(profile),
            Err(ProfileRepositoryError::DuplicateOwner { .. }) => {
                // A concurrent first write won; merge into its document.
                debug!(owner = %owner, "profile created concurrently; merging instead");
                self.merge_existing(owner, changes)
                    .await?
                    .ok_or_else(|| Error::internal("profile missing after duplicate insert"))
            }
            Err(err) => Err(Self::map_profile_error(err)),
        }
    }
}

#[async_trait]
impl<U, P, A> ProfileQuery for ProfileService<U, P, A>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
    A: AvatarStore + ?Sized,
{
    async fn by_username(&self, username: &str) -> Result<ProfileWithOwner, Error> {
        let owner = self
            .users
            .find_by_username(username)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        let profile = self
            .find_profile(owner.id())
            .await?
            .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND))?;
        Ok(ProfileWithOwner { profile, owner })
    }

    async fn by_owner_id(&self, owner: &UserId) -> Result<ProfileView, Error> {
        let user = self.load_user(owner).await?;
        Ok(match self.find_profile(owner).await? {
            Some(profile) => ProfileView::Stored(ProfileWithOwner {
                profile,
                owner: user,
            }),
            None => ProfileView::Placeholder(user),
        })
    }

    async fn mine(&self, context: &RequestContext) -> Result<Option<ProfileWithOwner>, Error> {
        let Some(profile) = self.find_profile(context.caller()).await? else {
            return Ok(None);
        };
        let owner = self.load_user(context.caller()).await?;
        Ok(Some(ProfileWithOwner { profile, owner }))
    }
}

#[async_trait]
impl<U, P, A> ProfileCommand for ProfileService<U, P, A>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
    A: AvatarStore + ?Sized,
{
    async fn update_mine(
        &self,
        context: &RequestContext,
        request: UpdateProfileRequest,
    ) -> Result<ProfileWithOwner, Error> {
        let UpdateProfileRequest { patch, avatar } = request;
        let owner = self.load_user(context.caller()).await?;
        let owner = self.resolve_avatar(owner, avatar).await?;
        let changes = patch.into_changes();
        let profile = self.upsert(owner.id(), &changes).await?;
        Ok(ProfileWithOwner { profile, owner })
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
