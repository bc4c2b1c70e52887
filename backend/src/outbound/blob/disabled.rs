//! Avatar store used when no blob credentials are configured.

use async_trait::async_trait;

use crate::domain::ports::{AvatarStore, AvatarStoreError, StoredAvatar};
use crate::domain::{AvatarFolder, AvatarUpload};

/// Rejects every upload with [`AvatarStoreError::NotConfigured`]. URL-only
/// avatar updates never reach the store and keep working.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAvatarStore;

#[async_trait]
impl AvatarStore for DisabledAvatarStore {
    async fn upload(
        &self,
        _folder: &AvatarFolder,
        _upload: &AvatarUpload,
    ) -> Result<StoredAvatar, AvatarStoreError> {
        Err(AvatarStoreError::not_configured())
    }
}
