//! Port for the external blob store hosting avatar images.

use async_trait::async_trait;

use crate::domain::{AvatarFolder, AvatarUpload};

use super::define_port_error;

define_port_error! {
    /// Errors raised by avatar store adapters.
    pub enum AvatarStoreError {
        /// No blob store credentials were configured.
        NotConfigured => "avatar storage is not configured",
        /// The store could not be reached or the request timed out.
        Transport { message: String } => "avatar storage transport failed: {message}",
        /// The store answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "avatar storage rejected the upload ({status}): {message}",
        /// The store's answer could not be understood.
        InvalidResponse { message: String } =>
            "avatar storage returned an invalid response: {message}",
    }
}

/// Durable location of an uploaded avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAvatar {
    pub secure_url: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Upload `upload` into `folder` and return its secure URL.
    async fn upload(
        &self,
        folder: &AvatarFolder,
        upload: &AvatarUpload,
    ) -> Result<StoredAvatar, AvatarStoreError>;
}
