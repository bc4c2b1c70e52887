//! Avatar replacement inputs.
//!
//! An update may carry a binary upload, a URL string, both, or neither.
//! [`AvatarInput::resolve`] collapses those shapes into exactly one variant
//! so the binary-beats-URL rule is decided once, at the boundary.

use bytes::Bytes;

/// Folder suffix under the blob namespace where avatars are stored.
const PROFILE_FOLDER: &str = "profile";

/// A binary avatar file received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub bytes: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl AvatarUpload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: None,
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// The single avatar action an update performs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AvatarInput {
    /// Store the bytes in the blob store and point the avatar at the result.
    Upload(AvatarUpload),
    /// Point the avatar at a caller-supplied URL, verbatim.
    Url(String),
    /// Leave the avatar as it is.
    #[default]
    Unchanged,
}

impl AvatarInput {
    /// Choose the avatar action from the raw request parts.
    ///
    /// Empty uploads and empty URLs count as absent; an upload always wins
    /// over a URL.
    ///
    /// # Examples
    /// ```
    /// use talentlayer_backend::domain::{AvatarInput, AvatarUpload};
    ///
    /// let upload = AvatarUpload::new(vec![1_u8, 2, 3]);
    /// let input = AvatarInput::resolve(Some(upload.clone()), Some("https://x/a.png".into()));
    /// assert_eq!(input, AvatarInput::Upload(upload));
    /// ```
    pub fn resolve(upload: Option<AvatarUpload>, url: Option<String>) -> Self {
        match (
            upload.filter(|file| !file.bytes.is_empty()),
            url.filter(|text| !text.is_empty()),
        ) {
            (Some(file), _) => Self::Upload(file),
            (None, Some(url)) => Self::Url(url),
            (None, None) => Self::Unchanged,
        }
    }
}

/// Logical blob-store folder receiving avatar uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFolder(String);

impl AvatarFolder {
    /// Build the `<namespace>/profile` folder.
    pub fn for_namespace(namespace: &str) -> Self {
        let namespace = namespace.trim_matches('/');
        if namespace.is_empty() {
            Self(PROFILE_FOLDER.to_owned())
        } else {
            Self(format!("{namespace}/{PROFILE_FOLDER}"))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for AvatarFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn upload() -> AvatarUpload {
        AvatarUpload::new(vec![0xff_u8, 0xd8, 0xff]).with_file_name("me.jpg")
    }

    #[rstest]
    fn upload_beats_url() {
        let input = AvatarInput::resolve(Some(upload()), Some("https://x/a.png".to_owned()));
        assert_eq!(input, AvatarInput::Upload(upload()));
    }

    #[rstest]
    fn url_applies_without_upload() {
        let input = AvatarInput::resolve(None, Some("https://x/a.png".to_owned()));
        assert_eq!(input, AvatarInput::Url("https://x/a.png".to_owned()));
    }

    #[rstest]
    #[case(None, None)]
    #[case(None, Some(String::new()))]
    #[case(Some(AvatarUpload::new(Vec::<u8>::new())), None)]
    #[case(Some(AvatarUpload::new(Vec::<u8>::new())), Some(String::new()))]
    fn empty_inputs_leave_avatar_unchanged(
        #[case] upload: Option<AvatarUpload>,
        #[case] url: Option<String>,
    ) {
        assert_eq!(AvatarInput::resolve(upload, url), AvatarInput::Unchanged);
    }

    #[rstest]
    fn empty_upload_falls_back_to_url() {
        let input = AvatarInput::resolve(
            Some(AvatarUpload::new(Vec::<u8>::new())),
            Some("https://x/a.png".to_owned()),
        );
        assert_eq!(input, AvatarInput::Url("https://x/a.png".to_owned()));
    }

    #[rstest]
    #[case("talentlayer", "talentlayer/profile")]
    #[case("/talentlayer/", "talentlayer/profile")]
    #[case("", "profile")]
    fn folder_is_namespaced(#[case] namespace: &str, #[case] expected: &str) {
        assert_eq!(AvatarFolder::for_namespace(namespace).as_str(), expected);
    }
}
