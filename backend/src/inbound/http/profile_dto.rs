//! Wire types for the profile endpoints.
//!
//! Responses use the `{status: "success", data: {profile}}` envelope; the
//! profile itself embeds the owner's public projection under `user`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{
    AvatarInput, Profile, ProfilePatch, ProfileView, ProfileWithOwner, SocialLink,
    SocialLinksInput, User,
};
use crate::domain::ports::UpdateProfileRequest;

/// Success marker carried by every 2xx envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
}

/// `{status: "success", data: {profile}}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileEnvelope {
    pub status: EnvelopeStatus,
    pub data: ProfileData,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileData {
    /// `null` only for `GET /me` when the caller has no profile yet.
    #[schema(nullable)]
    pub profile: Option<ProfileResponse>,
}

impl ProfileEnvelope {
    pub fn with_profile(profile: impl Into<ProfileResponse>) -> Self {
        Self::wrap(Some(profile.into()))
    }

    pub fn empty() -> Self {
        Self::wrap(None)
    }

    fn wrap(profile: Option<ProfileResponse>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: ProfileData { profile },
        }
    }
}

/// Public projection of the profile owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(nullable, example = "https://res.cloudinary.com/demo/image/upload/ada.png")]
    pub avatar: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            username: user.username().to_owned(),
            avatar: user.avatar().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SocialLinkDto {
    #[serde(default)]
    #[schema(example = "github")]
    pub platform: String,
    #[serde(default)]
    #[schema(example = "https://github.com/ada")]
    pub url: String,
}

impl From<SocialLink> for SocialLinkDto {
    fn from(link: SocialLink) -> Self {
        Self {
            platform: link.platform,
            url: link.url,
        }
    }
}

impl From<SocialLinkDto> for SocialLink {
    fn from(dto: SocialLinkDto) -> Self {
        SocialLink::new(dto.platform, dto.url)
    }
}

/// Profile as returned to clients.
///
/// Placeholder profiles omit `id`, `createdAt` and `updatedAt` and carry
/// empty strings for the text fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user: UserResponse,
    #[schema(nullable)]
    pub bio: Option<String>,
    #[schema(nullable)]
    pub title: Option<String>,
    #[schema(nullable)]
    pub locations: Option<String>,
    #[schema(nullable)]
    pub resume: Option<String>,
    pub social_links: Vec<SocialLinkDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileResponse {
    fn stored(profile: Profile, owner: &User) -> Self {
        Self {
            id: Some(profile.id.to_string()),
            user: UserResponse::from(owner),
            bio: profile.bio,
            title: profile.title,
            locations: profile.locations,
            resume: profile.resume,
            social_links: profile
                .social_links
                .into_iter()
                .map(SocialLinkDto::from)
                .collect(),
            created_at: Some(profile.created_at),
            updated_at: Some(profile.updated_at),
        }
    }

    fn placeholder(owner: &User) -> Self {
        Self {
            id: None,
            user: UserResponse::from(owner),
            bio: Some(String::new()),
            title: Some(String::new()),
            locations: Some(String::new()),
            resume: Some(String::new()),
            social_links: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<ProfileWithOwner> for ProfileResponse {
    fn from(value: ProfileWithOwner) -> Self {
        Self::stored(value.profile, &value.owner)
    }
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        match view {
            ProfileView::Stored(stored) => stored.into(),
            ProfileView::Placeholder(owner) => Self::placeholder(&owner),
        }
    }
}

/// `socialLinks` in a JSON body: a structured array, or the array
/// serialised as text. Any other value is accepted and then dropped so the
/// remaining fields still apply.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SocialLinksField {
    Links(Vec<SocialLinkDto>),
    Encoded(String),
    Other(serde_json::Value),
}

impl SocialLinksField {
    fn into_input(self) -> Option<SocialLinksInput> {
        match self {
            Self::Links(links) => Some(SocialLinksInput::Links(
                links.into_iter().map(SocialLink::from).collect(),
            )),
            Self::Encoded(text) => Some(SocialLinksInput::Encoded(text)),
            Self::Other(value) => {
                warn!(%value, "ignoring malformed socialLinks payload");
                None
            }
        }
    }
}

/// JSON body for `PATCH /api/v1/profile/me`.
///
/// Every field is optional; absent, `null` and empty values leave the
/// stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    #[schema(example = "Compiler engineer and occasional poet.")]
    pub bio: Option<String>,
    #[schema(example = "Staff Engineer")]
    pub title: Option<String>,
    #[schema(example = "https://example.com/ada.pdf")]
    pub resume: Option<String>,
    #[schema(example = "London, Remote")]
    pub locations: Option<String>,
    pub social_links: Option<SocialLinksField>,
    /// Avatar URL stored verbatim.
    #[schema(example = "https://example.com/ada.png")]
    pub avatar: Option<String>,
}

impl From<UpdateProfileBody> for UpdateProfileRequest {
    fn from(body: UpdateProfileBody) -> Self {
        Self {
            patch: ProfilePatch {
                bio: body.bio,
                title: body.title,
                resume: body.resume,
                locations: body.locations,
                social_links: body.social_links.and_then(SocialLinksField::into_input),
            },
            avatar: AvatarInput::resolve(None, body.avatar),
        }
    }
}

/// Multipart form for `PATCH /api/v1/profile/me`, documented only.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UpdateProfileForm {
    bio: Option<String>,
    title: Option<String>,
    resume: Option<String>,
    locations: Option<String>,
    /// JSON-encoded array of `{platform, url}` objects.
    #[schema(example = r#"[{"platform":"github","url":"https://github.com/ada"}]"#)]
    social_links: Option<String>,
    /// Avatar image; takes precedence over an `avatar` text part.
    #[schema(value_type = Option<String>, format = Binary)]
    avatar: Option<Vec<u8>>,
}
