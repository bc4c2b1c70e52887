//! Professional profile aggregate and its partial-update semantics.
//!
//! A profile belongs to exactly one user and is created lazily on the first
//! update. Updates are presence-based: only fields supplied with a non-empty
//! value overwrite stored state, and nothing can be cleared by omission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::{User, UserId};

/// Stable profile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(Uuid);

impl ProfileId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A link to one of the owner's external profiles.
///
/// Entries are stored as supplied: empty platforms or URLs are accepted and
/// duplicates are kept in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
        }
    }
}

/// Stored profile record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub owner: UserId,
    pub bio: Option<String>,
    pub title: Option<String>,
    pub locations: Option<String>,
    pub resume: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build the initial document for `owner` from the supplied changes.
    pub fn create(
        id: ProfileId,
        owner: UserId,
        changes: &ProfileChanges,
        now: DateTime<Utc>,
    ) -> Self {
        let mut profile = Self {
            id,
            owner,
            bio: None,
            title: None,
            locations: None,
            resume: None,
            social_links: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        changes.apply_to(&mut profile, now);
        profile
    }
}

/// A profile joined with the public projection of its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWithOwner {
    pub profile: Profile,
    pub owner: User,
}

/// What a lookup by owner id renders.
///
/// Known users without a stored profile still render a placeholder so
/// clients can always show something for a valid id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    Stored(ProfileWithOwner),
    Placeholder(User),
}

/// Social links as delivered by the transport.
///
/// JSON bodies carry a structured array; multipart forms carry the array
/// serialised as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialLinksInput {
    Links(Vec<SocialLink>),
    Encoded(String),
}

/// Raw update fields exactly as the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub bio: Option<String>,
    pub title: Option<String>,
    pub resume: Option<String>,
    pub locations: Option<String>,
    pub social_links: Option<SocialLinksInput>,
}

impl ProfilePatch {
    /// Reduce the patch to the fields that will actually be written.
    ///
    /// Empty strings count as absent. Encoded social links that fail to
    /// parse are dropped with a warning; the remaining fields still apply.
    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            bio: present(self.bio),
            title: present(self.title),
            resume: present(self.resume),
            locations: present(self.locations),
            social_links: self.social_links.and_then(decode_social_links),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn decode_social_links(input: SocialLinksInput) -> Option<Vec<SocialLink>> {
    match input {
        SocialLinksInput::Links(links) => Some(links),
        SocialLinksInput::Encoded(text) if text.is_empty() => None,
        SocialLinksInput::Encoded(text) => match serde_json::from_str(&text) {
            Ok(links) => Some(links),
            Err(error) => {
                warn!(%error, "ignoring malformed socialLinks payload");
                None
            }
        },
    }
}

/// Normalised changes; every `Some` field overwrites the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub bio: Option<String>,
    pub title: Option<String>,
    pub resume: Option<String>,
    pub locations: Option<String>,
    pub social_links: Option<Vec<SocialLink>>,
}

impl ProfileChanges {
    /// Merge the changes into `profile`, stamping `updated_at`.
    pub fn apply_to(&self, profile: &mut Profile, updated_at: DateTime<Utc>) {
        if let Some(bio) = &self.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(title) = &self.title {
            profile.title = Some(title.clone());
        }
        if let Some(resume) = &self.resume {
            profile.resume = Some(resume.clone());
        }
        if let Some(locations) = &self.locations {
            profile.locations = Some(locations.clone());
        }
        if let Some(links) = &self.social_links {
            profile.social_links = links.clone();
        }
        profile.updated_at = updated_at;
    }
}
