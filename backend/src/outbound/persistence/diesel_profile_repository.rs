//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.
//!
//! The unique index on `profiles.user_id` enforces one profile per owner; a
//! violation on insert is reported as `DuplicateOwner` so the service can
//! retry as a merge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileChanges, ProfileId, SocialLink, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewProfileRow, ProfileChangeset, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, owner: &UserId) -> ProfileRepositoryError {
    if is_unique_violation(&error) {
        ProfileRepositoryError::duplicate_owner(owner.as_ref())
    } else {
        map_diesel_error(error)
    }
}

fn encode_social_links(links: &[SocialLink]) -> Result<serde_json::Value, ProfileRepositoryError> {
    serde_json::to_value(links)
        .map_err(|err| ProfileRepositoryError::query(format!("encode social links: {err}")))
}

/// Decode the stored JSON array. Rows written by other tools may hold
/// anything; those decode as an empty list rather than failing the read.
fn decode_social_links(value: serde_json::Value, profile_id: uuid::Uuid) -> Vec<SocialLink> {
    serde_json::from_value(value).unwrap_or_else(|error| {
        warn!(%profile_id, %error, "stored social_links is not a link array");
        Vec::new()
    })
}

fn row_to_profile(row: ProfileRow) -> Profile {
    Profile {
        id: ProfileId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        bio: row.bio,
        title: row.title,
        locations: row.locations,
        resume: row.resume,
        social_links: decode_social_links(row.social_links, row.id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn changeset(
    changes: &ProfileChanges,
    updated_at: DateTime<Utc>,
) -> Result<ProfileChangeset<'_>, ProfileRepositoryError> {
    let social_links = changes
        .social_links
        .as_deref()
        .map(encode_social_links)
        .transpose()?;

    Ok(ProfileChangeset {
        bio: changes.bio.as_deref(),
        title: changes.title.as_deref(),
        locations: changes.locations.as_deref(),
        resume: changes.resume.as_deref(),
        social_links,
        updated_at,
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = profiles::table
            .filter(profiles::user_id.eq(*owner.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_profile))
    }

    async fn create(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewProfileRow {
            id: *profile.id.as_uuid(),
            user_id: *profile.owner.as_uuid(),
            bio: profile.bio.as_deref(),
            title: profile.title.as_deref(),
            locations: profile.locations.as_deref(),
            resume: profile.resume.as_deref(),
            social_links: encode_social_links(&profile.social_links)?,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        };

        diesel::insert_into(profiles::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &profile.owner))?;

        Ok(())
    }

    async fn apply_changes(
        &self,
        owner: &UserId,
        changes: &ProfileChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = changeset(changes, updated_at)?;

        let row = diesel::update(profiles::table.filter(profiles::user_id.eq(*owner.as_uuid())))
            .set(&update)
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_profile))
    }
}

#[cfg(test)]
mod tests {
    //! Conversion and error mapping coverage. Query paths need a live
    //! database and are exercised in deployment smoke tests.
    use super::*;
    use chrono::TimeZone;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::{fixture, rstest};
    use serde_json::json;
    use uuid::Uuid;

    #[fixture]
    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26)
            .single()
            .expect("valid timestamp")
    }

    fn row(social_links: serde_json::Value, at: DateTime<Utc>) -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            bio: Some("Builds compilers".to_owned()),
            title: None,
            locations: Some("Lisbon".to_owned()),
            resume: None,
            social_links,
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn row_to_profile_decodes_links_in_order(timestamp: DateTime<Utc>) {
        let stored = row(
            json!([
                {"platform": "github", "url": "https://github.com/ada"},
                {"platform": "github", "url": "https://github.com/ada"}
            ]),
            timestamp,
        );
        let owner = stored.user_id;

        let profile = row_to_profile(stored);

        assert_eq!(profile.owner.as_uuid(), &owner);
        assert_eq!(profile.bio.as_deref(), Some("Builds compilers"));
        assert_eq!(profile.title, None);
        assert_eq!(profile.social_links.len(), 2);
        assert_eq!(
            profile.social_links[0],
            SocialLink::new("github", "https://github.com/ada")
        );
    }

    #[rstest]
    fn unreadable_link_json_decodes_as_empty(timestamp: DateTime<Utc>) {
        let profile = row_to_profile(row(json!({"not": "an array"}), timestamp));
        assert!(profile.social_links.is_empty());
    }

    #[rstest]
    fn changeset_only_carries_present_fields(timestamp: DateTime<Utc>) {
        let changes = ProfileChanges {
            title: Some("Staff Engineer".to_owned()),
            social_links: Some(vec![SocialLink::new("x", "https://x.com/ada")]),
            ..ProfileChanges::default()
        };

        let update = changeset(&changes, timestamp).expect("changeset");

        assert_eq!(update.title, Some("Staff Engineer"));
        assert_eq!(update.bio, None);
        assert_eq!(update.resume, None);
        assert_eq!(
            update.social_links,
            Some(json!([{"platform": "x", "url": "https://x.com/ada"}]))
        );
        assert_eq!(update.updated_at, timestamp);
    }

    #[rstest]
    fn unique_violation_on_insert_is_duplicate_owner() {
        let owner = UserId::random();
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        let mapped = map_insert_error(error, &owner);

        assert_eq!(
            mapped,
            ProfileRepositoryError::duplicate_owner(owner.as_ref())
        );
    }

    #[rstest]
    fn other_insert_failures_are_query_errors() {
        let owner = UserId::random();
        let mapped = map_insert_error(DieselError::NotFound, &owner);
        assert!(matches!(mapped, ProfileRepositoryError::Query { .. }));
    }
}
