//! In-memory `ProfileRepository` keyed by owner.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileChanges, UserId};

#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl InMemoryProfileRepository {
    fn state(&self) -> Result<MutexGuard<'_, HashMap<UserId, Profile>>, ProfileRepositoryError> {
        self.profiles
            .lock()
            .map_err(|_| ProfileRepositoryError::connection("profile store lock poisoned"))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.state()?.get(owner).cloned())
    }

    async fn create(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        match self.state()?.entry(profile.owner.clone()) {
            Entry::Occupied(_) => Err(ProfileRepositoryError::duplicate_owner(
                profile.owner.as_ref(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(())
            }
        }
    }

    async fn apply_changes(
        &self,
        owner: &UserId,
        changes: &ProfileChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut profiles = self.state()?;
        Ok(profiles.get_mut(owner).map(|profile| {
            changes.apply_to(profile, updated_at);
            profile.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProfileId, SocialLink};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn profile_for(owner: &UserId, at: DateTime<Utc>) -> Profile {
        let changes = ProfileChanges {
            title: Some("Engineer".to_owned()),
            ..ProfileChanges::default()
        };
        Profile::create(ProfileId::random(), owner.clone(), &changes, at)
    }

    #[rstest]
    #[tokio::test]
    async fn second_create_for_owner_is_rejected(now: DateTime<Utc>) {
        let repo = InMemoryProfileRepository::default();
        let owner = UserId::random();

        repo.create(&profile_for(&owner, now)).await.expect("first insert");
        let error = repo
            .create(&profile_for(&owner, now))
            .await
            .expect_err("duplicate insert");

        assert_eq!(
            error,
            ProfileRepositoryError::duplicate_owner(owner.as_ref())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn apply_changes_merges_present_fields(now: DateTime<Utc>) {
        let repo = InMemoryProfileRepository::default();
        let owner = UserId::random();
        repo.create(&profile_for(&owner, now)).await.expect("insert");
        let later = now + chrono::Duration::minutes(5);

        let changes = ProfileChanges {
            bio: Some("Likes graphs".to_owned()),
            social_links: Some(vec![SocialLink::new("github", "https://github.com/ada")]),
            ..ProfileChanges::default()
        };
        let updated = repo
            .apply_changes(&owner, &changes, later)
            .await
            .expect("update")
            .expect("profile exists");

        assert_eq!(updated.title.as_deref(), Some("Engineer"));
        assert_eq!(updated.bio.as_deref(), Some("Likes graphs"));
        assert_eq!(updated.social_links.len(), 1);
        assert_eq!(updated.created_at, now);
        assert_eq!(updated.updated_at, later);
    }

    #[rstest]
    #[tokio::test]
    async fn apply_changes_without_profile_is_none(now: DateTime<Utc>) {
        let repo = InMemoryProfileRepository::default();
        let result = repo
            .apply_changes(&UserId::random(), &ProfileChanges::default(), now)
            .await
            .expect("update");
        assert!(result.is_none());
    }
}
