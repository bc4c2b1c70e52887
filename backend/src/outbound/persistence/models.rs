//! Diesel row types for the `users` and `profiles` tables.
//!
//! These are persistence details; repositories convert them to domain types
//! before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{profiles, users};

/// Public user columns read by the profile domain.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
    pub avatar: Option<String>,
}

/// Full profile row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub title: Option<String>,
    pub locations: Option<String>,
    pub resume: Option<String>,
    pub social_links: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable profile for first writes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<&'a str>,
    pub title: Option<&'a str>,
    pub locations: Option<&'a str>,
    pub resume: Option<&'a str>,
    pub social_links: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; `None` columns are left out of the `SET` list.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileChangeset<'a> {
    pub bio: Option<&'a str>,
    pub title: Option<&'a str>,
    pub locations: Option<&'a str>,
    pub resume: Option<&'a str>,
    pub social_links: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}
