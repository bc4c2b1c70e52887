//! Diesel table definitions mirroring the embedded migrations.
//!
//! Keep in sync with `backend/migrations/`.

diesel::table! {
    /// Accounts owned by the registration collaborator. The profile domain
    /// reads the public columns and writes `avatar`.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Unique.
        email -> Varchar,
        /// Unique; used by the public profile route.
        username -> Varchar,
        /// Avatar URL, either uploaded or caller-supplied.
        avatar -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Professional profiles, at most one per user.
    profiles (id) {
        id -> Uuid,
        /// Owning user; unique and never updated.
        user_id -> Uuid,
        bio -> Nullable<Text>,
        title -> Nullable<Text>,
        locations -> Nullable<Text>,
        resume -> Nullable<Text>,
        /// JSON array of `{platform, url}` objects in insertion order.
        social_links -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(profiles, users);
