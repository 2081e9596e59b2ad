//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `id` is the short generated identifier.
    users (id) {
        id -> Varchar,
        username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Exercise log entries. `id` orders a user's log by insertion.
    exercises (id) {
        id -> Int8,
        user_id -> Varchar,
        description -> Text,
        duration_minutes -> Int8,
        performed_on -> Date,
    }
}

diesel::joinable!(exercises -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(exercises, users);
