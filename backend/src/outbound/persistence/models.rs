//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{exercises, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
    #[expect(dead_code, reason = "ordering column, not part of the domain model")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
}

/// Row struct for reading from the exercises table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    #[expect(dead_code, reason = "ordering column, not part of the domain model")]
    pub id: i64,
    #[expect(dead_code, reason = "foreign key already known to the caller")]
    pub user_id: String,
    pub description: String,
    pub duration_minutes: i64,
    pub performed_on: NaiveDate,
}

/// Insertable struct for appending exercise records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercises)]
pub(crate) struct NewExerciseRow<'a> {
    pub user_id: &'a str,
    pub description: &'a str,
    pub duration_minutes: i64,
    pub performed_on: NaiveDate,
}
