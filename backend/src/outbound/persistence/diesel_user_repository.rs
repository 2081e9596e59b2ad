//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Users and their exercises live in separate tables; a user's log is the
//! set of `exercises` rows ordered by their serial id, which preserves
//! insertion order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{
    Description, DurationMinutes, LogEntry, User, UserId, UserSummary, Username,
};

use super::models::{ExerciseRow, NewExerciseRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{exercises, users};

/// Name of the unique constraint on `users.username`.
const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> UserRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        _ => UserRepositoryError::query("database error"),
    }
}

fn is_username_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(USERNAME_CONSTRAINT)
    )
}

fn corrupt_row(what: &str, err: &dyn std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::query(format!("stored {what} is invalid: {err}"))
}

/// Convert a users row to a domain summary.
fn row_to_summary(row: UserRow) -> Result<UserSummary, UserRepositoryError> {
    Ok(UserSummary {
        id: UserId::new(row.id).map_err(|err| corrupt_row("user id", &err))?,
        username: Username::new(row.username).map_err(|err| corrupt_row("username", &err))?,
    })
}

/// Convert an exercises row to a domain log entry.
fn row_to_entry(row: ExerciseRow) -> Result<LogEntry, UserRepositoryError> {
    let minutes =
        u32::try_from(row.duration_minutes).map_err(|err| corrupt_row("duration", &err))?;
    Ok(LogEntry::new(
        Description::new(row.description).map_err(|err| corrupt_row("description", &err))?,
        DurationMinutes::new(minutes).map_err(|err| corrupt_row("duration", &err))?,
        row.performed_on,
    ))
}

async fn load_user(
    conn: &mut AsyncPgConnection,
    id: &str,
) -> Result<Option<User>, UserRepositoryError> {
    let row: Option<UserRow> = users::table
        .filter(users::id.eq(id))
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
    let Some(row) = row else {
        return Ok(None);
    };

    let entries: Vec<ExerciseRow> = exercises::table
        .filter(exercises::user_id.eq(id))
        .order(exercises::id.asc())
        .select(ExerciseRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let summary = row_to_summary(row)?;
    let log = entries
        .into_iter()
        .map(row_to_entry)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(User::with_log(summary.id, summary.username, log)))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
        };
        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_username_violation(&err) {
                    UserRepositoryError::duplicate_username(user.username().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_user(&mut conn, id.as_ref()).await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<String> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match found {
            Some(user_id) => load_user(&mut conn, &user_id).await,
            None => Ok(None),
        }
    }

    async fn append_entry(
        &self,
        id: &UserId,
        entry: &LogEntry,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewExerciseRow {
            user_id: id.as_ref(),
            description: entry.description().as_ref(),
            duration_minutes: i64::from(entry.duration().get()),
            performed_on: entry.date(),
        };
        let inserted = diesel::insert_into(exercises::table)
            .values(&new_row)
            .execute(&mut conn)
            .await;

        match inserted {
            Ok(_) => load_user(&mut conn, id.as_ref()).await,
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => Ok(None),
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    async fn list(&self) -> Result<Vec<UserSummary>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_summary).collect()
    }
}
