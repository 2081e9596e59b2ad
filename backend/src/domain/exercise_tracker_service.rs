//! Exercise tracker domain service implementing the driving ports.
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AddExerciseRequest, AddedExercise, CreateUserRequest, ExerciseCommand, ExerciseQuery,
    UserLog, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, LogEntry, LogQuery, User, UserId, UserSummary, Username};

/// Exercise tracker service backed by a [`UserRepository`].
///
/// The clock supplies the default date for exercises logged without one.
#[derive(Clone)]
pub struct ExerciseTrackerService<R> {
    user_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ExerciseTrackerService<R> {
    /// Create a new service over `user_repo`.
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use exercise_tracker::domain::ExerciseTrackerService;
    /// # use exercise_tracker::outbound::memory::InMemoryUserRepository;
    /// # use mockable::DefaultClock;
    /// let service = ExerciseTrackerService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    #[must_use]
    pub const fn new(user_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { .. } => username_taken(),
    }
}

fn username_taken() -> Error {
    Error::conflict("username already taken").with_details(json!({
        "field": "username",
        "code": "duplicate_username",
    }))
}

/// Error reported for any user id that names no stored user.
pub(crate) fn user_not_found() -> Error {
    Error::not_found("user not found").with_details(json!({
        "field": "userId",
        "code": "user_not_found",
    }))
}

impl<R> ExerciseTrackerService<R>
where
    R: UserRepository,
{
    async fn ensure_username_free(&self, username: &Username) -> Result<(), Error> {
        let existing = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(username_taken());
        }
        Ok(())
    }
}

#[async_trait]
impl<R> ExerciseCommand for ExerciseTrackerService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserSummary, Error> {
        self.ensure_username_free(&request.username).await?;

        let user = User::new(UserId::generate(), request.username);
        self.user_repo
            .insert(&user)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user created");
        Ok(user.summary())
    }

    async fn add_exercise(&self, request: AddExerciseRequest) -> Result<AddedExercise, Error> {
        let date = request
            .date
            .unwrap_or_else(|| self.clock.utc().date_naive());
        let entry = LogEntry::new(request.description, request.duration, date);

        let user = self
            .user_repo
            .append_entry(&request.user_id, &entry)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(user_not_found)?;

        info!(
            user_id = %user.id(),
            duration = entry.duration().get(),
            date = %entry.date(),
            "exercise logged"
        );
        Ok(AddedExercise {
            user: user.summary(),
            entry,
        })
    }
}

#[async_trait]
impl<R> ExerciseQuery for ExerciseTrackerService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error> {
        self.user_repo.list().await.map_err(map_repository_error)
    }

    async fn exercise_log(&self, user_id: &UserId, query: LogQuery) -> Result<UserLog, Error> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(user_not_found)?;

        Ok(UserLog {
            user: user.summary(),
            log: query.apply(user.log()),
        })
    }
}

#[cfg(test)]
#[path = "exercise_tracker_service_tests.rs"]
mod tests;
