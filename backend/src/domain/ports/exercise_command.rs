//! Driving port for state-changing exercise tracker use-cases.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Description, DurationMinutes, Error, LogEntry, UserId, UserSummary, Username};

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Requested unique username.
    pub username: Username,
}

/// Validated input for logging an exercise.
///
/// `date` is `None` when the client omitted it; the service substitutes the
/// current UTC day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddExerciseRequest {
    /// Owner of the log.
    pub user_id: UserId,
    /// What was done.
    pub description: Description,
    /// How long it took.
    pub duration: DurationMinutes,
    /// Day performed, if the client supplied one.
    pub date: Option<NaiveDate>,
}

/// Result of logging an exercise: the owner and the stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedExercise {
    /// Owner of the log.
    pub user: UserSummary,
    /// The entry as stored, with its resolved date.
    pub entry: LogEntry,
}

/// Domain use-case port for mutations.
#[async_trait]
pub trait ExerciseCommand: Send + Sync {
    /// Register a new user with an empty log.
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserSummary, Error>;

    /// Append an exercise to an existing user's log.
    async fn add_exercise(&self, request: AddExerciseRequest) -> Result<AddedExercise, Error>;
}
