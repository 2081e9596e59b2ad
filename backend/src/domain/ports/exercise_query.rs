//! Driving port for read-only exercise tracker use-cases.

use async_trait::async_trait;

use crate::domain::{Error, FormattedLog, LogQuery, UserId, UserSummary};

/// A user's identity together with a formatted view of their log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLog {
    /// Owner of the log.
    pub user: UserSummary,
    /// Entries selected by the query.
    pub log: FormattedLog,
}

/// Domain use-case port for reads.
#[async_trait]
pub trait ExerciseQuery: Send + Sync {
    /// Every registered user, without logs.
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error>;

    /// The user's log restricted to `query`.
    async fn exercise_log(&self, user_id: &UserId, query: LogQuery) -> Result<UserLog, Error>;
}
