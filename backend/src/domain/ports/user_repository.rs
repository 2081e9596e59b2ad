//! Port abstraction for the user document store and its errors.

use async_trait::async_trait;

use crate::domain::{LogEntry, User, UserId, UserSummary, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store's own uniqueness constraint rejected the username.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

/// Storage for users and their append-only exercise logs.
///
/// Implementations must return logs in insertion order. Username uniqueness
/// is checked by the caller before [`UserRepository::insert`]; stores that can
/// enforce it themselves report [`UserRepositoryError::DuplicateUsername`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user, with its log, by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user, with its log, by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Append `entry` to the user's log and return the updated user.
    ///
    /// Returns `None` when no user has the given identifier.
    async fn append_entry(
        &self,
        id: &UserId,
        entry: &LogEntry,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// List every user without their logs, in creation order.
    async fn list(&self) -> Result<Vec<UserSummary>, UserRepositoryError>;
}
