//! `UserRepository` backed by a process-local vector.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{LogEntry, User, UserId, UserSummary, Username};

/// In-memory user store.
///
/// Users are kept in creation order. Username and identifier uniqueness are
/// enforced on insert, so concurrent creators racing past the service's
/// existence check still cannot produce duplicates.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.username() == user.username()) {
            return Err(UserRepositoryError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        if users.iter().any(|existing| existing.id() == user.id()) {
            return Err(UserRepositoryError::query(format!(
                "user id already exists: {}",
                user.id()
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.username() == username).cloned())
    }

    async fn append_entry(
        &self,
        id: &UserId,
        entry: &LogEntry,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|user| user.id() == id).map(|user| {
            user.append(entry.clone());
            user.clone()
        }))
    }

    async fn list(&self) -> Result<Vec<UserSummary>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().map(User::summary).collect())
    }
}
