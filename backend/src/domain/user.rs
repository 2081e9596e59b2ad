//! User data model.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::LogEntry;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier has the wrong length or uses characters outside the alphabet.
    #[error("user id must be {min} to {max} characters of letters, digits, '_' or '-'")]
    InvalidId {
        /// Shortest accepted length.
        min: usize,
        /// Longest accepted length.
        max: usize,
    },
    /// The username was blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The username exceeds [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Longest accepted length.
        max: usize,
    },
    /// The username contains control characters.
    #[error("username must not contain control characters")]
    UsernameControlCharacters,
}

const ID_ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_-";

/// Length of generated identifiers.
pub const USER_ID_GENERATED_LEN: usize = 9;
/// Shortest identifier accepted from clients.
pub const USER_ID_MIN: usize = 7;
/// Longest identifier accepted from clients.
pub const USER_ID_MAX: usize = 14;

/// Short, URL-safe user identifier.
///
/// Identifiers are generated by the service and echoed back by clients, so
/// parsing only checks the alphabet and length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = raw.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        let length = id.chars().count();
        let alphabet_ok = id.bytes().all(|b| ID_ALPHABET.contains(&b));
        if !(USER_ID_MIN..=USER_ID_MAX).contains(&length) || !alphabet_ok {
            return Err(UserValidationError::InvalidId {
                min: USER_ID_MIN,
                max: USER_ID_MAX,
            });
        }
        Ok(Self(id))
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generate an identifier from the supplied random source.
    #[must_use]
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let id = (0..USER_ID_GENERATED_LEN)
            .filter_map(|_| ID_ALPHABET.choose(rng).copied().map(char::from))
            .collect();
        Self(id)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;

/// Unique, human-chosen user name. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(UserValidationError::UsernameControlCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user with its exercise log.
///
/// ## Invariants
/// - `log` is kept in insertion order and only ever appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    log: Vec<LogEntry>,
}

impl User {
    /// Build a user with an empty log.
    #[must_use]
    pub const fn new(id: UserId, username: Username) -> Self {
        Self::with_log(id, username, Vec::new())
    }

    /// Rehydrate a user from storage, preserving log order.
    #[must_use]
    pub const fn with_log(id: UserId, username: Username, log: Vec<LogEntry>) -> Self {
        Self { id, username, log }
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Exercise history in insertion order.
    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Append an entry to the end of the log.
    pub fn append(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    /// Identity without the log, as exposed by listings.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// User identity without the exercise log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// Stable user identifier.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
}
