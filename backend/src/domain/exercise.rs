//! Exercise log entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the exercise value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseValidationError {
    /// The description was blank.
    #[error("description must not be empty")]
    EmptyDescription,
    /// The description exceeds [`DESCRIPTION_MAX`] characters.
    #[error("description must be at most {max} characters")]
    DescriptionTooLong {
        /// Longest accepted length.
        max: usize,
    },
    /// The duration was zero.
    #[error("duration must be a positive number of minutes")]
    NonPositiveDuration,
}

/// Maximum allowed length for an exercise description.
pub const DESCRIPTION_MAX: usize = 256;

/// Free-text description of an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`].
    pub fn new(raw: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        let description = raw.into();
        if description.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(ExerciseValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(description))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Description {
    type Error = ExerciseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Exercise duration in whole minutes. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DurationMinutes(u32);

impl DurationMinutes {
    /// Validate and construct a [`DurationMinutes`].
    pub const fn new(minutes: u32) -> Result<Self, ExerciseValidationError> {
        if minutes == 0 {
            return Err(ExerciseValidationError::NonPositiveDuration);
        }
        Ok(Self(minutes))
    }

    /// Number of minutes.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<DurationMinutes> for u32 {
    fn from(value: DurationMinutes) -> Self {
        value.0
    }
}

impl TryFrom<u32> for DurationMinutes {
    type Error = ExerciseValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One recorded exercise.
///
/// Entries have no identity of their own; they are addressed only through
/// their owning user's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    description: Description,
    duration: DurationMinutes,
    date: NaiveDate,
}

impl LogEntry {
    /// Build an entry from validated parts.
    #[must_use]
    pub const fn new(description: Description, duration: DurationMinutes, date: NaiveDate) -> Self {
        Self {
            description,
            duration,
            date,
        }
    }

    /// What was done.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// How long it took.
    #[must_use]
    pub const fn duration(&self) -> DurationMinutes {
        self.duration
    }

    /// Calendar day the exercise happened on.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}
