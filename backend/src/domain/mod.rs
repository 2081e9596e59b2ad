//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable where possible and document
//! invariants in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`]: API error response payload with a stable [`ErrorCode`].
//! - [`User`]: user identity plus exercise log.
//! - [`LogQuery`]: log window and limit, applied by [`format_log`].
//! - [`ExerciseTrackerService`]: implementation of the driving ports.

pub mod error;
pub mod exercise;
pub mod exercise_log;
mod exercise_tracker_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{DomainError, Error, ErrorCode, ErrorValidationError};
pub use self::exercise::{
    DESCRIPTION_MAX, Description, DurationMinutes, ExerciseValidationError, LogEntry,
};
pub use self::exercise_log::{
    FormattedLog, FormattedLogEntry, InvalidQueryParameter, LOG_DATE_FORMAT, LogQuery,
    format_log, format_log_date, parse_calendar_date,
};
pub use self::exercise_tracker_service::ExerciseTrackerService;
pub(crate) use self::exercise_tracker_service::user_not_found;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    USER_ID_GENERATED_LEN, USER_ID_MAX, USER_ID_MIN, USERNAME_MAX, User, UserId, UserSummary,
    UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use exercise_tracker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("user not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
