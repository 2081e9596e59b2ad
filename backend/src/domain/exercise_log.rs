//! Exercise log windowing and display formatting.
//!
//! A [`LogQuery`] restricts a user's history to an inclusive date window and
//! optionally keeps only the most recently appended entries. Parsing and
//! filtering are separate steps: [`LogQuery::parse`] validates raw query
//! parameters, [`LogQuery::apply`] is a pure function over the log.
//!
//! ```
//! use chrono::NaiveDate;
//! use exercise_tracker::domain::{Description, DurationMinutes, LogEntry, LogQuery};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).expect("valid date");
//! let log = vec![
//!     LogEntry::new(Description::new("run")?, DurationMinutes::new(30)?, day(1)),
//!     LogEntry::new(Description::new("swim")?, DurationMinutes::new(20)?, day(5)),
//! ];
//!
//! let query = LogQuery::parse(Some("2023-01-03"), None, None)?;
//! let formatted = query.apply(&log);
//! assert_eq!(formatted.count(), 1);
//! assert_eq!(formatted.log[0].date, "Thu Jan 05 2023");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::num::IntErrorKind;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::LogEntry;

/// `strftime` pattern for client-facing dates, e.g. `Thu Jan 05 2023`.
pub const LOG_DATE_FORMAT: &str = "%a %b %d %Y";

/// Render a calendar date in the client-facing form.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use exercise_tracker::domain::format_log_date;
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 5).expect("valid date");
/// assert_eq!(format_log_date(date), "Thu Jan 05 2023");
/// ```
#[must_use]
pub fn format_log_date(date: NaiveDate) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}

/// Parse a client-supplied calendar date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC calendar day is
/// used. Returns `None` for anything else.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
    })
}

/// A log query parameter could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{parameter} must be {expected}")]
pub struct InvalidQueryParameter {
    /// Name of the offending parameter as it appears on the wire.
    pub parameter: &'static str,
    /// Raw value supplied by the client.
    pub value: String,
    /// Human-readable description of the accepted shape.
    pub expected: &'static str,
}

impl InvalidQueryParameter {
    fn date(parameter: &'static str, value: &str) -> Self {
        Self {
            parameter,
            value: value.to_owned(),
            expected: "a calendar date (YYYY-MM-DD)",
        }
    }

    fn integer(parameter: &'static str, value: &str) -> Self {
        Self {
            parameter,
            value: value.to_owned(),
            expected: "an integer",
        }
    }
}

/// Resolved log window and size cap.
///
/// ## Invariants
/// - Absent bounds mean "unbounded", never a sentinel date.
/// - A non-positive `limit` disables truncation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
    /// Number of trailing entries to keep; non-positive keeps all.
    pub limit: Option<i64>,
}

impl LogQuery {
    /// Parse raw query parameters. Absent or blank values mean "not given".
    ///
    /// # Errors
    /// Returns [`InvalidQueryParameter`] for a malformed date or a
    /// non-integer limit.
    pub fn parse(
        from: Option<&str>,
        to: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, InvalidQueryParameter> {
        Ok(Self {
            from: parse_bound("from", from)?,
            to: parse_bound("to", to)?,
            limit: parse_limit(limit)?,
        })
    }

    /// Whether `date` falls inside the inclusive window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Number of trailing entries to keep, if truncation applies.
    fn effective_limit(&self) -> Option<usize> {
        self.limit
            .filter(|limit| *limit > 0)
            .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX))
    }

    /// Entries inside the window, keeping only the last `limit` of them.
    #[must_use]
    pub fn select<'a>(&self, log: &'a [LogEntry]) -> Vec<&'a LogEntry> {
        let mut kept: Vec<&LogEntry> = log
            .iter()
            .filter(|entry| self.contains(entry.date()))
            .collect();
        if let Some(limit) = self.effective_limit() {
            let excess = kept.len().saturating_sub(limit);
            kept.drain(..excess);
        }
        kept
    }

    /// Filter, truncate, and format `log`.
    #[must_use]
    pub fn apply(&self, log: &[LogEntry]) -> FormattedLog {
        FormattedLog {
            from: self.from,
            to: self.to,
            log: self
                .select(log)
                .into_iter()
                .map(FormattedLogEntry::from)
                .collect(),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_bound(
    parameter: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, InvalidQueryParameter> {
    non_blank(raw)
        .map(|value| {
            parse_calendar_date(value).ok_or_else(|| InvalidQueryParameter::date(parameter, value))
        })
        .transpose()
}

/// Integers beyond the `i64` range saturate; they still mean "keep all".
const fn saturated_limit(kind: &IntErrorKind) -> Option<i64> {
    match kind {
        IntErrorKind::PosOverflow => Some(i64::MAX),
        IntErrorKind::NegOverflow => Some(i64::MIN),
        _ => None,
    }
}

fn parse_limit(raw: Option<&str>) -> Result<Option<i64>, InvalidQueryParameter> {
    non_blank(raw)
        .map(|value| {
            value.parse::<i64>().or_else(|err| {
                saturated_limit(err.kind())
                    .ok_or_else(|| InvalidQueryParameter::integer("limit", value))
            })
        })
        .transpose()
}

/// One entry as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FormattedLogEntry {
    /// What was done.
    #[schema(example = "swim")]
    pub description: String,
    /// Minutes spent.
    #[schema(example = 20)]
    pub duration: u32,
    /// Calendar day in `%a %b %d %Y` form.
    #[schema(example = "Thu Jan 05 2023")]
    pub date: String,
}

impl From<&LogEntry> for FormattedLogEntry {
    fn from(entry: &LogEntry) -> Self {
        Self {
            description: entry.description().as_ref().to_owned(),
            duration: entry.duration().get(),
            date: format_log_date(entry.date()),
        }
    }
}

/// Output of [`LogQuery::apply`]: the formatted entries and the window that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLog {
    /// Lower bound the window was built with.
    pub from: Option<NaiveDate>,
    /// Upper bound the window was built with.
    pub to: Option<NaiveDate>,
    /// Selected entries in insertion order.
    pub log: Vec<FormattedLogEntry>,
}

impl FormattedLog {
    /// Number of entries returned.
    #[must_use]
    pub fn count(&self) -> usize {
        self.log.len()
    }
}

/// Parse the raw parameters and format `log` in one step.
///
/// # Errors
/// Returns [`InvalidQueryParameter`] naming the first malformed parameter.
pub fn format_log(
    from: Option<&str>,
    to: Option<&str>,
    limit: Option<&str>,
    log: &[LogEntry],
) -> Result<FormattedLog, InvalidQueryParameter> {
    LogQuery::parse(from, to, limit).map(|query| query.apply(log))
}

#[cfg(test)]
#[path = "exercise_log_tests.rs"]
mod tests;
