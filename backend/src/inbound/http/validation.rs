//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` [`Error`] whose details carry
//! the offending wire field and a stable snake_case code, e.g.
//! `{"field": "duration", "code": "invalid_duration"}`.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    Description, DurationMinutes, Error, ExerciseValidationError, InvalidQueryParameter,
    UserId, UserValidationError, Username, parse_calendar_date,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyUsername,
    UsernameTooLong,
    InvalidUsername,
    EmptyDescription,
    DescriptionTooLong,
    InvalidDuration,
    InvalidDate,
    InvalidLimit,
    InvalidType,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong => "username_too_long",
            Self::InvalidUsername => "invalid_username",
            Self::EmptyDescription => "empty_description",
            Self::DescriptionTooLong => "description_too_long",
            Self::InvalidDuration => "invalid_duration",
            Self::InvalidDate => "invalid_date",
            Self::InvalidLimit => "invalid_limit",
            Self::InvalidType => "invalid_type",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const USER_ID: FieldName = FieldName::new("userId");
pub(crate) const DESCRIPTION: FieldName = FieldName::new("description");
pub(crate) const DURATION: FieldName = FieldName::new("duration");
pub(crate) const DATE: FieldName = FieldName::new("date");

fn field_error(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, format!("missing required field: {name}"), ErrorCode::MissingField)
}

/// A body field as it arrived on the wire, before type checking.
///
/// URL-encoded forms only carry strings, and JSON clients sometimes quote
/// numbers, so numeric fields accept both. Any other JSON value is kept so
/// the field can be reported by name instead of failing the whole body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A JSON integer.
    Integer(i64),
    /// A JSON number with a fractional part or outside the `i64` range.
    Float(f64),
    /// A JSON string or a form value.
    Text(String),
    /// Any other JSON value: booleans, arrays or objects.
    Other(serde_json::Value),
}

impl FieldValue {
    /// The value as text, rejecting anything but a string.
    fn into_text(self, field: FieldName) -> Result<String, Error> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Integer(_) | Self::Float(_) | Self::Other(_) => {
                Err(invalid_type_error(field, "a string"))
            }
        }
    }

    /// The value as trimmed numeric text, rejecting non-scalar values.
    fn into_numeric_text(self, field: FieldName) -> Result<String, Error> {
        match self {
            Self::Integer(value) => Ok(value.to_string()),
            Self::Float(value) => Ok(value.to_string()),
            Self::Text(value) => Ok(value.trim().to_owned()),
            Self::Other(_) => Err(invalid_type_error(field, "a number")),
        }
    }
}

fn invalid_type_error(field: FieldName, expected: &str) -> Error {
    let name = field.as_str();
    field_error(field, format!("{name} must be {expected}"), ErrorCode::InvalidType)
}

/// Type-check an optional string field.
pub(crate) fn text_field(
    field: FieldName,
    value: Option<FieldValue>,
) -> Result<Option<String>, Error> {
    value.map(|raw| raw.into_text(field)).transpose()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

pub(crate) fn parse_username(value: Option<String>) -> Result<Username, Error> {
    let raw = value.ok_or_else(|| missing_field_error(USERNAME))?;
    Username::new(raw).map_err(map_username_error)
}

fn map_username_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyUsername => ErrorCode::EmptyUsername,
        UserValidationError::UsernameTooLong { .. } => ErrorCode::UsernameTooLong,
        _ => ErrorCode::InvalidUsername,
    };
    field_error(USERNAME, err.to_string(), code)
}

/// Resolve the `userId` field.
///
/// Returns `Ok(None)` when an id was supplied but cannot name any user; the
/// caller reports that as "user not found" rather than a validation failure.
pub(crate) fn parse_user_id(value: Option<String>) -> Result<Option<UserId>, Error> {
    let raw = non_blank(value).ok_or_else(|| missing_field_error(USER_ID))?;
    Ok(UserId::new(raw.trim()).ok())
}

pub(crate) fn parse_description(value: Option<String>) -> Result<Description, Error> {
    let raw = value.ok_or_else(|| missing_field_error(DESCRIPTION))?;
    Description::new(raw).map_err(|err| {
        let code = match err {
            ExerciseValidationError::DescriptionTooLong { .. } => ErrorCode::DescriptionTooLong,
            _ => ErrorCode::EmptyDescription,
        };
        field_error(DESCRIPTION, err.to_string(), code)
    })
}

pub(crate) fn parse_duration(value: Option<FieldValue>) -> Result<DurationMinutes, Error> {
    let raw = value
        .map(|raw| raw.into_numeric_text(DURATION))
        .transpose()?
        .filter(|text| !text.is_empty())
        .ok_or_else(|| missing_field_error(DURATION))?;
    let invalid = || {
        field_error(
            DURATION,
            ExerciseValidationError::NonPositiveDuration.to_string(),
            ErrorCode::InvalidDuration,
        )
    };
    let minutes: u32 = raw.parse().map_err(|_| invalid())?;
    DurationMinutes::new(minutes).map_err(|_| invalid())
}

/// Parse the optional exercise date. Absent or blank means "today".
pub(crate) fn parse_optional_date(value: Option<String>) -> Result<Option<NaiveDate>, Error> {
    non_blank(value)
        .map(|raw| {
            parse_calendar_date(&raw).ok_or_else(|| {
                field_error(
                    DATE,
                    "date must be a calendar date (YYYY-MM-DD)",
                    ErrorCode::InvalidDate,
                )
            })
        })
        .transpose()
}

/// Map a log query parse failure onto the offending parameter.
pub(crate) fn map_query_error(err: &InvalidQueryParameter) -> Error {
    let code = if err.parameter == "limit" {
        ErrorCode::InvalidLimit
    } else {
        ErrorCode::InvalidDate
    };
    field_error(FieldName::new(err.parameter), err.to_string(), code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    fn detail(error: &Error, key: &str) -> Option<String> {
        error
            .details()
            .and_then(|details| details.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    #[rstest]
    fn missing_username_names_the_field() {
        let error = parse_username(None).expect_err("missing");
        assert_eq!(error.message(), "missing required field: username");
        assert_eq!(detail(&error, "field").as_deref(), Some("username"));
        assert_eq!(detail(&error, "code").as_deref(), Some("missing_field"));
    }

    #[rstest]
    #[case("   ", "empty_username")]
    #[case("tab\tname", "invalid_username")]
    fn bad_usernames_are_rejected(#[case] raw: &str, #[case] code: &str) {
        let error = parse_username(Some(raw.to_owned())).expect_err("invalid");
        assert_eq!(detail(&error, "code").as_deref(), Some(code));
    }

    #[rstest]
    #[case(FieldValue::Integer(30), 30)]
    #[case(FieldValue::Text(" 45 ".to_owned()), 45)]
    fn durations_accept_numbers_and_numeric_text(
        #[case] raw: FieldValue,
        #[case] expected: u32,
    ) {
        let duration = parse_duration(Some(raw)).expect("valid duration");
        assert_eq!(duration.get(), expected);
    }

    #[rstest]
    #[case(FieldValue::Integer(0))]
    #[case(FieldValue::Integer(-5))]
    #[case(FieldValue::Float(1.5))]
    #[case(FieldValue::Text("ten".to_owned()))]
    fn invalid_durations_are_rejected(#[case] raw: FieldValue) {
        let error = parse_duration(Some(raw)).expect_err("invalid");
        assert_eq!(detail(&error, "field").as_deref(), Some("duration"));
        assert_eq!(detail(&error, "code").as_deref(), Some("invalid_duration"));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(FieldValue::Text("  ".to_owned())))]
    fn blank_duration_is_missing(#[case] raw: Option<FieldValue>) {
        let error = parse_duration(raw).expect_err("missing");
        assert_eq!(detail(&error, "code").as_deref(), Some("missing_field"));
    }

    #[rstest]
    #[case(FieldValue::Other(json!(["30"])))]
    #[case(FieldValue::Other(json!(true)))]
    fn non_scalar_duration_is_a_type_error(#[case] raw: FieldValue) {
        let error = parse_duration(Some(raw)).expect_err("invalid");
        assert_eq!(error.message(), "duration must be a number");
        assert_eq!(detail(&error, "field").as_deref(), Some("duration"));
        assert_eq!(detail(&error, "code").as_deref(), Some("invalid_type"));
    }

    #[rstest]
    #[case(FieldValue::Integer(123))]
    #[case(FieldValue::Float(1.5))]
    #[case(FieldValue::Other(json!(["x"])))]
    #[case(FieldValue::Other(json!({"name": "ada"})))]
    fn text_fields_reject_other_types(#[case] raw: FieldValue) {
        let error = text_field(DESCRIPTION, Some(raw)).expect_err("wrong type");
        assert_eq!(error.message(), "description must be a string");
        assert_eq!(detail(&error, "field").as_deref(), Some("description"));
        assert_eq!(detail(&error, "code").as_deref(), Some("invalid_type"));
    }

    #[rstest]
    fn text_fields_pass_strings_and_absence_through() {
        let text = text_field(USERNAME, Some(FieldValue::Text("ada".to_owned())));
        assert_eq!(text.expect("string"), Some("ada".to_owned()));
        assert_eq!(text_field(USERNAME, None).expect("absent"), None);
    }

    #[rstest]
    fn wire_values_deserialize_without_failing_the_body() {
        let parsed: Vec<FieldValue> =
            serde_json::from_value(json!([30, 1.5, "run", ["x"], null]))
                .expect("every JSON value is accepted");
        assert_eq!(
            parsed,
            vec![
                FieldValue::Integer(30),
                FieldValue::Float(1.5),
                FieldValue::Text("run".to_owned()),
                FieldValue::Other(json!(["x"])),
                FieldValue::Other(serde_json::Value::Null),
            ]
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("2023-01-05"), NaiveDate::from_ymd_opt(2023, 1, 5))]
    fn optional_dates(#[case] raw: Option<&str>, #[case] expected: Option<NaiveDate>) {
        let parsed = parse_optional_date(raw.map(str::to_owned)).expect("valid date");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn malformed_date_is_rejected() {
        let error = parse_optional_date(Some("05/01/2023".to_owned())).expect_err("invalid");
        assert_eq!(detail(&error, "code").as_deref(), Some("invalid_date"));
    }

    #[rstest]
    fn malformed_user_id_cannot_name_a_user() {
        assert_eq!(parse_user_id(Some("no".to_owned())).expect("supplied"), None);
        let error = parse_user_id(Some(" ".to_owned())).expect_err("missing");
        assert_eq!(detail(&error, "field").as_deref(), Some("userId"));
    }

    #[rstest]
    fn query_errors_name_the_parameter() {
        let error = map_query_error(&InvalidQueryParameter {
            parameter: "limit",
            value: "ten".to_owned(),
            expected: "an integer",
        });
        assert_eq!(error.message(), "limit must be an integer");
        assert_eq!(detail(&error, "field").as_deref(), Some("limit"));
        assert_eq!(detail(&error, "code").as_deref(), Some("invalid_limit"));
    }
}
