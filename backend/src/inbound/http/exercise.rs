//! Exercise tracker API handlers.
//!
//! ```text
//! POST /api/exercise/new-user {"username":"ada"}
//! POST /api/exercise/add {"userId":"HJ3_k-9xA","description":"run","duration":30}
//! GET  /api/exercise/users
//! GET  /api/exercise/log?userId=HJ3_k-9xA&from=2023-01-01&limit=5
//! ```
//!
//! Bodies may be JSON or URL-encoded forms.

use actix_web::{Either, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{AddExerciseRequest, AddedExercise, CreateUserRequest, UserLog};
use crate::domain::{
    DomainError, Error, FormattedLogEntry, LogQuery, UserSummary, format_log_date,
    user_not_found,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DATE, DESCRIPTION, FieldValue, USER_ID, USERNAME, map_query_error, parse_description,
    parse_duration, parse_optional_date, parse_user_id, parse_username, text_field,
};

/// Request body accepted as JSON or as an URL-encoded form.
pub type Body<T> = Either<web::Json<T>, web::Form<T>>;

fn into_body<T>(payload: Body<T>) -> T {
    match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// Body for `POST /api/exercise/new-user`.
///
/// Fields are deserialized loosely and type-checked during validation so a
/// mistyped field is reported by name.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    /// Requested username.
    #[schema(value_type = Option<String>, example = "ada")]
    pub username: Option<FieldValue>,
}

impl TryFrom<NewUserRequest> for CreateUserRequest {
    type Error = Error;

    fn try_from(value: NewUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: parse_username(text_field(USERNAME, value.username)?)?,
        })
    }
}

/// Body for `POST /api/exercise/add`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseBody {
    /// Owner of the exercise.
    #[schema(value_type = Option<String>, example = "HJ3_k-9xA")]
    pub user_id: Option<FieldValue>,
    /// What was done.
    #[schema(value_type = Option<String>, example = "run")]
    pub description: Option<FieldValue>,
    /// Whole minutes, as a number or numeric text.
    #[schema(value_type = Option<u32>, example = 30)]
    pub duration: Option<FieldValue>,
    /// Calendar date; defaults to today (UTC) when absent or blank.
    #[schema(value_type = Option<String>, example = "2023-01-05")]
    pub date: Option<FieldValue>,
}

/// Validate an add-exercise body.
///
/// Fields are checked in wire order so the first violated one is reported.
/// `Ok(None)` means the supplied id cannot belong to any user.
fn validate_add_exercise(body: AddExerciseBody) -> Result<Option<AddExerciseRequest>, Error> {
    let owner = parse_user_id(text_field(USER_ID, body.user_id)?)?;
    let description = parse_description(text_field(DESCRIPTION, body.description)?)?;
    let duration = parse_duration(body.duration)?;
    let date = parse_optional_date(text_field(DATE, body.date)?)?;
    Ok(owner.map(|user_id| AddExerciseRequest {
        user_id,
        description,
        duration,
        date,
    }))
}

/// Query parameters for `GET /api/exercise/log`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogParams {
    /// Identifier returned by `new-user`.
    pub user_id: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Keep only the last `limit` matching entries; non-positive keeps all.
    pub limit: Option<String>,
}

/// A user without their log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Display name.
    #[schema(example = "ada")]
    pub username: String,
    /// Public identifier.
    #[schema(example = "HJ3_k-9xA")]
    pub id: String,
}

impl From<UserSummary> for UserResponse {
    fn from(value: UserSummary) -> Self {
        Self {
            username: value.username.into(),
            id: value.id.into(),
        }
    }
}

/// The stored exercise together with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddExerciseResponse {
    /// Owner's username.
    #[schema(example = "ada")]
    pub username: String,
    /// Stored description.
    #[schema(example = "run")]
    pub description: String,
    /// Duration in minutes.
    #[schema(example = 30)]
    pub duration: u32,
    /// Owner's identifier.
    #[schema(example = "HJ3_k-9xA")]
    pub id: String,
    /// Exercise date in log format.
    #[schema(example = "Thu Jan 05 2023")]
    pub date: String,
}

impl From<AddedExercise> for AddExerciseResponse {
    fn from(value: AddedExercise) -> Self {
        let AddedExercise { user, entry } = value;
        Self {
            username: user.username.into(),
            description: entry.description().as_ref().to_owned(),
            duration: entry.duration().get(),
            id: user.id.into(),
            date: format_log_date(entry.date()),
        }
    }
}

/// A user's filtered exercise log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ExerciseLogResponse {
    /// User identifier.
    #[schema(example = "HJ3_k-9xA")]
    pub id: String,
    /// Username.
    #[schema(example = "ada")]
    pub username: String,
    /// Echo of the `from` bound, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Tue Jan 03 2023")]
    pub from: Option<String>,
    /// Echo of the `to` bound, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Number of entries in `log`.
    #[schema(example = 1)]
    pub count: usize,
    /// Matching entries in insertion order.
    pub log: Vec<FormattedLogEntry>,
}

impl From<UserLog> for ExerciseLogResponse {
    fn from(value: UserLog) -> Self {
        let UserLog { user, log } = value;
        Self {
            id: user.id.into(),
            username: user.username.into(),
            from: log.from.map(format_log_date),
            to: log.to.map(format_log_date),
            count: log.count(),
            log: log.log,
        }
    }
}

/// Create a user with an empty exercise log.
#[utoipa::path(
    post,
    path = "/api/exercise/new-user",
    request_body(content = NewUserRequest, description = "JSON or URL-encoded form"),
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 409, description = "Username already taken", body = DomainError),
        (status = 503, description = "Store unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["exercise"],
    operation_id = "createUser"
)]
#[post("/new-user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: Body<NewUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let request = CreateUserRequest::try_from(into_body(payload))?;
    let user = state.commands.create_user(request).await?;
    Ok(web::Json(user.into()))
}

/// Append an exercise to a user's log.
#[utoipa::path(
    post,
    path = "/api/exercise/add",
    request_body(content = AddExerciseBody, description = "JSON or URL-encoded form"),
    responses(
        (status = 200, description = "Exercise logged", body = AddExerciseResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 404, description = "Unknown user", body = DomainError),
        (status = 503, description = "Store unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["exercise"],
    operation_id = "addExercise"
)]
#[post("/add")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    payload: Body<AddExerciseBody>,
) -> ApiResult<web::Json<AddExerciseResponse>> {
    let request = validate_add_exercise(into_body(payload))?.ok_or_else(user_not_found)?;
    let added = state.commands.add_exercise(request).await?;
    Ok(web::Json(added.into()))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/exercise/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Store unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["exercise"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.queries.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Read a user's exercise log, optionally windowed and limited.
#[utoipa::path(
    get,
    path = "/api/exercise/log",
    params(LogParams),
    responses(
        (status = 200, description = "Exercise log", body = ExerciseLogResponse),
        (status = 400, description = "Invalid query parameter", body = DomainError),
        (status = 404, description = "Unknown user", body = DomainError),
        (status = 503, description = "Store unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["exercise"],
    operation_id = "exerciseLog"
)]
#[get("/log")]
pub async fn exercise_log(
    state: web::Data<HttpState>,
    params: web::Query<LogParams>,
) -> ApiResult<HttpResponse> {
    let LogParams {
        user_id,
        from,
        to,
        limit,
    } = params.into_inner();
    let supplied_id = parse_user_id(user_id)?;
    let query = LogQuery::parse(from.as_deref(), to.as_deref(), limit.as_deref())
        .map_err(|err| map_query_error(&err))?;
    let owner = supplied_id.ok_or_else(user_not_found)?;

    let user_log = state.queries.exercise_log(&owner, query).await?;
    Ok(HttpResponse::Ok().json(ExerciseLogResponse::from(user_log)))
}

/// Register the exercise endpoints under `/api/exercise`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use exercise_tracker::inbound::http::exercise::configure;
///
/// let app = App::new().service(web::scope("/api/exercise").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(add_exercise)
        .service(list_users)
        .service(exercise_log);
}

#[cfg(test)]
#[path = "exercise_tests.rs"]
mod tests;
