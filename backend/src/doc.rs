//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the request, response, and
//! error schemas they use. Swagger UI serves it in debug builds, and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::{DomainError, ErrorCode, FormattedLogEntry};
use crate::inbound::http::exercise::{
    AddExerciseBody, AddExerciseResponse, ExerciseLogResponse, NewUserRequest, UserResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Create users, log exercises, and read filtered exercise logs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::exercise::create_user,
        crate::inbound::http::exercise::add_exercise,
        crate::inbound::http::exercise::list_users,
        crate::inbound::http::exercise::exercise_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::landing::index,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        NewUserRequest,
        AddExerciseBody,
        UserResponse,
        AddExerciseResponse,
        ExerciseLogResponse,
        FormattedLogEntry,
    )),
    tags(
        (name = "exercise", description = "Users and their exercise logs"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "landing", description = "Human-facing landing page")
    )
)]
pub struct ApiDoc;
