//! Shared helpers for HTTP-level integration tests.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use exercise_tracker::Trace;
use exercise_tracker::domain::ExerciseTrackerService;
use exercise_tracker::inbound::http::exercise::configure;
use exercise_tracker::inbound::http::extractors::{form_config, json_config, query_config};
use exercise_tracker::inbound::http::landing::not_found;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::InMemoryUserRepository;

/// Clock pinned to Saturday 2024-03-09, noon UTC.
pub struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

/// Response status, trace header, and decoded JSON body.
pub struct Captured {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Initialise the API as the server mounts it, over an empty in-memory store.
pub async fn init_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let service = Arc::new(ExerciseTrackerService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(FixtureClock),
    ));
    let state = HttpState::new(service.clone(), service);
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(form_config())
            .app_data(query_config())
            .wrap(Trace)
            .service(web::scope("/api/exercise").configure(configure))
            .default_service(web::to(not_found)),
    )
    .await
}

/// Send `request` and capture the parts the tests inspect.
pub async fn send<S>(app: &S, request: actix_test::TestRequest) -> Captured
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(exercise_tracker::domain::TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = actix_test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Captured {
        status,
        trace_id,
        body,
    }
}

/// Register `username` through the form endpoint and return the new id.
pub async fn create_user<S>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let captured = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/new-user")
            .set_form([("username", username)]),
    )
    .await;
    assert_eq!(captured.status, StatusCode::OK, "body: {}", captured.body);
    captured.body["id"]
        .as_str()
        .expect("id in create response")
        .to_owned()
}

/// Append an exercise with an explicit date via JSON.
pub async fn add_exercise<S>(app: &S, user_id: &str, description: &str, duration: u32, date: &str)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let captured = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/add")
            .set_json(serde_json::json!({
                "userId": user_id,
                "description": description,
                "duration": duration,
                "date": date,
            })),
    )
    .await;
    assert_eq!(captured.status, StatusCode::OK, "body: {}", captured.body);
}
