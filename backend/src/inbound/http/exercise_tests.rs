//! Handler tests for the exercise tracker endpoints.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ExerciseTrackerService;
use crate::inbound::http::extractors::{form_config, json_config, query_config};
use crate::outbound::memory::InMemoryUserRepository;

struct FixtureClock;

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

async fn test_service()
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
            .service(web::scope("/api/exercise").configure(configure)),
    )
    .await
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

async fn create<S>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/new-user")
            .set_json(json!({"username": username})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["id"].as_str().expect("id in response").to_owned()
}

async fn add<S>(app: &S, payload: Value) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/add")
            .set_json(payload),
    )
    .await
}

async fn log<S>(app: &S, query: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::get().uri(&format!("/api/exercise/log?{query}")),
    )
    .await
}

#[rstest]
#[actix_web::test]
async fn new_user_returns_username_and_generated_id() {
    let app = test_service().await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/new-user")
            .set_json(json!({"username": "  ada "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ada");
    assert_eq!(body["id"].as_str().map(str::len), Some(9));
}

#[rstest]
#[actix_web::test]
async fn new_user_accepts_form_bodies() {
    let app = test_service().await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/new-user")
            .set_form([("username", "grace")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "grace");
}

#[rstest]
#[actix_web::test]
async fn duplicate_username_is_a_conflict() {
    let app = test_service().await;
    create(&app, "ada").await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/new-user")
            .set_json(json!({"username": "ada"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "username already taken");
    assert_eq!(body["details"]["code"], "duplicate_username");
}

#[rstest]
#[case(json!({}), "missing required field: username", "missing_field")]
#[case(json!({"username": "   "}), "username must not be empty", "empty_username")]
#[case(json!({"username": 123}), "username must be a string", "invalid_type")]
#[case(json!({"username": ["ada"]}), "username must be a string", "invalid_type")]
#[actix_web::test]
async fn new_user_validation_reports_first_violation(
    #[case] payload: Value,
    #[case] message: &str,
    #[case] code: &str,
) {
    let app = test_service().await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/new-user")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], message);
    assert_eq!(body["details"]["field"], "username");
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let app = test_service().await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/exercise/new-user")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn add_exercise_returns_formatted_entry() {
    let app = test_service().await;
    let id = create(&app, "ada").await;

    let (status, body) = add(
        &app,
        json!({"userId": id, "description": "swim", "duration": 20, "date": "2023-01-05"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "username": "ada",
            "description": "swim",
            "duration": 20,
            "id": id,
            "date": "Thu Jan 05 2023",
        })
    );
}

#[rstest]
#[case(json!(null))]
#[case(json!(""))]
#[actix_web::test]
async fn add_exercise_defaults_date_to_today(#[case] date: Value) {
    let app = test_service().await;
    let id = create(&app, "ada").await;

    let (status, body) = add(
        &app,
        json!({"userId": id, "description": "run", "duration": "30", "date": date}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "Sat Mar 09 2024");
    assert_eq!(body["duration"], 30);
}

#[rstest]
#[actix_web::test]
async fn add_exercise_accepts_form_bodies() {
    let app = test_service().await;
    let id = create(&app, "ada").await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/exercise/add").set_form([
            ("userId", id.as_str()),
            ("description", "row"),
            ("duration", "15"),
            ("date", ""),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "row");
    assert_eq!(body["duration"], 15);
}

#[rstest]
#[case("Zz9_unknown")]
#[case("bad id!")]
#[actix_web::test]
async fn add_exercise_for_unknown_user_is_not_found(#[case] user_id: &str) {
    let app = test_service().await;

    let (status, body) = add(
        &app,
        json!({"userId": user_id, "description": "run", "duration": 30}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user not found");
    assert_eq!(body["details"]["field"], "userId");
}

#[rstest]
#[case(json!({"description": "run", "duration": 30}), "userId", "missing_field")]
#[case(json!({"userId": "Ada_12345", "duration": 30}), "description", "missing_field")]
#[case(json!({"userId": "Ada_12345", "description": "run", "duration": 0}), "duration", "invalid_duration")]
#[case(json!({"userId": "Ada_12345", "description": "run", "duration": "ten"}), "duration", "invalid_duration")]
#[case(
    json!({"userId": "Ada_12345", "description": "run", "duration": 5, "date": "soon"}),
    "date",
    "invalid_date"
)]
#[case(json!({"userId": 42, "description": "run", "duration": 30}), "userId", "invalid_type")]
#[case(json!({"userId": "Ada_12345", "description": ["x"], "duration": 30}), "description", "invalid_type")]
#[case(json!({"userId": "Ada_12345", "description": "run", "duration": true}), "duration", "invalid_type")]
#[case(
    json!({"userId": "Ada_12345", "description": "run", "duration": 5, "date": 20230105}),
    "date",
    "invalid_type"
)]
#[actix_web::test]
async fn add_exercise_validation_names_the_field(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test_service().await;

    let (status, body) = add(&app, payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn users_lists_each_created_user_once() {
    let app = test_service().await;
    let ada = create(&app, "ada").await;
    let grace = create(&app, "grace").await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/api/exercise/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"username": "ada", "id": ada},
            {"username": "grace", "id": grace},
        ])
    );
}

async fn seeded_log<S>(app: &S) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let id = create(app, "ada").await;
    for (description, duration, date) in [("run", 30, "2023-01-01"), ("swim", 20, "2023-01-05")] {
        let (status, _) = add(
            app,
            json!({"userId": id, "description": description, "duration": duration, "date": date}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    id
}

#[rstest]
#[actix_web::test]
async fn log_without_filters_returns_everything() {
    let app = test_service().await;
    let id = seeded_log(&app).await;

    let (status, body) = log(&app, &format!("userId={id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert!(body.get("from").is_none());
    assert!(body.get("to").is_none());
    assert_eq!(body["log"][0]["description"], "run");
    assert_eq!(body["log"][0]["date"], "Sun Jan 01 2023");
}

#[rstest]
#[actix_web::test]
async fn log_from_bound_filters_and_echoes() {
    let app = test_service().await;
    let id = seeded_log(&app).await;

    let (status, body) = log(&app, &format!("userId={id}&from=2023-01-03")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "username": "ada",
            "from": "Tue Jan 03 2023",
            "count": 1,
            "log": [{"description": "swim", "duration": 20, "date": "Thu Jan 05 2023"}],
        })
    );
}

#[rstest]
#[case("limit=1", 1)]
#[case("limit=0", 2)]
#[case("limit=-1", 2)]
#[case("limit=99999999999999999999", 2)]
#[case("from=2023-02-01&to=2023-01-01", 0)]
#[case("to=2023-01-01", 1)]
#[actix_web::test]
async fn log_window_and_limit(#[case] query: &str, #[case] expected: usize) {
    let app = test_service().await;
    let id = seeded_log(&app).await;

    let (status, body) = log(&app, &format!("userId={id}&{query}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], expected);
    assert_eq!(body["log"].as_array().map(Vec::len), Some(expected));
}

#[rstest]
#[actix_web::test]
async fn log_limit_keeps_latest_entry() {
    let app = test_service().await;
    let id = seeded_log(&app).await;

    let (_, body) = log(&app, &format!("userId={id}&limit=1")).await;

    assert_eq!(body["log"][0]["description"], "swim");
}

#[rstest]
#[case("from=yesterday", "from")]
#[case("to=2023-13-01", "to")]
#[case("limit=many", "limit")]
#[actix_web::test]
async fn log_rejects_malformed_parameters(#[case] query: &str, #[case] field: &str) {
    let app = test_service().await;
    let id = seeded_log(&app).await;

    let (status, body) = log(&app, &format!("userId={id}&{query}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn log_requires_user_id() {
    let app = test_service().await;

    let (status, body) = log(&app, "limit=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "userId");
}

#[rstest]
#[actix_web::test]
async fn log_for_unknown_user_is_not_found() {
    let app = test_service().await;

    let (status, body) = log(&app, "userId=Nobody_123").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}
