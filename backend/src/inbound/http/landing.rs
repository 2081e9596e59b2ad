//! Landing page and fallback for unknown routes.

use actix_web::{HttpResponse, get, http::header::ContentType};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Serve the HTML landing page describing the API.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing page", content_type = "text/html")),
    tags = ["landing"],
    operation_id = "landingPage"
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// Default service answering every unmatched route.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::Value;

    #[actix_web::test]
    async fn index_serves_html() {
        let app = test::init_service(App::new().service(index)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8 body");
        assert!(html.contains("/api/exercise/new-user"));
    }

    #[actix_web::test]
    async fn unknown_routes_are_structured_not_found() {
        let app = test::init_service(App::new().default_service(web::to(not_found))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/nowhere").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "not found");
        assert_eq!(body["code"], "not_found");
    }
}
