//! Health and request-id integration tests.

mod helpers;

use helpers::setup_local_app;

#[tokio::test]
async fn test_health_reports_backend() {
    let app = setup_local_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "local");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = setup_local_app().await;

    let response = app.client().get("/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = setup_local_app().await;

    let response = app
        .client()
        .get("/health")
        .add_header("X-Request-ID", "trace-abc-123")
        .await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok());
    assert_eq!(request_id, Some("trace-abc-123"));
}

#[tokio::test]
async fn test_error_responses_carry_request_id() {
    let app = setup_local_app().await;

    let form = axum_test::multipart::MultipartForm::new().add_text("title", "x");
    let response = app.client().post("/api/upload").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert!(response.headers().get("x-request-id").is_some());
}
