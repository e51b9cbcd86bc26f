use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use drivehub_auth_types::session::SessionSecret;
use drivehub_domain::id::{BookingId, UserId};
use drivehub_marketplace::router::build_router;
use drivehub_marketplace::state::{AppState, BaasSettings};
use drivehub_testing::auth::{MockSession, TEST_SESSION_SECRET};

/// Router over a state with no database and an unreachable BaaS. Only routes
/// that answer before touching either are exercised here.
fn server() -> TestServer {
    server_with_baas("http://127.0.0.1:9")
}

fn server_with_baas(baas_url: &str) -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        http: reqwest::Client::new(),
        baas: BaasSettings {
            url: baas_url.to_owned(),
            anon_key: "anon".to_owned(),
            service_key: "service".to_owned(),
            storage_bucket: "car-images".to_owned(),
        },
        session_secret: SessionSecret::new(TEST_SESSION_SECRET),
        cookie_domain: "drivehub.test".to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_and_fail_readiness_without_database() {
    let server = server();

    let live = server.get("/healthz").await;
    live.assert_status_ok();
    assert!(
        live.headers().contains_key("x-request-id"),
        "request id should be echoed"
    );

    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_propagate_caller_request_id() {
    let resp = server()
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-42"),
        )
        .await;
    assert_eq!(resp.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn should_redirect_anonymous_account_view_to_sign_in() {
    let resp = server().get("/account").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "UNAUTHORIZED");
    assert_eq!(body["redirect"], "/auth");
}

#[tokio::test]
async fn should_reject_expired_session() {
    let session = MockSession::expired(UserId::generate());
    let (name, value) = session.cookie_header();
    let resp = server().get("/account/bookings").add_header(name, value).await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["message"], "session expired");
}

#[tokio::test]
async fn should_require_session_for_admin_and_booking_routes() {
    let server = server();
    server
        .get("/admin/dashboard")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/bookings")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete(&format!("/account/bookings/{}", UserId::generate()))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_price_filter() {
    let resp = server().get("/cars?min-price=cheap").await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_FIELD");
}

#[tokio::test]
async fn should_send_unknown_car_id_back_to_search() {
    let resp = server().get("/cars/not-a-uuid").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "CAR_NOT_FOUND");
    assert_eq!(body["redirect"], "/search");
}

#[tokio::test]
async fn should_report_signed_out_session() {
    let resp = server().get("/auth/session").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["signed_in"], false);
    assert_eq!(body["is_admin"], false);
}

#[tokio::test]
async fn should_clear_cookies_on_sign_out_without_session() {
    let resp = server().delete("/auth/session").await;
    resp.assert_status(StatusCode::NO_CONTENT);
    let cleared: Vec<&str> = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert_eq!(cleared.len(), 2, "both session cookies should be cleared");
    assert!(
        cleared
            .iter()
            .any(|c| c.starts_with("drivehub_access_token=;") && c.contains("Max-Age=0")),
        "unexpected Set-Cookie headers: {cleared:?}"
    );
}

#[tokio::test]
async fn should_render_malformed_booking_body_as_json_error() {
    let session = MockSession::new();
    let (name, value) = session.bearer_header();
    let resp = server()
        .post("/bookings")
        .add_header(name, value)
        .json(&json!({
            "pickup_date": "tomorrow",
            "agreed_to_terms": true,
        }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_FIELD");
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("invalid request body")),
        "unexpected message: {}",
        body["message"]
    );
}

#[tokio::test]
async fn should_render_unknown_booking_status_as_json_error() {
    let session = MockSession::new();
    let (name, value) = session.bearer_header();
    let resp = server()
        .patch(&format!("/admin/bookings/{}/status", BookingId::generate()))
        .add_header(name, value)
        .json(&json!({ "status": "teleported" }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_FIELD");
}

/// Auth server stand-in whose password grant always succeeds for `user`.
async fn spawn_auth_server(user: Uuid) -> String {
    let app = Router::new().route(
        "/auth/v1/token",
        post(move || async move {
            Json(json!({
                "access_token": "stub-access",
                "refresh_token": "stub-refresh",
                "expires_in": 3600,
                "user": { "id": user, "email": "ana@example.com" },
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

#[tokio::test]
async fn should_answer_ok_and_set_cookies_on_sign_in() {
    let user = Uuid::new_v4();
    let baas_url = spawn_auth_server(user).await;

    let resp = server_with_baas(&baas_url)
        .post("/auth/sign-in")
        .json(&json!({ "email": "ana@example.com", "password": "secret" }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["user_id"], user.to_string());
    assert_eq!(body["expires_in"], 3600);
    let cookies: Vec<&str> = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with("drivehub_access_token=stub-access")),
        "unexpected Set-Cookie headers: {cookies:?}"
    );
}
