// resto-edge/tests/auth_routes.rs
// 认证代理路由集成测试：mock 后端 + oneshot

mod common;

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use shared::{Role, TokenType, now_unix};

/// One request seen by the mock backend
#[derive(Debug, Clone)]
struct Call {
    path: &'static str,
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Backend {
    calls: Arc<Mutex<Vec<Call>>>,
    access_exp: i64,
    refresh_exp: i64,
}

impl Backend {
    fn new() -> Self {
        let now = now_unix();
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            access_exp: now + 900,
            refresh_exp: now + 86_400,
        }
    }

    fn record(&self, path: &'static str, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        self.calls.lock().unwrap().push(Call {
            path,
            authorization,
            body,
        });
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn pair(&self, role: Role) -> Value {
        json!({
            "accessToken": common::token(role, TokenType::AccessToken, self.access_exp),
            "refreshToken": common::token(role, TokenType::RefreshToken, self.refresh_exp),
        })
    }
}

async fn backend_login(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record("auth/login", &headers, body.clone());
    if body["password"] == "wrong" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "Validation error",
                "errors": [{ "field": "password", "message": "Wrong password" }]
            })),
        );
    }
    let mut data = backend.pair(Role::Owner);
    data["account"] = json!({ "id": 1, "name": "Owner", "role": "Owner", "email": body["email"] });
    (
        StatusCode::OK,
        Json(json!({ "message": "Login successful", "data": data })),
    )
}

async fn backend_guest_login(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record("guest/auth/login", &headers, body);
    Json(json!({ "message": "Welcome", "data": backend.pair(Role::Guest) }))
}

async fn backend_logout(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record("auth/logout", &headers, body);
    Json(json!({ "message": "Logged out" }))
}

async fn backend_guest_logout(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record("guest/auth/logout", &headers, body);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Database down" })),
    )
}

async fn backend_refresh(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record("auth/refresh-token", &headers, body.clone());
    if body["refreshToken"] == "revoked" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Refresh token revoked" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Refreshed", "data": backend.pair(Role::Employee) })),
    )
}

async fn start_backend() -> (Backend, String) {
    let backend = Backend::new();
    let router = Router::new()
        .route("/auth/login", post(backend_login))
        .route("/guest/auth/login", post(backend_guest_login))
        .route("/auth/logout", post(backend_logout))
        .route("/guest/auth/logout", post(backend_guest_logout))
        .route("/auth/refresh-token", post(backend_refresh))
        .with_state(backend.clone());
    let url = common::serve(router).await;
    (backend, url)
}

fn cookie<'a>(set_cookies: &'a [String], name: &str) -> Option<&'a str> {
    let prefix = format!("{}=", name);
    set_cookies
        .iter()
        .find(|c| c.starts_with(&prefix))
        .map(String::as_str)
}

#[tokio::test]
async fn test_login_mirrors_credentials_into_cookies() {
    let (backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let resp = common::send(
        &app,
        common::post_json(
            "/api/auth/login",
            &[],
            json!({ "email": "owner@resto.test", "password": "secret" }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookies = common::set_cookies(&resp);
    let access = cookie(&set_cookies, "accessToken").unwrap();
    let refresh = cookie(&set_cookies, "refreshToken").unwrap();
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("Path=/"));
    assert!(refresh.contains("Expires="));

    let body = common::json_body(resp).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["account"]["role"], "Owner");
    let access_token = body["data"]["accessToken"].as_str().unwrap();
    assert!(access.starts_with(&format!("accessToken={};", access_token)));

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "auth/login");
    assert_eq!(calls[0].body["email"], "owner@resto.test");
}

#[tokio::test]
async fn test_login_validation_error_passes_through() {
    let (_backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let resp = common::send(
        &app,
        common::post_json(
            "/api/auth/login",
            &[],
            json!({ "email": "owner@resto.test", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(common::set_cookies(&resp).is_empty());
    let body = common::json_body(resp).await;
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn test_guest_login_uses_guest_endpoint() {
    let (backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let resp = common::send(
        &app,
        common::post_json(
            "/api/guest/auth/login",
            &[],
            json!({ "name": "Lan", "token": "table-qr", "tableNumber": 4 }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(cookie(&common::set_cookies(&resp), "refreshToken").is_some());
    assert_eq!(backend.calls()[0].path, "guest/auth/login");
    assert_eq!(backend.calls()[0].body["tableNumber"], 4);
}

#[tokio::test]
async fn test_set_token_route() {
    let app = common::app(common::config("http://127.0.0.1:9"));
    let access = common::access_token(Role::Owner);
    let refresh = common::refresh_token(Role::Owner);

    let resp = common::send(
        &app,
        common::post_json(
            "/api/auth/token",
            &[],
            json!({ "accessToken": access, "refreshToken": refresh }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(common::set_cookies(&resp).len(), 2);

    let resp = common::send(
        &app,
        common::post_json(
            "/api/auth/token",
            &[],
            json!({ "accessToken": "garbage", "refreshToken": "garbage" }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_forwards_tokens_and_clears_cookies() {
    let (backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let resp = common::send(
        &app,
        common::post_json(
            "/api/auth/logout",
            &[("accessToken", "acc"), ("refreshToken", "ref")],
            json!({}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookies = common::set_cookies(&resp);
    assert!(cookie(&set_cookies, "accessToken").unwrap().contains("Max-Age=0"));
    assert!(cookie(&set_cookies, "refreshToken").unwrap().contains("Max-Age=0"));
    assert_eq!(common::json_body(resp).await["message"], "Logged out");

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "auth/logout");
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer acc"));
    assert_eq!(calls[0].body["refreshToken"], "ref");
}

#[tokio::test]
async fn test_logout_falls_back_to_header_and_body() {
    let (backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .header("content-type", "application/json")
        .header("authorization", "Bearer header-access")
        .body(axum::body::Body::from(
            json!({ "refreshToken": "body-refresh" }).to_string(),
        ))
        .unwrap();
    let resp = common::send(&app, request).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let calls = backend.calls();
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer header-access"));
    assert_eq!(calls[0].body["refreshToken"], "body-refresh");
}

#[tokio::test]
async fn test_guest_logout_without_tokens_skips_backend() {
    let (backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let resp = common::send(
        &app,
        common::post_json("/api/guest/auth/logout", &[("accessToken", "acc")], json!({})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    // Only cookies the browser actually sent get a removal cookie
    let set_cookies = common::set_cookies(&resp);
    assert_eq!(set_cookies.len(), 1);
    assert!(cookie(&set_cookies, "accessToken").unwrap().contains("Max-Age=0"));
    assert_eq!(
        common::json_body(resp).await["message"],
        "Not found access token or refresh token"
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_guest_logout_backend_failure_is_still_ok() {
    let (backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let resp = common::send(
        &app,
        common::post_json(
            "/api/guest/auth/logout",
            &[("accessToken", "acc"), ("refreshToken", "ref")],
            json!({}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(common::json_body(resp).await["message"], "An error occurred");
    assert_eq!(backend.calls()[0].path, "guest/auth/logout");
}

#[tokio::test]
async fn test_refresh_from_cookie_sets_new_cookies() {
    let (backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let resp = common::send(
        &app,
        common::post_json("/api/auth/refresh-token", &[("refreshToken", "old")], json!({})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookies = common::set_cookies(&resp);
    assert!(cookie(&set_cookies, "accessToken").is_some());
    assert!(cookie(&set_cookies, "refreshToken").is_some());
    assert_eq!(common::json_body(resp).await["message"], "Refreshed");
    assert_eq!(backend.calls()[0].body["refreshToken"], "old");
}

#[tokio::test]
async fn test_refresh_failures_are_401() {
    let (_backend, url) = start_backend().await;
    let app = common::app(common::config(&url));

    let resp = common::send(
        &app,
        common::post_json("/api/auth/refresh-token", &[], json!({})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        common::json_body(resp).await["message"],
        "Not found refresh token"
    );

    let resp = common::send(
        &app,
        common::post_json(
            "/api/auth/refresh-token",
            &[],
            json!({ "refreshToken": "revoked" }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(common::set_cookies(&resp).is_empty());
}
