// resto-edge/tests/common/mod.rs
// 测试公共工具

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header};
use jsonwebtoken::{EncodingKey, Header, encode};
use resto_edge::{AppState, Config, build_router};
use shared::{Locale, Role, TokenPayload, TokenType, now_unix};
use tower::ServiceExt;

pub fn token(role: Role, token_type: TokenType, exp: i64) -> String {
    let payload = TokenPayload {
        user_id: 9,
        role,
        token_type,
        exp,
        iat: exp - 900,
    };
    encode(&Header::default(), &payload, &EncodingKey::from_secret(b"backend")).unwrap()
}

pub fn refresh_token(role: Role) -> String {
    token(role, TokenType::RefreshToken, now_unix() + 86_400)
}

pub fn access_token(role: Role) -> String {
    token(role, TokenType::AccessToken, now_unix() + 900)
}

pub fn config(backend_api_url: &str) -> Config {
    Config {
        http_port: 0,
        backend_api_url: backend_api_url.to_string(),
        default_locale: Locale::En,
        static_dir: None,
        environment: "test".into(),
        log_level: "info".into(),
        log_dir: None,
        cookie_secure: false,
        request_timeout_secs: 5,
    }
}

pub fn app(config: Config) -> Router {
    build_router(AppState::new(config).unwrap())
}

/// Serve `router` on an ephemeral port; returns its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str, cookies: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookie_header(cookies));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookies: &[(&str, &str)], body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookie_header(cookies));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn cookie_header(cookies: &[(&str, &str)]) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
