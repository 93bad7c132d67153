// resto-client/tests/common/mod.rs
// 测试公共工具：签发测试 token、启动 mock 后端

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use jsonwebtoken::{EncodingKey, Header, encode};
use resto_client::{ChannelNavigator, ClientConfig, CredentialStore, HttpClient, MemoryCredentialStore};
use shared::{CredentialPair, Role, TokenPayload, TokenType, now_unix};
use tokio::sync::mpsc::UnboundedReceiver;

pub const SECRET: &[u8] = b"backend-secret";

pub fn token(role: Role, token_type: TokenType, iat: i64, exp: i64) -> String {
    let payload = TokenPayload {
        user_id: 42,
        role,
        token_type,
        exp,
        iat,
    };
    encode(&Header::default(), &payload, &EncodingKey::from_secret(SECRET)).unwrap()
}

/// Access token with `remaining` of `lifetime` seconds left
pub fn access_token(role: Role, lifetime: i64, remaining: i64) -> String {
    let now = now_unix();
    let exp = now + remaining;
    token(role, TokenType::AccessToken, exp - lifetime, exp)
}

/// Refresh token expiring `remaining` seconds from now
pub fn refresh_token(role: Role, remaining: i64) -> String {
    let now = now_unix();
    token(role, TokenType::RefreshToken, now - 60, now + remaining)
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

pub struct BrowserFixture {
    pub http: HttpClient,
    pub store: Arc<MemoryCredentialStore>,
    pub navigations: UnboundedReceiver<String>,
}

/// Browser-context client whose API and app URLs both point at `base_url`
pub fn browser(base_url: &str) -> BrowserFixture {
    browser_with_store(base_url, MemoryCredentialStore::new())
}

/// Same as [`browser`], already holding `pair`
pub fn signed_in(base_url: &str, pair: &CredentialPair) -> BrowserFixture {
    browser_with_store(base_url, MemoryCredentialStore::with_credentials(pair))
}

fn browser_with_store(base_url: &str, store: MemoryCredentialStore) -> BrowserFixture {
    let store = Arc::new(store);
    let (navigator, navigations) = ChannelNavigator::new();
    let config = ClientConfig::new(base_url, base_url).with_timeout(5);
    let http = HttpClient::browser(
        config,
        store.clone() as Arc<dyn CredentialStore>,
        Arc::new(navigator),
    )
    .unwrap();
    BrowserFixture {
        http,
        store,
        navigations,
    }
}

/// Drain every navigation received so far
pub fn drain(navigations: &mut UnboundedReceiver<String>) -> Vec<String> {
    let mut hrefs = Vec::new();
    while let Ok(href) = navigations.try_recv() {
        hrefs.push(href);
    }
    hrefs
}
