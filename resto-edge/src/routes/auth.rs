//! 认证代理路由
//!
//! 转发到后端，并把凭证对镜像到 `accessToken` / `refreshToken` cookie，
//! 让守卫在前端代码执行前就能看到登录状态。
//!
//! | 路由 | 说明 |
//! |------|------|
//! | POST `/api/auth/login` | 员工登录 |
//! | POST `/api/guest/auth/login` | 客人登录 |
//! | POST `/api/auth/token` | 直接写入一对凭证 |
//! | POST `/api/auth/logout` | 员工登出（总是 200） |
//! | POST `/api/guest/auth/logout` | 客人登出（总是 200） |
//! | POST `/api/auth/refresh-token` | 员工刷新 |
//! | POST `/api/guest/auth/refresh-token` | 客人刷新 |
//!
//! 登出和刷新优先读 cookie；非浏览器客户端没有 cookie，
//! 退回到请求体中的 `refreshToken` 和 `Authorization` 头。

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;
use shared::CredentialPair;
use shared::client::{
    ApiResponse, GuestLoginRequest, LoginData, LoginRequest, MessageResponse, RefreshTokenRequest,
};

use crate::core::{AppState, EdgeError, EdgeResult};
use crate::utils::cookies;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/guest/auth/login", post(guest_login))
        .route("/api/auth/token", post(set_token))
        .route("/api/auth/logout", post(logout))
        .route("/api/guest/auth/logout", post(guest_logout))
        .route("/api/auth/refresh-token", post(refresh_token))
        .route("/api/guest/auth/refresh-token", post(guest_refresh_token))
}

#[derive(Debug, Clone, Copy)]
enum Audience {
    Staff,
    Guest,
}

type CredentialResponse<T> = EdgeResult<(CookieJar, Json<ApiResponse<T>>)>;

// ========== Login ==========

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> CredentialResponse<LoginData> {
    let resp = state.auth().s_login(&body).await?;
    let jar = cookies::set_credentials(
        jar,
        &resp.payload.data.credentials(),
        state.config.cookie_secure,
    )?;
    tracing::info!(email = %body.email, "Staff logged in");
    Ok((jar, Json(resp.payload)))
}

async fn guest_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<GuestLoginRequest>,
) -> CredentialResponse<LoginData> {
    let resp = state.guest().s_login(&body).await?;
    let jar = cookies::set_credentials(
        jar,
        &resp.payload.data.credentials(),
        state.config.cookie_secure,
    )?;
    tracing::info!(table = body.table_number, "Guest logged in");
    Ok((jar, Json(resp.payload)))
}

/// Store a pair obtained elsewhere (e.g. the OAuth landing page)
async fn set_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(pair): Json<CredentialPair>,
) -> EdgeResult<(CookieJar, Json<CredentialPair>)> {
    let jar = cookies::set_credentials(jar, &pair, state.config.cookie_secure)?;
    Ok((jar, Json(pair)))
}

// ========== Logout ==========

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Bytes,
) -> (CookieJar, Json<MessageResponse>) {
    end_session(Audience::Staff, &state, jar, &headers, &body).await
}

async fn guest_logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Bytes,
) -> (CookieJar, Json<MessageResponse>) {
    end_session(Audience::Guest, &state, jar, &headers, &body).await
}

/// Cookies are always deleted; the backend is only told when both tokens are known
async fn end_session(
    audience: Audience,
    state: &AppState,
    jar: CookieJar,
    headers: &HeaderMap,
    body: &[u8],
) -> (CookieJar, Json<MessageResponse>) {
    let access_token = cookies::get(&jar, cookies::ACCESS_TOKEN)
        .map(str::to_string)
        .or_else(|| bearer(headers));
    let refresh_token = cookies::get(&jar, cookies::REFRESH_TOKEN)
        .map(str::to_string)
        .or_else(|| body_refresh_token(body));
    let jar = cookies::clear_credentials(jar);

    let (Some(access_token), Some(refresh_token)) = (access_token, refresh_token) else {
        return (
            jar,
            Json(MessageResponse::new("Not found access token or refresh token")),
        );
    };

    let result = match audience {
        Audience::Staff => state.auth().s_logout(&access_token, &refresh_token).await,
        Audience::Guest => state.guest().s_logout(&access_token, &refresh_token).await,
    };
    match result {
        Ok(resp) => (jar, Json(resp.payload)),
        Err(e) => {
            tracing::warn!(error = %e, ?audience, "Backend logout failed");
            (jar, Json(MessageResponse::new("An error occurred")))
        }
    }
}

// ========== Refresh ==========

async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> CredentialResponse<CredentialPair> {
    refresh(Audience::Staff, &state, jar, &body).await
}

async fn guest_refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> CredentialResponse<CredentialPair> {
    refresh(Audience::Guest, &state, jar, &body).await
}

async fn refresh(
    audience: Audience,
    state: &AppState,
    jar: CookieJar,
    body: &[u8],
) -> CredentialResponse<CredentialPair> {
    let refresh_token = cookies::get(&jar, cookies::REFRESH_TOKEN)
        .map(str::to_string)
        .or_else(|| body_refresh_token(body))
        .ok_or_else(|| EdgeError::unauthorized("Not found refresh token"))?;

    let result = match audience {
        Audience::Staff => state.auth().s_refresh_token(&refresh_token).await,
        Audience::Guest => state.guest().s_refresh_token(&refresh_token).await,
    };
    let resp = result.map_err(|e| {
        tracing::warn!(error = %e, ?audience, "Token refresh rejected");
        EdgeError::unauthorized(e.payload_message().unwrap_or("An error occurred"))
    })?;

    let jar = cookies::set_credentials(jar, &resp.payload.data, state.config.cookie_secure)?;
    Ok((jar, Json(resp.payload)))
}

// ========== Helpers ==========

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// `refreshToken` from a JSON body; an empty or non-JSON body yields `None`
fn body_refresh_token(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<RefreshTokenRequest>(body)
        .ok()
        .and_then(|req| req.refresh_token)
        .filter(|t| !t.is_empty())
}
