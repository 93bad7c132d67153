//! Check-and-refresh routine
//!
//! 读取本地存储的凭证对：
//! - 任一缺失 → 跳过
//! - refresh token 已过期 → 清空存储并报错
//! - 强制刷新，或 access token 剩余寿命不足总寿命的 1/3 → 按角色调用刷新接口并持久化

use async_trait::async_trait;
use shared::{Role, TokenError, TokenPayload, decode_unverified, now_unix};
use thiserror::Error;

use crate::api::{AuthApi, GuestApi};
use crate::{ClientError, HttpClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No credential pair stored
    Skipped,
    /// Access token still has enough lifetime left
    Fresh,
    /// A new pair was obtained and persisted
    Refreshed,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Token exchange failed: {0}")]
    Exchange(#[from] ClientError),

    #[error("Client has no credential store")]
    NoStore,
}

/// Seam between the scheduler and the actual check
#[async_trait]
pub trait RefreshRoutine: Send + Sync {
    async fn check_and_refresh(&self, force: bool) -> Result<RefreshOutcome, RefreshError>;
}

/// Whether `access` should be renewed at `now`
pub fn needs_refresh(access: &TokenPayload, now: i64) -> bool {
    access.remaining_at(now) * 3 < access.lifetime()
}

/// Run one check against the client's credential store
pub async fn check_and_refresh_token(
    http: &HttpClient,
    force: bool,
) -> Result<RefreshOutcome, RefreshError> {
    let store = http.credential_store().ok_or(RefreshError::NoStore)?;
    let (Some(access_token), Some(refresh_token)) = (store.access_token(), store.refresh_token())
    else {
        return Ok(RefreshOutcome::Skipped);
    };

    let access = decode_unverified(&access_token)?;
    let refresh = decode_unverified(&refresh_token)?;
    let now = now_unix();

    if refresh.is_expired_at(now) {
        tracing::info!(user_id = refresh.user_id, "Refresh token expired, clearing credentials");
        store.remove_tokens();
        return Err(RefreshError::RefreshTokenExpired);
    }

    if !force && !needs_refresh(&access, now) {
        return Ok(RefreshOutcome::Fresh);
    }

    let response = match refresh.role {
        Role::Guest => GuestApi::new(http.clone()).refresh_token().await?,
        Role::Owner | Role::Employee => AuthApi::staff(http.clone()).refresh_token().await?,
    };
    store.set_credentials(&response.data);
    tracing::debug!(user_id = refresh.user_id, force, "Access token refreshed");
    Ok(RefreshOutcome::Refreshed)
}

/// [`RefreshRoutine`] backed by an [`HttpClient`]'s storage
#[derive(Debug, Clone)]
pub struct TokenChecker {
    http: HttpClient,
}

impl TokenChecker {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RefreshRoutine for TokenChecker {
    async fn check_and_refresh(&self, force: bool) -> Result<RefreshOutcome, RefreshError> {
        check_and_refresh_token(&self.http, force).await
    }
}
