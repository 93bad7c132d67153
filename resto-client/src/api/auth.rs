//! Authentication API
//!
//! Interactive clients talk to the edge server (which mirrors credentials
//! into cookies); the edge server's own handlers use the `s_*` methods to
//! reach the backend directly.

use serde::Serialize;
use shared::CredentialPair;
use shared::client::{
    ApiResponse, LoginData, LogoutRequest, MessageResponse, RefreshTokenRequest, paths,
};

use crate::{ClientResult, HttpClient, HttpResponse, RequestOptions};

/// Staff accounts (Owner / Employee) or table guests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Staff,
    Guest,
}

impl AuthKind {
    fn login_path(&self) -> &'static str {
        match self {
            Self::Staff => paths::LOGIN,
            Self::Guest => paths::GUEST_LOGIN,
        }
    }

    fn logout_path(&self) -> &'static str {
        match self {
            Self::Staff => paths::LOGOUT,
            Self::Guest => paths::GUEST_LOGOUT,
        }
    }

    fn refresh_path(&self) -> &'static str {
        match self {
            Self::Staff => paths::REFRESH_TOKEN,
            Self::Guest => paths::GUEST_REFRESH_TOKEN,
        }
    }

    fn backend_login_path(&self) -> &'static str {
        match self {
            Self::Staff => paths::backend::LOGIN,
            Self::Guest => paths::backend::GUEST_LOGIN,
        }
    }

    fn backend_logout_path(&self) -> &'static str {
        match self {
            Self::Staff => paths::backend::LOGOUT,
            Self::Guest => paths::backend::GUEST_LOGOUT,
        }
    }

    fn backend_refresh_path(&self) -> &'static str {
        match self {
            Self::Staff => paths::backend::REFRESH_TOKEN,
            Self::Guest => paths::backend::GUEST_REFRESH_TOKEN,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
    kind: AuthKind,
}

impl AuthApi {
    pub fn staff(http: HttpClient) -> Self {
        Self {
            http,
            kind: AuthKind::Staff,
        }
    }

    pub(crate) fn guest(http: HttpClient) -> Self {
        Self {
            http,
            kind: AuthKind::Guest,
        }
    }

    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    fn app(&self) -> RequestOptions {
        RequestOptions::new().base_url(self.http.app_url())
    }

    // ========== Client → edge ==========

    /// Log in; the interceptor persists the returned pair
    pub async fn login<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> ClientResult<ApiResponse<LoginData>> {
        let resp = self
            .http
            .post(self.kind.login_path(), body, self.app())
            .await?;
        Ok(resp.payload)
    }

    /// Hand an externally obtained pair to the edge (cookie mirror + storage)
    pub async fn set_token(&self, pair: &CredentialPair) -> ClientResult<CredentialPair> {
        let resp = self.http.post(paths::TOKEN, pair, self.app()).await?;
        Ok(resp.payload)
    }

    /// Log out; the interceptor clears storage on success
    pub async fn logout(&self) -> ClientResult<MessageResponse> {
        let refresh_token = self
            .http
            .credential_store()
            .and_then(|store| store.refresh_token());
        let options = match refresh_token {
            Some(refresh_token) => self.app().json(&LogoutRequest { refresh_token })?,
            None => self.app(),
        };
        let resp = self
            .http
            .request(reqwest::Method::POST, self.kind.logout_path(), options)
            .await?;
        Ok(resp.payload)
    }

    /// Exchange the stored refresh token for a new pair (not persisted here)
    pub async fn refresh_token(&self) -> ClientResult<ApiResponse<CredentialPair>> {
        let body = RefreshTokenRequest {
            refresh_token: self
                .http
                .credential_store()
                .and_then(|store| store.refresh_token()),
        };
        let resp = self
            .http
            .post(self.kind.refresh_path(), &body, self.app())
            .await?;
        Ok(resp.payload)
    }

    // ========== Edge → backend ==========

    pub async fn s_login<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> ClientResult<HttpResponse<ApiResponse<LoginData>>> {
        self.http
            .post(self.kind.backend_login_path(), body, RequestOptions::new())
            .await
    }

    pub async fn s_logout(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> ClientResult<HttpResponse<MessageResponse>> {
        let body = LogoutRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.http
            .post(
                self.kind.backend_logout_path(),
                &body,
                RequestOptions::new().bearer(access_token)?,
            )
            .await
    }

    pub async fn s_refresh_token(
        &self,
        refresh_token: &str,
    ) -> ClientResult<HttpResponse<ApiResponse<CredentialPair>>> {
        let body = RefreshTokenRequest {
            refresh_token: Some(refresh_token.to_string()),
        };
        self.http
            .post(self.kind.backend_refresh_path(), &body, RequestOptions::new())
            .await
    }
}
