//! Guest API
//!
//! Table guests authenticate with a table QR token instead of a password
//! and can only place and read their own orders.

use shared::client::{ApiResponse, GuestLoginRequest, LoginData, MessageResponse, OrderItem, paths};
use shared::{CredentialPair, Order};

use super::AuthApi;
use crate::{ClientResult, HttpClient, HttpResponse, RequestOptions};

#[derive(Debug, Clone)]
pub struct GuestApi {
    http: HttpClient,
    auth: AuthApi,
}

impl GuestApi {
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: AuthApi::guest(http.clone()),
            http,
        }
    }

    pub async fn login(&self, body: &GuestLoginRequest) -> ClientResult<ApiResponse<LoginData>> {
        self.auth.login(body).await
    }

    pub async fn logout(&self) -> ClientResult<MessageResponse> {
        self.auth.logout().await
    }

    pub async fn refresh_token(&self) -> ClientResult<ApiResponse<CredentialPair>> {
        self.auth.refresh_token().await
    }

    pub async fn s_login(
        &self,
        body: &GuestLoginRequest,
    ) -> ClientResult<HttpResponse<ApiResponse<LoginData>>> {
        self.auth.s_login(body).await
    }

    pub async fn s_logout(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> ClientResult<HttpResponse<MessageResponse>> {
        self.auth.s_logout(access_token, refresh_token).await
    }

    pub async fn s_refresh_token(
        &self,
        refresh_token: &str,
    ) -> ClientResult<HttpResponse<ApiResponse<CredentialPair>>> {
        self.auth.s_refresh_token(refresh_token).await
    }

    /// 下单
    pub async fn order(&self, items: &[OrderItem]) -> ClientResult<ApiResponse<Vec<Order>>> {
        let resp = self
            .http
            .post(paths::backend::GUEST_ORDERS, items, RequestOptions::new())
            .await?;
        Ok(resp.payload)
    }

    /// 当前客人的订单
    pub async fn orders(&self) -> ClientResult<ApiResponse<Vec<Order>>> {
        let resp = self
            .http
            .get(paths::backend::GUEST_ORDERS, RequestOptions::new())
            .await?;
        Ok(resp.payload)
    }
}
