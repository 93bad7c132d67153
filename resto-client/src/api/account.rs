//! Account API (back office)
//!
//! 员工账号管理，以及员工代客人建档（用于代客下单）。

use shared::client::{ApiResponse, CreateGuestRequest, PageData, paths};
use shared::{Account, AccountListParams, Guest};

use crate::{ClientResult, HttpClient, RequestOptions};

#[derive(Debug, Clone)]
pub struct AccountApi {
    http: HttpClient,
}

impl AccountApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        params: &AccountListParams,
    ) -> ClientResult<ApiResponse<PageData<Account>>> {
        let resp = self
            .http
            .get(
                paths::backend::ACCOUNTS,
                RequestOptions::new().query(params.to_query()),
            )
            .await?;
        Ok(resp.payload)
    }

    /// Returns the deleted account
    pub async fn delete(&self, id: i64) -> ClientResult<ApiResponse<Account>> {
        let resp = self
            .http
            .delete(
                &format!("{}/{}", paths::backend::ACCOUNT_DETAIL, id),
                RequestOptions::new(),
            )
            .await?;
        Ok(resp.payload)
    }

    /// 员工为某桌创建客人，返回的 id 用于 [`OrderApi::create`](super::OrderApi::create)
    pub async fn create_guest(&self, body: &CreateGuestRequest) -> ClientResult<ApiResponse<Guest>> {
        let resp = self
            .http
            .post(paths::backend::GUESTS, body, RequestOptions::new())
            .await?;
        Ok(resp.payload)
    }
}
