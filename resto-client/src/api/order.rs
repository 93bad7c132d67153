//! Order API

use chrono::{DateTime, Utc};
use shared::Order;
use shared::client::{ApiResponse, CreateOrderRequest, OrderItem, paths};

use crate::{ClientResult, HttpClient, RequestOptions};

/// Optional creation-time window
#[derive(Debug, Clone, Default)]
pub struct OrderListParams {
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

impl OrderListParams {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(from) = self.from_date {
            query.push(("fromDate".to_string(), from.to_rfc3339()));
        }
        if let Some(to) = self.to_date {
            query.push(("toDate".to_string(), to.to_rfc3339()));
        }
        query
    }
}

#[derive(Debug, Clone)]
pub struct OrderApi {
    http: HttpClient,
}

impl OrderApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, params: &OrderListParams) -> ClientResult<ApiResponse<Vec<Order>>> {
        let resp = self
            .http
            .get(
                paths::backend::ORDERS,
                RequestOptions::new().query(params.to_query()),
            )
            .await?;
        Ok(resp.payload)
    }

    /// Place orders on behalf of an existing guest
    pub async fn create(
        &self,
        guest_id: i64,
        items: &[OrderItem],
    ) -> ClientResult<ApiResponse<Vec<Order>>> {
        let body = CreateOrderRequest {
            guest_id,
            orders: items.to_vec(),
        };
        let resp = self
            .http
            .post(paths::backend::ORDERS, &body, RequestOptions::new())
            .await?;
        Ok(resp.payload)
    }
}
