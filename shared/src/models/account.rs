//! Account Model
//!
//! 员工账号（Owner / Employee）和由员工代建的桌台客人。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Role, SortOrder};

/// 后台账号列表默认页大小
pub const ACCOUNT_PAGE_SIZE: u32 = 10;

/// Staff account as listed in the back office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Table guest created by staff or by a QR login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: i64,
    pub name: String,
    /// `None` once the table has been deleted
    pub table_number: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account list query; the backend only sorts by name
#[derive(Debug, Clone, PartialEq)]
pub struct AccountListParams {
    pub page: u32,
    pub limit: u32,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
}

impl Default for AccountListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: ACCOUNT_PAGE_SIZE,
            sort_order: None,
            search: None,
        }
    }
}

impl AccountListParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(order) = self.sort_order {
            query.push(("sortBy".to_string(), "name".to_string()));
            query.push(("sortOrder".to_string(), order.as_str().to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.push(("search".to_string(), search.to_string()));
        }
        query
    }
}
