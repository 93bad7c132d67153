//! Client-related types shared between server and client
//!
//! Endpoint paths and request/response bodies used by `resto-client`
//! and the cookie-mirroring routes of `resto-edge`.

use serde::{Deserialize, Serialize};

use crate::models::{CredentialPair, Role};

/// Endpoint paths, normalized (no leading slash)
pub mod paths {
    // ========== Edge (app) routes ==========
    pub const LOGIN: &str = "api/auth/login";
    pub const GUEST_LOGIN: &str = "api/guest/auth/login";
    pub const TOKEN: &str = "api/auth/token";
    pub const LOGOUT: &str = "api/auth/logout";
    pub const GUEST_LOGOUT: &str = "api/guest/auth/logout";
    pub const REFRESH_TOKEN: &str = "api/auth/refresh-token";
    pub const GUEST_REFRESH_TOKEN: &str = "api/guest/auth/refresh-token";

    /// Successful responses carry `{ data: { accessToken, refreshToken } }` to persist
    pub const CREDENTIAL_PERSIST_PATHS: [&str; 2] = [LOGIN, GUEST_LOGIN];
    /// Successful responses carry a bare `{ accessToken, refreshToken }` to persist
    pub const CREDENTIAL_EXCHANGE_PATHS: [&str; 1] = [TOKEN];
    /// Successful responses mean local credentials must be dropped
    pub const CREDENTIAL_CLEAR_PATHS: [&str; 2] = [LOGOUT, GUEST_LOGOUT];

    // ========== Backend routes ==========
    pub mod backend {
        pub const LOGIN: &str = "auth/login";
        pub const LOGOUT: &str = "auth/logout";
        pub const REFRESH_TOKEN: &str = "auth/refresh-token";
        pub const GUEST_LOGIN: &str = "guest/auth/login";
        pub const GUEST_LOGOUT: &str = "guest/auth/logout";
        pub const GUEST_REFRESH_TOKEN: &str = "guest/auth/refresh-token";
        pub const ACCOUNTS: &str = "accounts";
        pub const ACCOUNT_DETAIL: &str = "accounts/detail";
        pub const GUESTS: &str = "accounts/guests";
        pub const DISHES: &str = "dishes";
        pub const ORDERS: &str = "orders";
        pub const GUEST_ORDERS: &str = "guest/orders";
        pub const MEDIA_UPLOAD: &str = "media/upload";
    }
}

/// Strip leading slashes so `"/api/auth/login"` and `"api/auth/login"` compare equal
pub fn normalize_path(path: &str) -> &str {
    path.trim_start_matches('/')
}

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Staff login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Guest login request (table QR token + display name)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestLoginRequest {
    pub name: String,
    pub token: String,
    pub table_number: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Account summary returned on login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: i64,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub email: Option<String>,
}

/// Login response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub account: Option<AccountInfo>,
}

impl LoginData {
    pub fn credentials(&self) -> CredentialPair {
        CredentialPair::new(&self.access_token, &self.refresh_token)
    }
}

// =============================================================================
// Back office DTOs
// =============================================================================

/// Staff-side guest creation (no table token needed)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestRequest {
    pub name: String,
    pub table_number: i64,
}

/// One order line: dish and quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub dish_id: i64,
    pub quantity: i32,
}

/// Staff places orders on behalf of a guest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub guest_id: i64,
    pub orders: Vec<OrderItem>,
}

/// Standard `{ data, message }` envelope used by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
}

/// Body-less `{ message }` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Paginated list (dishes, accounts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total_item: u64,
    pub total_page: u32,
    pub limit: u32,
    pub page: u32,
}
