//! Token payload and credential pair

use serde::{Deserialize, Serialize};

use super::Role;

/// Which of the two credentials a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    AccessToken,
    RefreshToken,
}

/// Decoded (unverified) token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub user_id: i64,
    pub role: Role,
    pub token_type: TokenType,
    /// Expiry, unix seconds
    pub exp: i64,
    /// Issued at, unix seconds
    pub iat: i64,
}

impl TokenPayload {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Seconds until expiry (negative once expired)
    pub fn remaining_at(&self, now: i64) -> i64 {
        self.exp - now
    }

    /// Total lifetime the issuer granted this token
    pub fn lifetime(&self) -> i64 {
        self.exp - self.iat
    }
}

/// Access + refresh credential pair, replaced wholesale on every exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}
