//! Client error types

use reqwest::StatusCode;
use shared::{EntityErrorPayload, TokenError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 422 with per-field validation messages
    #[error("Entity Error: {}", .payload.message)]
    Entity { payload: EntityErrorPayload },

    /// Any other non-2xx status
    #[error("HTTP Error ({status})")]
    Http {
        status: StatusCode,
        payload: serde_json::Value,
    },

    /// 401 in a browser context: the session was logged out and the
    /// navigator was sent to `location`
    #[error("Session ended, navigated to {location}")]
    LoggedOut { location: String },

    /// 401 in a server context: the caller must answer with a redirect
    #[error("Redirect to {location}")]
    Redirect { location: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl ClientError {
    /// HTTP status carried by the error, if it came from a response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Entity { .. } => Some(StatusCode::UNPROCESSABLE_ENTITY),
            Self::Http { status, .. } => Some(*status),
            Self::LoggedOut { .. } | Self::Redirect { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// `message` field of the response payload, for toast-style display
    pub fn payload_message(&self) -> Option<&str> {
        match self {
            Self::Entity { payload } => Some(payload.message.as_str()),
            Self::Http { payload, .. } => payload.get("message").and_then(|m| m.as_str()),
            _ => None,
        }
    }

    /// Authentication failure already turned into a navigation or redirect
    pub fn is_auth_redirect(&self) -> bool {
        matches!(self, Self::LoggedOut { .. } | Self::Redirect { .. })
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
