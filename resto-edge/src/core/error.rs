//! 错误处理
//!
//! [`EdgeError`] 直接实现 [`IntoResponse`]，响应体统一为 `{ "message": ... }`，
//! 后端返回的错误按原状态码和原响应体透传。

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use resto_client::ClientError;
use serde_json::json;

pub type EdgeResult<T> = Result<T, EdgeError>;

#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    /// 401
    #[error("{0}")]
    Unauthorized(String),

    /// 400
    #[error("{0}")]
    BadRequest(String),

    /// 后端调用失败
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 500
    #[error("{0}")]
    Internal(String),
}

impl EdgeError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized(msg) => message(StatusCode::UNAUTHORIZED, &msg),
            Self::BadRequest(msg) => message(StatusCode::BAD_REQUEST, &msg),
            Self::Client(ClientError::Entity { payload }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
            }
            Self::Client(ClientError::Http { status, payload }) => {
                (status, Json(payload)).into_response()
            }
            // 服务端上下文的 401：保留登录跳转目标，由调用方决定是否跟随
            Self::Client(ClientError::Redirect { location }) => (
                StatusCode::UNAUTHORIZED,
                [(header::LOCATION, location)],
                Json(json!({ "message": "Unauthorized" })),
            )
                .into_response(),
            Self::Client(ClientError::LoggedOut { .. }) => {
                message(StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            Self::Client(e) => {
                tracing::error!(error = %e, "Backend call failed");
                message(StatusCode::INTERNAL_SERVER_ERROR, "An error occurred")
            }
            Self::Io(e) => {
                tracing::error!(error = %e, "I/O error");
                message(StatusCode::INTERNAL_SERVER_ERROR, "An error occurred")
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                message(StatusCode::INTERNAL_SERVER_ERROR, "An error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{EntityErrorPayload, FieldError};

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            EdgeError::unauthorized("x").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            EdgeError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        let entity = EdgeError::from(ClientError::Entity {
            payload: EntityErrorPayload {
                message: "Validation error".into(),
                errors: vec![FieldError::new("email", "Invalid")],
            },
        });
        assert_eq!(
            entity.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let upstream = EdgeError::from(ClientError::Http {
            status: StatusCode::CONFLICT,
            payload: json!({ "message": "Taken" }),
        });
        assert_eq!(upstream.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_backend_401_keeps_login_target() {
        let redirect = EdgeError::from(ClientError::Redirect {
            location: "/en/login?accessToken=stale".into(),
        });
        let resp = redirect.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/en/login?accessToken=stale")
        );
    }
}
