//! HTTP 路由
//!
//! | 路径 | 说明 |
//! |------|------|
//! | `/health` | 健康检查 |
//! | `/api/auth/*`, `/api/guest/auth/*` | 认证代理，凭证镜像到 cookie |
//! | 其他 | 前端静态文件（SPA 回退到 `index.html`） |
//!
//! 所有请求先经过 [`edge_guard`]。

pub mod auth;
pub mod health;

use std::path::Path;

use axum::{Json, Router, http::StatusCode, middleware, response::IntoResponse};
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::core::AppState;
use crate::guard::edge_guard;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new().merge(health::router()).merge(auth::router());

    let router = match &state.config.static_dir {
        Some(dir) => {
            let index = Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => router.fallback(not_found),
    };

    router
        .layer(middleware::from_fn_with_state(state.clone(), edge_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}
