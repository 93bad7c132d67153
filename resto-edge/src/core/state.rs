//! 共享状态

use std::sync::Arc;

use resto_client::api::{AuthApi, GuestApi};
use resto_client::{ClientConfig, HttpClient};

use super::{Config, EdgeResult};

/// 路由共享状态
///
/// 克隆开销小：配置和后端客户端都在 `Arc` 后面。
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    backend: HttpClient,
}

impl AppState {
    pub fn new(config: Config) -> EdgeResult<Self> {
        let client_config = ClientConfig::new(
            config.backend_api_url.clone(),
            format!("http://127.0.0.1:{}", config.http_port),
        )
        .with_locale(config.default_locale)
        .with_timeout(config.request_timeout_secs);
        // 服务端上下文：没有本地存储，401 转成跳转
        let backend = HttpClient::server(client_config)?;
        Ok(Self {
            config: Arc::new(config),
            backend,
        })
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::staff(self.backend.clone())
    }

    pub fn guest(&self) -> GuestApi {
        GuestApi::new(self.backend.clone())
    }
}
