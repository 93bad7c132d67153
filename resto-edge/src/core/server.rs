//! Server Implementation
//!
//! HTTP 服务器启动和管理

use tokio::net::TcpListener;

use super::{AppState, Config, EdgeResult};
use crate::routes::build_router;

/// HTTP Server
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    pub fn new(config: Config) -> EdgeResult<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run(&self) -> EdgeResult<()> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Resto edge server listening on {}", addr);

        let app = build_router(self.state.clone());
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
