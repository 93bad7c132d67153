use resto_edge::{Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment();

    tracing::info!(
        environment = %config.environment,
        backend = %config.backend_api_url,
        "Resto edge server starting..."
    );

    // 2. 启动 HTTP 服务器
    let server = Server::new(config)?;
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
