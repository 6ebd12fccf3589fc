//! LingoCache - 内容缓存网关
//!
//! 启动流程：加载配置 -> 初始化日志 -> 构造缓存 -> 启动 HTTP 服务

use lingocache::config::{load_config, print_config};
use lingocache::infrastructure::build_caches;
use lingocache::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},lingocache={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("LingoCache - 内容缓存网关");
    print_config(&config);

    // 构造三种内容缓存（创建缓存目录）
    let caches = build_caches(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize caches: {}", e))?;

    match caches.total_size_bytes().await {
        Ok(bytes) => tracing::info!(total_size_bytes = bytes, "Existing cache loaded"),
        Err(e) => tracing::warn!(error = %e, "Failed to measure existing cache"),
    }

    let server = HttpServer::new(config.server.clone(), AppState::new(caches));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
