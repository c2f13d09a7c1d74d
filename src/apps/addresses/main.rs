//! Geo-addresses server main entry point
//! Geo-addresses 服务器主入口点

use clap::Parser;
use geo_addresses::addresses::config::{AppConfig, CliArgs};
use geo_addresses::addresses::gateway::GatewayState;
use geo_addresses::addresses::http_gateway::HttpGateway;
use geo_addresses::addresses::repository::KvAddressRepository;
use geo_addresses::config::init_tracing;
use geo_addresses::storage::{create_kv_store_from_config, KvStoreConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments / 解析命令行参数
    let args = CliArgs::parse();

    // Store args for logging before they are consumed / 在参数被使用前保存用于日志记录
    let log_args = format!("{:?}", args);

    // Load configuration: defaults, file, env, then CLI / 加载配置：默认值、文件、环境变量、命令行
    let config = AppConfig::load_with_cli(&args)?;

    // Initialize logging with configuration / 使用配置初始化日志
    init_tracing(&config.log.to_logging_config())?;

    tracing::info!("Starting geo-addresses server with args: {}", log_args);
    tracing::info!("  - HTTP server on: {}", config.http.addr);
    tracing::info!("  - Storage backend: {}", config.storage.backend);
    tracing::info!("  - Storage path: {}", config.storage.path);
    tracing::info!(
        "  - Label length: {}..={}",
        config.validation.min_label_length,
        config.validation.max_label_length
    );

    // Open the datastore / 打开数据存储
    let kv_config = KvStoreConfig::from_storage_config(&config.storage);
    let store = create_kv_store_from_config(&kv_config).await?;
    let repository = KvAddressRepository::new(store);
    let state = GatewayState::new(Arc::new(repository), config.validation);

    // Start HTTP gateway / 启动HTTP网关
    let gateway = HttpGateway::new(config.http.clone(), state);
    let cancel_token = gateway.cancel_token();
    let mut http_handle = tokio::spawn(gateway.start());

    tracing::info!("Geo-addresses server started: http://{}", config.http.addr);

    // Wait for shutdown signal or an early server exit / 等待关闭信号或服务器提前退出
    tokio::select! {
        result = &mut http_handle => {
            result??;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Geo-addresses server shutting down");

            // Graceful shutdown / 优雅关闭
            cancel_token.cancel();
            http_handle.await??;
        }
    }

    Ok(())
}
