//! Configuration management shared by the service binaries
//! 服务二进制共享的配置管理
//!
//! Configuration is layered from several sources (see
//! `addresses::config::AppConfig::load_with_cli`):
//! - Built-in defaults / 内置默认值
//! - Configuration files (TOML) / 配置文件（TOML）
//! - Environment variables / 环境变量
//! - Command line arguments / 命令行参数
//!
//! This module holds the pieces shared by all of them, plus tracing setup.
//! 本模块包含通用部分以及日志跟踪的初始化。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Base configuration structures / 基础配置结构
pub mod base;
pub use crate::storage::kv::KvStoreConfig;
pub use base::*;

/// Common logging configuration / 通用日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) / 日志级别
    pub level: String,
    /// Log format (json, compact, pretty) / 日志格式
    pub format: String,
    /// Enable file logging / 启用文件日志
    pub file_enabled: bool,
    /// Log file path / 日志文件路径
    pub file_path: Option<PathBuf>,
}

static FILE_LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_enabled: false,
            file_path: None,
        }
    }
}

/// Open the log file and wrap it in a non-blocking writer
/// 打开日志文件并包装为非阻塞写入器
fn open_file_writer(
    config: &LoggingConfig,
) -> Result<Option<tracing_appender::non_blocking::NonBlocking>> {
    if !config.file_enabled {
        return Ok(None);
    }
    let Some(path) = config.file_path.as_ref() else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create log dir: {}", parent.display()))?;
        }
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file: {}", path.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);
    let _ = FILE_LOG_GUARD.set(guard);
    Ok(Some(file_writer))
}

/// Initialize tracing based on logging configuration
/// 基于日志配置初始化跟踪
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.level.trim().is_empty() {
            EnvFilter::new("info")
        } else {
            EnvFilter::new(config.level.clone())
        }
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    let file_writer = open_file_writer(config)?;

    match (config.format.as_str(), file_writer) {
        ("json", Some(file_writer)) => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_level(true);
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_writer(file_writer);
            registry.with(stdout_layer).with(file_layer).try_init()?;
        }
        ("compact", Some(file_writer)) => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true);
            let file_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(file_writer);
            registry.with(stdout_layer).with(file_layer).try_init()?;
        }
        (_, Some(file_writer)) => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_level(true);
            let file_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(file_writer);
            registry.with(stdout_layer).with(file_layer).try_init()?;
        }
        ("json", None) => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_level(true);
            registry.with(stdout_layer).try_init()?;
        }
        ("compact", None) => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true);
            registry.with(stdout_layer).try_init()?;
        }
        (_, None) => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_level(true);
            registry.with(stdout_layer).try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "pretty");
        assert!(!config.file_enabled);
        assert!(config.file_path.is_none());
    }

    #[test]
    fn test_open_file_writer_creates_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("logs").join("service.log");
        let config = LoggingConfig {
            file_enabled: true,
            file_path: Some(path.clone()),
            ..Default::default()
        };

        let writer = open_file_writer(&config).unwrap();
        assert!(writer.is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_open_file_writer_disabled() {
        let config = LoggingConfig {
            file_enabled: false,
            file_path: Some(PathBuf::from("/nonexistent/dir/service.log")),
            ..Default::default()
        };
        assert!(open_file_writer(&config).unwrap().is_none());
    }
}
