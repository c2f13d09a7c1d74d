//! Address service configuration
//! 地址服务配置

use anyhow::Context;
use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::validation::ValidationConfig;
use crate::config::base::{HttpConfig, LogConfig, StorageConfig};

/// Environment variable prefix / 环境变量前缀
pub const ENV_PREFIX: &str = "GEO_ADDRESSES_";

/// Command line arguments / 命令行参数
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "geo-addresses",
    version = "0.1.0",
    about = "Geo-addresses - address records with proximity search\nGeo-addresses - 支持邻近搜索的地址记录服务",
    long_about = "Stores labelled latitude/longitude records and finds those within a great-circle distance.\n存储带标签的经纬度记录，并查找大圆距离范围内的记录。"
)]
pub struct CliArgs {
    /// Configuration file path / 配置文件路径
    #[arg(short, long, value_name = "FILE", help = "Configuration file path / 配置文件路径")]
    pub config: Option<String>,

    /// HTTP server address / HTTP服务器地址
    #[arg(long, value_name = "ADDR", help = "HTTP server address (e.g., 0.0.0.0:8000) / HTTP服务器地址")]
    pub http_addr: Option<String>,

    /// Storage backend / 存储后端
    #[arg(long, value_name = "TYPE", help = "Storage backend (memory, sled, rocksdb) / 存储后端")]
    pub db_type: Option<String>,

    /// Storage path / 存储路径
    #[arg(long, value_name = "PATH", help = "Storage path / 存储路径")]
    pub db_path: Option<String>,

    /// Log level / 日志级别
    #[arg(long, value_name = "LEVEL", help = "Log level (trace, debug, info, warn, error) / 日志级别")]
    pub log_level: Option<String>,

    /// Log format / 日志格式
    #[arg(long, value_name = "FORMAT", help = "Log format (json, compact, pretty) / 日志格式")]
    pub log_format: Option<String>,

    /// Log file / 日志文件
    #[arg(long, value_name = "FILE", help = "Also write logs to this file / 同时将日志写入此文件")]
    pub log_file: Option<String>,

    /// Minimum label length / 标签最小长度
    #[arg(long, value_name = "CHARS", help = "Minimum label length in characters / 标签最小长度（字符）")]
    pub min_label_length: Option<usize>,

    /// Maximum label length / 标签最大长度
    #[arg(long, value_name = "CHARS", help = "Maximum label length in characters / 标签最大长度（字符）")]
    pub max_label_length: Option<usize>,

    /// CORS origins, repeatable / CORS来源，可重复
    #[arg(long = "allowed-origin", value_name = "ORIGIN", help = "Allowed CORS origin, may be repeated / 允许的CORS来源，可重复指定")]
    pub allowed_origins: Vec<String>,

    /// Request timeout / 请求超时
    #[arg(long, value_name = "SECONDS", help = "Request timeout in seconds / 请求超时时间（秒）")]
    pub request_timeout: Option<u64>,
}

/// Service configuration / 服务配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration / HTTP服务器配置
    pub http: HttpConfig,
    /// Logging configuration / 日志配置
    pub log: LogConfig,
    /// Storage configuration / 存储配置
    pub storage: StorageConfig,
    /// Input validation rules / 输入校验规则
    pub validation: ValidationConfig,
}

/// Home config path: `$GEO_ADDRESSES_HOME/.geo-addresses/config.toml`, falling back to `$HOME`
/// 主目录配置路径：优先使用 `$GEO_ADDRESSES_HOME`，否则使用 `$HOME`
fn home_config_path() -> Option<PathBuf> {
    let base_home =
        std::env::var_os("GEO_ADDRESSES_HOME").or_else(|| std::env::var_os("HOME"))?;
    Some(
        PathBuf::from(base_home)
            .join(".geo-addresses")
            .join("config.toml"),
    )
}

impl AppConfig {
    /// Load configuration: defaults, home file, `--config` file, environment, then CLI overrides
    /// 加载配置：默认值、主目录文件、`--config` 文件、环境变量，最后是CLI参数覆盖
    pub fn load_with_cli(args: &CliArgs) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(home_path) = home_config_path().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(home_path));
        }

        if let Some(config_path) = &args.config {
            let path = PathBuf::from(config_path);
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            } else {
                tracing::info!("Config file '{}' not found, using defaults", config_path);
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: Self = figment.extract().context("Failed to load configuration")?;
        config.apply_cli(args)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields with CLI arguments / 使用CLI参数覆盖字段
    fn apply_cli(&mut self, args: &CliArgs) -> anyhow::Result<()> {
        if let Some(http_addr) = &args.http_addr {
            self.http.addr = http_addr
                .parse()
                .with_context(|| format!("Invalid --http-addr '{}'", http_addr))?;
        }

        if let Some(db_type) = &args.db_type {
            self.storage.backend = db_type.clone();
        }

        if let Some(db_path) = &args.db_path {
            self.storage.path = db_path.clone();
        }

        if let Some(log_level) = &args.log_level {
            self.log.level = log_level.clone();
        }

        if let Some(log_format) = &args.log_format {
            self.log.format = log_format.clone();
        }

        if let Some(log_file) = &args.log_file {
            self.log.file = Some(log_file.clone());
        }

        if let Some(min) = args.min_label_length {
            self.validation.min_label_length = min;
        }

        if let Some(max) = args.max_label_length {
            self.validation.max_label_length = max;
        }

        if !args.allowed_origins.is_empty() {
            self.http.allowed_origins = args.allowed_origins.clone();
        }

        if let Some(timeout) = args.request_timeout {
            self.http.request_timeout_secs = timeout;
        }

        Ok(())
    }

    /// Validate the configuration / 验证配置
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validation.check().map_err(anyhow::Error::msg)?;
        if self.http.request_timeout_secs == 0 {
            anyhow::bail!("http.request_timeout_secs must be greater than 0");
        }
        Ok(())
    }
}
