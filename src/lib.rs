//! Geo-addresses: address records with great-circle proximity queries
//! Geo-addresses：支持大圆距离邻近查询的地址记录服务

// Shared modules / 共享模块
pub mod config;
pub mod constants;
pub mod geo;
pub mod storage;
pub mod utils;

// Service-specific modules / 服务特定模块
pub mod addresses;

// Re-exports / 重新导出
pub use config::*;
pub use geo::*;
pub use storage::*;
