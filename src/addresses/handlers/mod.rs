//! HTTP handlers for the address service
//! 地址服务的HTTP处理器
//!
//! This module contains HTTP request handlers for the different API endpoints
//! 此模块包含不同API端点的HTTP请求处理器

pub mod address;
pub mod common;
pub mod health;

// Re-export all public items from each module / 重新导出每个模块的所有公共项
pub use address::*;
pub use common::*;
pub use health::*;
