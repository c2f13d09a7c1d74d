//! Common types and utilities for HTTP handlers
//! HTTP处理器的通用类型和工具

use axum::extract::rejection::{JsonRejection, PathRejection};
use serde::{Deserialize, Serialize};

use crate::addresses::error::{AddressError, ValidationError};

/// Standard error response structure for all HTTP handlers
/// 所有HTTP处理器的标准错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

/// Map a JSON body rejection onto a validation error / 将JSON请求体拒绝映射为校验错误
pub fn json_rejection(rejection: JsonRejection) -> AddressError {
    ValidationError::Malformed(rejection.body_text()).into()
}

/// Map a path rejection onto a validation error / 将路径参数拒绝映射为校验错误
pub fn path_rejection(rejection: PathRejection) -> AddressError {
    ValidationError::Malformed(rejection.body_text()).into()
}
