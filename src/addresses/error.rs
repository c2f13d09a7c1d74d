//! Error types for the address service
//! 地址服务的错误类型

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::handlers::common::ErrorResponse;

/// Input validation failures / 输入校验失败
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Numeric field outside its allowed range / 数值字段超出允许范围
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Text field length outside its allowed bounds / 文本字段长度超出允许范围
    #[error("{field} length must be between {min} and {max} characters, got {actual}")]
    InvalidLength {
        field: &'static str,
        actual: usize,
        min: usize,
        max: usize,
    },

    /// Text field holds only whitespace / 文本字段仅包含空白字符
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    /// Request shape could not be parsed / 请求格式无法解析
    #[error("Malformed request: {0}")]
    Malformed(String),
}

/// Address service error types / 地址服务错误类型
#[derive(Error, Debug)]
pub enum AddressError {
    /// Invalid input / 无效输入
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Address not found / 地址未找到
    #[error("No address with this id: {id} found")]
    NotFound { id: String },

    /// Datastore failure / 数据存储失败
    #[error("Storage error: {0}")]
    Storage(String),

    /// Request exceeded the configured time budget / 请求超出配置的时间限制
    #[error("Request timed out")]
    Timeout,
}

/// Result type alias for address operations / 地址操作的结果类型别名
pub type AddressResult<T> = Result<T, AddressError>;

impl AddressError {
    /// Shorthand for a not-found error / 未找到错误的简写
    pub fn not_found(id: impl Into<String>) -> Self {
        AddressError::NotFound { id: id.into() }
    }

    /// HTTP status code for this error / 该错误对应的HTTP状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AddressError::Validation(_) => StatusCode::BAD_REQUEST,
            AddressError::NotFound { .. } => StatusCode::NOT_FOUND,
            AddressError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AddressError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Stable machine-readable error kind / 稳定的机器可读错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            AddressError::Validation(_) => "validation_error",
            AddressError::NotFound { .. } => "not_found",
            AddressError::Storage(_) => "storage_error",
            AddressError::Timeout => "timeout",
        }
    }
}

/// Convert AddressError into an HTTP response
/// 将AddressError转换为HTTP响应
impl IntoResponse for AddressError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        let body = ErrorResponse {
            success: false,
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
