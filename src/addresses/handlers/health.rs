use axum::Json;
use serde_json::json;

use crate::constants::SERVICE_NAME;

/// Health check endpoint / 健康检查端点
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": SERVICE_NAME
    }))
}

/// Root welcome endpoint / 根路径欢迎端点
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the geo-addresses API"
    }))
}
