//! HTTP routes for the address service
//! 地址服务的HTTP路由
//!
//! This module defines all HTTP routes and their mappings to handlers
//! 此模块定义所有HTTP路由及其到处理器的映射

use axum::{
    routing::get,
    Router,
};

use super::gateway::GatewayState;
use super::handlers::{
    create_address, delete_address, find_addresses_within, get_address, health_check,
    list_addresses, root, update_address,
};

/// Create HTTP routes / 创建HTTP路由
pub(crate) fn create_routes(state: GatewayState) -> Router {
    Router::new()
        // Address management endpoints / 地址管理端点
        .route("/addresses", get(list_addresses).post(create_address))
        .route(
            "/addresses/{id}",
            get(get_address)
                .put(update_address)
                .patch(update_address)
                .delete(delete_address),
        )
        // Proximity query endpoint / 邻近查询端点
        .route(
            "/addresses/find/{latitude}/{longitude}/{distance}",
            get(find_addresses_within),
        )
        // Health check endpoints / 健康检查端点
        .route("/", get(root))
        .route("/health", get(health_check))
        .with_state(state)
}
