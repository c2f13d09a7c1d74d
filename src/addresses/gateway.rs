//! HTTP gateway state and router assembly
//! HTTP网关状态与路由组装

use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::warn;

use super::error::AddressError;
use super::repository::AddressRepository;
use super::routes::create_routes;
use super::service::AddressService;
use super::validation::ValidationConfig;
use crate::config::base::HttpConfig;

/// HTTP gateway state / HTTP网关状态
#[derive(Clone, Debug)]
pub struct GatewayState {
    pub repository: Arc<dyn AddressRepository>,
    pub validation: ValidationConfig,
}

impl GatewayState {
    /// Create gateway state / 创建网关状态
    pub fn new(repository: Arc<dyn AddressRepository>, validation: ValidationConfig) -> Self {
        Self {
            repository,
            validation,
        }
    }

    /// Open a service scope for one request / 为单个请求打开服务作用域
    pub fn session(&self) -> AddressService {
        AddressService::new(self.repository.clone(), self.validation)
    }
}

/// Build the CORS layer from the configured origins / 根据配置的来源构建CORS层
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    // Credentials require explicit headers / 凭证模式需要显式请求头
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Give timed-out requests the standard error body / 为超时请求返回标准错误响应体
async fn structured_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AddressError::Timeout.into_response();
    }
    response
}

/// Bound every request by `timeout` / 以 `timeout` 限制每个请求
pub(crate) fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(map_response(structured_timeout))
}

/// Create HTTP gateway router / 创建HTTP网关路由器
pub fn create_gateway_router(state: GatewayState, http: &HttpConfig) -> Router {
    with_request_timeout(
        create_routes(state),
        Duration::from_secs(http.request_timeout_secs),
    )
    .layer(cors_layer(&http.allowed_origins))
}
