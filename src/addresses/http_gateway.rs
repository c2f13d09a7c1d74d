//! HTTP server for the address service
//! 地址服务的HTTP服务器

use anyhow::Result;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::gateway::{create_gateway_router, GatewayState};
use crate::config::base::HttpConfig;

/// Address HTTP gateway / 地址HTTP网关
pub struct HttpGateway {
    config: HttpConfig,
    state: GatewayState,
    cancel_token: CancellationToken,
}

impl HttpGateway {
    /// Create a new HTTP gateway / 创建新的HTTP网关
    pub fn new(config: HttpConfig, state: GatewayState) -> Self {
        Self {
            config,
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Token that stops the server when cancelled / 取消时停止服务器的令牌
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Bind the configured address and serve until cancelled
    /// 绑定配置的地址并持续服务直至被取消
    pub async fn start(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener / 在已绑定的监听器上提供服务
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        let app = create_gateway_router(self.state, &self.config);

        info!("HTTP gateway listening on {}", local_addr);
        info!("CORS allowed origins: {:?}", self.config.allowed_origins);

        let cancel_token = self.cancel_token;
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async move { cancel_token.cancelled().await })
            .await
        {
            error!("HTTP gateway error: {}", e);
            return Err(e.into());
        }

        info!("HTTP gateway on {} stopped", local_addr);
        Ok(())
    }
}
