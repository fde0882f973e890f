//! 服务端

pub mod http;

use std::sync::Arc;

use crate::Result;
use crate::config::Config;
use crate::gateway::{GeminiGateway, ModelGateway};

/// 启动服务器
pub async fn serve(config: Config) -> Result<()> {
    tracing::info!("Starting server...");

    let gateway: Arc<dyn ModelGateway> = Arc::new(GeminiGateway::new(&config.gateway)?);
    tracing::info!(
        gateway = gateway.name(),
        model = %config.gateway.model,
        "Model gateway ready"
    );

    http::serve(config, gateway).await
}
