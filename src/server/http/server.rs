//! HTTP 服务器启动与优雅退出

use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::Result;
use crate::config::Config;
use crate::gateway::ModelGateway;
use crate::server::http::routes::{self, AppState};

/// 启动 HTTP 服务器
pub async fn serve(config: Config, gateway: Arc<dyn ModelGateway>) -> Result<()> {
    let router = routes::create_router(AppState::new(gateway), config.server.max_body_bytes);
    let app = if config.server.cors {
        router.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
    } else {
        router.layer(TraceLayer::new_for_http())
    };

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await
        .map_err(|e| crate::api::error::ApiError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::api::error::ApiError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
