//! 路由与共享状态

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::gateway::ModelGateway;
use crate::server::http::handlers;

/// 处理器共享的状态
#[derive(Clone)]
pub struct AppState {
    /// 模型网关
    pub gateway: Arc<dyn ModelGateway>,
}

impl AppState {
    /// 创建共享状态
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }
}

/// 定义路由
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", axum::routing::get(handlers::health))
        .route("/api/generate", axum::routing::post(handlers::generate))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
