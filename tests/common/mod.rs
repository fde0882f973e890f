//! 集成测试共用的脚本化网关

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use futures::StreamExt;
use tower::ServiceExt;

use promptforge::api::error::GatewayError;
use promptforge::api::request::GenerationRequest;
use promptforge::gateway::{GatewayResponse, ModelGateway};
use promptforge::server::http::{create_router, AppState};

pub const BODY_LIMIT: usize = 20 * 1024 * 1024;

/// 返回预先准备好的响应，并记录收到的请求
pub struct ScriptedGateway {
    status: StatusCode,
    chunks: Vec<Bytes>,
    fail: bool,
    pub last_request: Mutex<Option<GenerationRequest>>,
}

impl ScriptedGateway {
    pub fn streaming(chunks: Vec<String>) -> Self {
        Self {
            status: StatusCode::OK,
            chunks: chunks.into_iter().map(Bytes::from).collect(),
            fail: false,
            last_request: Mutex::new(None),
        }
    }

    pub fn rejecting(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            chunks: vec![Bytes::from(body.to_string())],
            fail: false,
            last_request: Mutex::new(None),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            status: StatusCode::OK,
            chunks: Vec::new(),
            fail: true,
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn stream_generate(&self, request: &GenerationRequest) -> Result<GatewayResponse, GatewayError> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        if self.fail {
            return Err(GatewayError::Unavailable("connection refused".to_string()));
        }

        let mut headers = HeaderMap::new();
        let content_type = if self.status.is_success() {
            "text/event-stream"
        } else {
            "application/json; charset=UTF-8"
        };
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));

        let chunks: Vec<Result<Bytes, GatewayError>> = self.chunks.iter().cloned().map(Ok).collect();
        Ok(GatewayResponse::from_chunks(self.status, headers, chunks))
    }
}

/// 用脚本化网关构造路由
pub fn router(gateway: Arc<ScriptedGateway>) -> Router {
    create_router(AppState::new(gateway), BODY_LIMIT)
}

/// 一个 SSE 帧
pub fn frame(text: &str, thought: bool) -> String {
    let part = if thought {
        serde_json::json!({ "text": text, "thought": true })
    } else {
        serde_json::json!({ "text": text })
    };
    format!(
        "data: {}\r\n\r\n",
        serde_json::json!({ "candidates": [{ "content": { "parts": [part], "role": "model" } }] })
    )
}

pub fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// 把 axum 响应转换为网关响应，以便用客户端逻辑消费
pub fn into_gateway_response(response: axum::response::Response) -> GatewayResponse {
    let (parts, body) = response.into_parts();
    let stream = body
        .into_data_stream()
        .map(|chunk| chunk.map_err(|e| GatewayError::Unavailable(e.to_string())));
    GatewayResponse::new(parts.status, parts.headers, Box::pin(stream))
}

/// 经由 HTTP 路由访问网关，用于端到端测试客户端会话
pub struct RouterGateway {
    pub router: Router,
}

#[async_trait]
impl ModelGateway for RouterGateway {
    fn name(&self) -> &str {
        "router"
    }

    async fn stream_generate(&self, request: &GenerationRequest) -> Result<GatewayResponse, GatewayError> {
        let body = serde_json::to_string(request).map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        let response = self
            .router
            .clone()
            .oneshot(generate_request(&body))
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        Ok(into_gateway_response(response))
    }
}
