//! 生成接口：透传网关的流式响应

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::response::Response;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::request::GenerationRequest;
use crate::gateway::GatewayResponse;
use crate::server::http::routes::AppState;

/// 由 hyper 重新分帧的逐跳响应头，不透传
fn is_hop_by_hop(name: &HeaderName) -> bool {
    *name == header::CONNECTION
        || *name == header::TRANSFER_ENCODING
        || *name == header::CONTENT_LENGTH
        || *name == header::UPGRADE
}

/// 生成请求处理
///
/// 把请求转发给模型网关，并原样返回网关的状态码、响应头和流式响应体。
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    if request.normalized_image().is_empty() {
        return Err(ApiError::InvalidRequest("image must not be empty".to_string()));
    }

    tracing::info!(
        application_type = %request.application_type,
        temperature = request.clamped_temperature(),
        image_bytes = request.image.len(),
        "Generate request"
    );

    let upstream = state.gateway.stream_generate(&request).await.map_err(|e| {
        tracing::warn!(gateway = state.gateway.name(), "Gateway request failed: {}", e);
        ApiError::BadGateway(e.to_string())
    })?;

    if upstream.is_success() {
        tracing::info!(status = %upstream.status, "Streaming gateway response");
    } else {
        tracing::warn!(status = %upstream.status, "Gateway rejected request, passing error through");
    }

    Ok(proxy_response(upstream))
}

/// 把网关响应转换为 axum 响应，不做缓冲
pub fn proxy_response(upstream: GatewayResponse) -> Response {
    let GatewayResponse {
        status,
        headers,
        body,
    } = upstream;

    let mut response = Response::new(Body::from_stream(body));
    *response.status_mut() = status;
    for (name, value) in headers.iter() {
        if !is_hop_by_hop(name) {
            response.headers_mut().append(name.clone(), value.clone());
        }
    }
    response
}
