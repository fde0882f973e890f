//! 模型网关抽象
//!
//! 网关接收图片、应用类型和温度，返回未经缓冲的流式 HTTP 响应。
//! 请求处理器原样透传该响应；客户端则对其进行解码和重排。

pub mod gemini;

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use std::fmt;
use std::pin::Pin;

use crate::api::error::GatewayError;
use crate::api::request::GenerationRequest;

pub use gemini::GeminiGateway;

/// 响应体字节流
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, GatewayError>> + Send>>;

/// 网关的流式响应：状态码、响应头和尚未读取的响应体
pub struct GatewayResponse {
    /// 网关返回的状态码
    pub status: StatusCode,
    /// 网关返回的响应头
    pub headers: HeaderMap,
    /// 未读取的响应体
    pub body: BodyStream,
}

impl GatewayResponse {
    /// 创建响应
    pub fn new(status: StatusCode, headers: HeaderMap, body: BodyStream) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 包装 reqwest 响应，不读取响应体
    pub fn from_reqwest(response: reqwest::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(GatewayError::from));
        Self::new(status, headers, Box::pin(body))
    }

    /// 由预先准备好的数据块构造响应
    pub fn from_chunks<I>(status: StatusCode, headers: HeaderMap, chunks: I) -> Self
    where
        I: IntoIterator<Item = Result<Bytes, GatewayError>>,
        I::IntoIter: Send + 'static,
    {
        Self::new(status, headers, Box::pin(stream::iter(chunks)))
    }

    /// 状态码是否为 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 读取完整响应体（仅用于错误响应）
    pub async fn into_bytes(mut self) -> Result<Bytes, GatewayError> {
        let mut collected = Vec::new();
        while let Some(chunk) = self.body.next().await {
            collected.extend_from_slice(&chunk?);
        }
        Ok(Bytes::from(collected))
    }
}

impl fmt::Debug for GatewayResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// 模型网关
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// 网关名称
    fn name(&self) -> &str;

    /// 发起流式生成
    ///
    /// 只有在完全拿不到响应时才返回错误；网关返回的非成功状态通过
    /// `GatewayResponse::status` 原样交给调用方。
    async fn stream_generate(&self, request: &GenerationRequest) -> Result<GatewayResponse, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_into_bytes_concatenates_chunks() {
        let response = GatewayResponse::from_chunks(
            StatusCode::BAD_REQUEST,
            HeaderMap::new(),
            vec![Ok(Bytes::from_static(b"{\"error\":")), Ok(Bytes::from_static(b"{}}"))],
        );
        assert!(!response.is_success());
        assert_eq!(response.into_bytes().await.unwrap(), Bytes::from_static(b"{\"error\":{}}"));
    }

    #[tokio::test]
    async fn test_into_bytes_propagates_transport_error() {
        let response = GatewayResponse::from_chunks(
            StatusCode::OK,
            HeaderMap::new(),
            vec![
                Ok(Bytes::from_static(b"partial")),
                Err(GatewayError::Unavailable("connection reset".to_string())),
            ],
        );
        assert!(response.into_bytes().await.is_err());
    }
}
