//! 错误类型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::response::ErrorEnvelope;

/// PromptForge 错误类型
#[derive(Debug, Error)]
pub enum PromptForgeError {
    /// 模型网关错误
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// 流解码错误
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    /// 生成错误
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP 接口错误
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 模型网关错误
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP 请求失败
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 缺少必要配置
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    /// 网关不可达
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}

/// 流解码错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    /// 流结束时仍有未完成的帧
    #[error("Stream ended inside an incomplete frame ({pending} bytes pending)")]
    IncompleteFrame {
        /// 残留的字节数
        pending: usize,
    },

    /// 网关在流中返回了错误对象
    #[error("{message}")]
    Gateway {
        /// 错误对象中的状态码，缺省为 500
        status: u16,
        /// 错误信息
        message: String,
    },
}

/// 生成过程错误（展示层可见）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// 网络/连接失败，或流在帧中途结束
    #[error("Transport failure: {0}")]
    Transport(String),

    /// 网关返回非成功状态
    #[error("{message}")]
    Gateway {
        /// HTTP 状态码
        status: u16,
        /// 网关给出的错误信息
        message: String,
    },

    /// 已有进行中的生成
    #[error("A generation is already in progress")]
    AlreadyGenerating,

    /// 未选择图片
    #[error("No image selected")]
    NoImage,
}

impl GenerationError {
    /// 展示给用户的错误文本
    pub fn display_message(&self) -> String {
        match self {
            GenerationError::Gateway { message, .. } => message.clone(),
            GenerationError::Transport(_) => "Failed to generate prompt".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StreamError> for GenerationError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Gateway { status, message } => GenerationError::Gateway { status, message },
            other => GenerationError::Transport(other.to_string()),
        }
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 加载失败
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// 配置值无效
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// API 错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 请求体无效（400）
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 无法连接模型网关（502）
    #[error("Upstream gateway failed: {0}")]
    BadGateway(String),

    /// 内部错误（500）
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorEnvelope::new(self.to_string()))).into_response()
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PromptForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_message_is_verbatim() {
        let err = GenerationError::Gateway {
            status: 400,
            message: "Image is not valid".to_string(),
        };
        assert_eq!(err.display_message(), "Image is not valid");
    }

    #[test]
    fn test_incomplete_frame_is_transport() {
        let err: GenerationError = StreamError::IncompleteFrame { pending: 12 }.into();
        assert!(matches!(err, GenerationError::Transport(_)));
        assert_eq!(err.display_message(), "Failed to generate prompt");
    }

    #[test]
    fn test_api_error_status() {
        assert_eq!(
            ApiError::InvalidRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadGateway("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
