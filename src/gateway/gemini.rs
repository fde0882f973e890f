//! Gemini 网关
//!
//! 通过 `streamGenerateContent?alt=sse` 接口以 SSE 格式流式返回内容，
//! 并开启 `includeThoughts` 以便区分思考片段和回答片段。

use async_trait::async_trait;
use serde_json::{json, Value};
use std::fmt;

use crate::api::error::GatewayError;
use crate::api::request::GenerationRequest;
use crate::config::settings::GatewayConfig;
use crate::gateway::{GatewayResponse, ModelGateway};
use crate::prompt::build_prompt;

/// Gemini API 客户端
#[derive(Clone)]
pub struct GeminiGateway {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiGateway {
    /// 根据配置创建网关，缺少 API Key 时报错
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            GatewayError::NotConfigured(
                "no API key (set gateway.api_key, GEMINI_API_KEY or GOOGLE_API_KEY)".to_string(),
            )
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim().trim_end_matches('/').to_string(),
            model: config.model.trim().to_string(),
            api_key,
        })
    }

    /// 流式生成接口地址
    pub fn endpoint(&self) -> String {
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!("{}/{}:streamGenerateContent?alt=sse", self.api_base, model_path)
    }

    /// 构造请求体
    pub fn build_body(request: &GenerationRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": request.mime_type(),
                            "data": request.normalized_image(),
                        }
                    },
                    { "text": build_prompt(request.application_type) }
                ]
            }],
            "generationConfig": {
                "temperature": request.clamped_temperature(),
                "thinkingConfig": { "includeThoughts": true }
            }
        })
    }
}

impl fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn stream_generate(&self, request: &GenerationRequest) -> Result<GatewayResponse, GatewayError> {
        let endpoint = self.endpoint();
        tracing::debug!(model = %self.model, "Calling Gemini streamGenerateContent");

        let response = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_body(request))
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Gemini responded");
        Ok(GatewayResponse::from_reqwest(response))
    }
}
