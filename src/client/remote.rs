//! 远程 PromptForge 服务客户端

use async_trait::async_trait;
use std::time::Duration;

use crate::api::error::GatewayError;
use crate::api::request::GenerationRequest;
use crate::gateway::{GatewayResponse, ModelGateway};

const GENERATE_PATH: &str = "/api/generate";

/// 通过运行中的 PromptForge 服务访问模型网关
///
/// 服务端原样透传网关响应，所以这里可以直接作为一个网关使用。
#[derive(Debug, Clone)]
pub struct EndpointClient {
    http: reqwest::Client,
    url: String,
}

impl EndpointClient {
    /// 根据服务地址创建客户端
    pub fn new(server: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: generate_url(server),
        })
    }

    /// 生成接口的完整地址
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn generate_url(server: &str) -> String {
    let base = server.trim().trim_end_matches('/');
    if base.ends_with(GENERATE_PATH) {
        base.to_string()
    } else {
        format!("{}{}", base, GENERATE_PATH)
    }
}

#[async_trait]
impl ModelGateway for EndpointClient {
    fn name(&self) -> &str {
        "endpoint"
    }

    async fn stream_generate(&self, request: &GenerationRequest) -> Result<GatewayResponse, GatewayError> {
        tracing::debug!(url = %self.url, "Posting generation request");
        let response = self.http.post(&self.url).json(request).send().await?;
        Ok(GatewayResponse::from_reqwest(response))
    }
}
