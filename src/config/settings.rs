//! 配置结构

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::defaults::*;

/// 主配置结构
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// 服务器配置
    pub server: ServerConfig,
    /// 模型网关配置
    pub gateway: GatewayConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 请求体上限（图片以 Base64 传输，远大于 axum 默认的 2MB）
    pub max_body_bytes: usize,
    /// 是否允许跨域请求
    pub cors: bool,
}

/// 模型网关配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// API 根地址
    pub api_base: String,
    /// 模型名称
    pub model: String,
    /// API Key，未设置时读取环境变量
    pub api_key: Option<String>,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 输出格式：json、pretty 或 compact
    pub format: String,
    /// 输出目标：stdout、stderr 或文件路径
    pub output: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors: true,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_GATEWAY_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: DEFAULT_LOG_FORMAT.to_string(),
            output: vec!["stdout".to_string()],
        }
    }
}

impl ServerConfig {
    /// 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl GatewayConfig {
    /// 请求超时
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 解析 API Key：配置优先，其次 `GEMINI_API_KEY`、`GOOGLE_API_KEY`
    pub fn resolved_api_key(&self) -> Option<String> {
        non_empty(self.api_key.clone())
            .or_else(|| non_empty(std::env::var("GEMINI_API_KEY").ok()))
            .or_else(|| non_empty(std::env::var("GOOGLE_API_KEY").ok()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
