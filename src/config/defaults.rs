//! 默认配置常量

/// 默认监听地址
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// 默认端口
pub const DEFAULT_PORT: u16 = 8787;
/// 默认请求体上限
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024; // 20MB

/// Gemini API 根地址
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// 默认模型
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// 网关请求超时
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 120;

/// 默认温度
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// 默认日志级别
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// 默认日志格式
pub const DEFAULT_LOG_FORMAT: &str = "pretty";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PROMPTFORGE";
