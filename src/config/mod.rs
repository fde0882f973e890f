//! 配置管理

pub mod defaults;
pub mod loader;
pub mod settings;

pub use settings::{Config, GatewayConfig, LoggingConfig, ServerConfig};
