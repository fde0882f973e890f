//! 配置加载：配置文件 + `PROMPTFORGE_*` 环境变量

use crate::Result;
use crate::config::defaults::ENV_PREFIX;
use crate::config::settings::Config;
use config::{Config as ConfigBuilder, Environment, File};

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// 从文件加载配置，环境变量覆盖文件中的值
pub fn load_from_file(path: &str) -> Result<Config> {
    let config = ConfigBuilder::builder()
        .add_source(File::with_name(path))
        .add_source(env_source())
        .build()
        .map_err(|e| crate::api::error::ConfigError::LoadFailed(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| crate::api::error::ConfigError::Invalid(e.to_string()).into())
}

/// 从环境变量加载配置
pub fn load_from_env() -> Result<Config> {
    let config = ConfigBuilder::builder()
        .add_source(env_source())
        .build()
        .map_err(|e| crate::api::error::ConfigError::LoadFailed(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| crate::api::error::ConfigError::Invalid(e.to_string()).into())
}

/// 命令行使用的加载方式：有文件读文件，否则只读环境变量
pub fn load(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => load_from_file(path),
        None => load_from_env(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9100

[gateway]
model = "gemini-2.0-flash-thinking-exp"
timeout_secs = 30
"#
        )
        .unwrap();

        let config = load_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.gateway.model, "gemini-2.0-flash-thinking-exp");
        assert_eq!(config.gateway.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_fails() {
        let result = load_from_file("/definitely/not/here/promptforge.toml");
        assert!(result.is_err());
    }
}
