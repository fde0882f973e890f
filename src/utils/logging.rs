//! 日志系统
//!
//! 基于 tracing，日志级别可由 `RUST_LOG` 覆盖，支持 JSON、Pretty、Compact
//! 三种格式，输出到 stdout、stderr 或文件。

use crate::api::error::ConfigError;
use crate::config::settings::LoggingConfig;
use crate::Result;
use std::path::PathBuf;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 初始化日志系统
///
/// `generate` 命令把结果写到 stdout，此时应把日志输出配置为 stderr。
///
/// # 示例
///
/// ```no_run
/// use promptforge::config::settings::LoggingConfig;
/// use promptforge::utils::logging::init_logging;
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: "json".to_string(),
///     output: vec!["logs/promptforge.log".to_string()],
/// };
///
/// init_logging(&config).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    // RUST_LOG 优先于配置文件
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| {
            // 日志系统还没初始化，只能直接写 stderr
            eprintln!(
                "Warning: Invalid log level '{}', using 'info' as default",
                config.level
            );
            EnvFilter::new("info")
        })
    });

    let primary_output = config.output.first().map(|s| s.as_str()).unwrap_or("stdout");
    if config.output.len() > 1 {
        eprintln!(
            "Warning: Multiple log outputs specified, only the first one ({}) is used",
            primary_output
        );
    }

    match primary_output {
        "stdout" => init_subscriber(&config.format, filter, std::io::stdout)?,
        "stderr" => init_subscriber(&config.format, filter, std::io::stderr)?,
        file_path => {
            let path = PathBuf::from(file_path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Invalid(format!("Failed to create log directory: {}", e))
                })?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| ConfigError::Invalid(format!("Failed to open log file {}: {}", file_path, e)))?;

            init_subscriber(&config.format, filter, file)?;
        }
    }

    tracing::debug!(
        "Logging initialized: level={}, format={}, output={}",
        config.level,
        config.format,
        primary_output
    );

    Ok(())
}

fn init_subscriber<W>(format: &str, filter: EnvFilter, writer: W) -> Result<()>
where
    W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let registry = Registry::default().with(filter);

    let layer = match format.to_lowercase().as_str() {
        "json" => fmt::layer()
            .with_writer(writer)
            .json()
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .boxed(),
        "pretty" | "human" => fmt::layer()
            .with_writer(writer)
            .pretty()
            .with_target(true)
            .with_level(true)
            .boxed(),
        // 默认 compact
        _ => fmt::layer()
            .with_writer(writer)
            .compact()
            .with_target(true)
            .with_level(true)
            .boxed(),
    };

    registry
        .with(layer)
        .try_init()
        .map_err(|e| ConfigError::Invalid(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// 命令行客户端使用的日志：compact 格式写到 stderr，保持 stdout 只有生成结果
pub fn init_cli_logging(level: &str) -> Result<()> {
    let config = LoggingConfig {
        level: level.to_string(),
        format: "compact".to_string(),
        output: vec!["stderr".to_string()],
    };
    init_logging(&config)
}
