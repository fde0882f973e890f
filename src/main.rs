use clap::Parser;
use std::process::ExitCode;
use promptforge::cli::commands::GenerateOptions;
use promptforge::cli::{Cli, Command};
use promptforge::config::loader;
use promptforge::utils::logging;
use promptforge::Result;

#[tokio::main]
async fn main() -> ExitCode {
    // 解析命令行参数
    let cli = Cli::parse();

    // 错误只在这里输出一次
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 执行命令，如果没有指定命令则默认启动服务器
    match cli.command {
        None => {
            let config = loader::load(cli.config.as_deref())?;
            logging::init_logging(&config.logging)?;
            tracing::info!("Starting PromptForge server (default mode)");
            promptforge::cli::commands::serve(config).await?;
        }
        Some(Command::Serve { config }) => {
            let config = loader::load(config.as_deref().or(cli.config.as_deref()))?;
            logging::init_logging(&config.logging)?;
            promptforge::cli::commands::serve(config).await?;
        }
        Some(Command::Generate {
            image,
            app_type,
            temperature,
            server,
            output,
        }) => {
            let config = loader::load(cli.config.as_deref())?;
            // 生成结果占用 stdout，日志写 stderr
            logging::init_cli_logging("warn")?;
            let options = GenerateOptions {
                image,
                application_type: app_type,
                temperature,
                server,
                output,
            };
            promptforge::cli::commands::generate(&config, options).await?;
        }
    }

    Ok(())
}
