//! 命令行接口

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::request::ApplicationType;
use crate::config::defaults::DEFAULT_TEMPERATURE;

/// PromptForge CLI
#[derive(Parser)]
#[command(name = "promptforge")]
#[command(about = "Turn UI screenshots into prompts for AI coding tools")]
#[command(version)]
pub struct Cli {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    /// 子命令，缺省时启动服务器
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI 命令
#[derive(Subcommand)]
pub enum Command {
    /// 启动服务器
    Serve {
        /// 配置文件路径
        #[arg(short, long)]
        config: Option<String>,
    },
    /// 为一张图片生成提示词，并实时输出
    Generate {
        /// 图片路径（PNG、JPEG、GIF、WEBP）
        image: PathBuf,
        /// 目标应用类型
        #[arg(short, long, default_value = "web")]
        app_type: ApplicationType,
        /// 采样温度，范围 0.0 - 1.0
        #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE)]
        temperature: f32,
        /// 通过运行中的 PromptForge 服务生成，而不是直接调用模型
        #[arg(short, long)]
        server: Option<String>,
        /// 生成成功后把结果写入文件
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
