//! `generate` 命令

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::Result;
use crate::api::request::ApplicationType;
use crate::client::{EndpointClient, GenerationSession};
use crate::config::Config;
use crate::gateway::{GeminiGateway, ModelGateway};

/// `generate` 命令参数
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// 图片路径
    pub image: PathBuf,
    /// 目标应用类型
    pub application_type: ApplicationType,
    /// 采样温度
    pub temperature: f32,
    /// 远程 PromptForge 服务地址
    pub server: Option<String>,
    /// 保存最终提示词的文件
    pub output: Option<PathBuf>,
}

/// 为一张图片生成提示词，片段到达时立即写到 stdout
///
/// Ctrl-C 会放弃进行中的请求。
pub async fn generate(config: &Config, options: GenerateOptions) -> Result<()> {
    let bytes = tokio::fs::read(&options.image).await?;
    tracing::info!(
        image = %options.image.display(),
        bytes = bytes.len(),
        application_type = %options.application_type,
        "Generating prompt"
    );

    let gateway: Arc<dyn ModelGateway> = match options.server.as_deref() {
        Some(server) => {
            let client = EndpointClient::new(server, config.gateway.timeout())?;
            tracing::info!(url = %client.url(), "Generating through PromptForge server");
            Arc::new(client)
        }
        None => Arc::new(GeminiGateway::new(&config.gateway)?),
    };

    let mut session = GenerationSession::new();
    session.select_image(STANDARD.encode(&bytes));

    let mut stdout = std::io::stdout();
    let outcome = tokio::select! {
        result = session.run(
            gateway.as_ref(),
            options.application_type,
            options.temperature,
            |fragment| {
                // stdout 写失败（例如管道被关闭）不影响生成本身
                let _ = stdout.write_all(fragment.as_bytes());
                let _ = stdout.flush();
            },
        ) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        None => {
            session.cancel();
            eprintln!();
            tracing::info!("Generation cancelled by user");
            Ok(())
        }
        Some(Err(e)) => {
            println!();
            Err(e.into())
        }
        Some(Ok(())) => {
            println!();
            if let (Some(path), Some(text)) = (options.output.as_ref(), session.final_text()) {
                tokio::fs::write(path, text).await?;
                tracing::info!(path = %path.display(), "Prompt saved");
            }
            Ok(())
        }
    }
}
