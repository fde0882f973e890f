//! 生成会话

use crate::api::error::GenerationError;
use crate::api::request::{ApplicationType, GenerationRequest};
use crate::client::consumer::consume_response;
use crate::gateway::ModelGateway;

/// 一个用户会话的展示状态
///
/// 一次只持有一张图片，同一时间最多只有一个进行中的生成。
#[derive(Debug, Default)]
pub struct GenerationSession {
    image: Option<String>,
    display: String,
    error: Option<String>,
    generating: bool,
    completed: bool,
}

impl GenerationSession {
    /// 创建空会话
    pub fn new() -> Self {
        Self::default()
    }

    /// 选择图片，替换之前的图片并清空生成结果和错误
    pub fn select_image(&mut self, image: impl Into<String>) {
        self.image = Some(image.into());
        self.clear_output();
    }

    /// 移除图片；进行中的生成结果一并丢弃
    pub fn remove_image(&mut self) {
        self.image = None;
        self.generating = false;
        self.clear_output();
    }

    /// 当前图片
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// 当前累积的 DisplayText（可能尚未完成）
    pub fn display_text(&self) -> &str {
        &self.display
    }

    /// 只有成功结束的生成才有最终文本
    pub fn final_text(&self) -> Option<&str> {
        self.completed.then_some(self.display.as_str())
    }

    /// 最近一次生成的错误信息
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 是否有进行中的生成
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// “生成”按钮是否可用
    pub fn can_generate(&self) -> bool {
        self.image.is_some() && !self.generating
    }

    /// 开始一次生成，返回要提交的请求
    pub fn begin(
        &mut self,
        application_type: ApplicationType,
        temperature: f32,
    ) -> Result<GenerationRequest, GenerationError> {
        if self.generating {
            return Err(GenerationError::AlreadyGenerating);
        }
        let image = self.image.as_ref().ok_or(GenerationError::NoImage)?;
        let request = GenerationRequest::new(image.clone(), application_type, temperature);

        self.clear_output();
        self.generating = true;
        Ok(request)
    }

    /// 追加一个重排后的片段
    pub fn append(&mut self, fragment: &str) {
        self.display.push_str(fragment);
    }

    /// 生成成功结束
    pub fn complete(&mut self) {
        self.generating = false;
        self.completed = true;
    }

    /// 生成失败，记录展示用的错误信息
    pub fn fail(&mut self, error: &GenerationError) {
        self.generating = false;
        self.completed = false;
        self.error = Some(error.display_message());
    }

    /// 放弃进行中的生成（例如丢弃了驱动它的 future）
    pub fn cancel(&mut self) {
        if self.generating {
            tracing::debug!("Generation cancelled");
        }
        self.generating = false;
        self.clear_output();
    }

    /// 通过网关完成一次生成，每个片段都会追加到 DisplayText 并回调 `on_fragment`
    pub async fn run<G, F>(
        &mut self,
        gateway: &G,
        application_type: ApplicationType,
        temperature: f32,
        mut on_fragment: F,
    ) -> Result<(), GenerationError>
    where
        G: ModelGateway + ?Sized,
        F: FnMut(&str),
    {
        let request = self.begin(application_type, temperature)?;

        let result = match gateway.stream_generate(&request).await {
            Ok(response) => {
                let display = &mut self.display;
                consume_response(response, |fragment| {
                    display.push_str(fragment);
                    on_fragment(fragment);
                })
                .await
            }
            Err(e) => Err(GenerationError::Transport(e.to_string())),
        };

        match &result {
            Ok(()) => self.complete(),
            Err(e) => {
                tracing::warn!("Generation failed: {}", e);
                self.fail(e);
            }
        }
        result
    }

    fn clear_output(&mut self) {
        self.display.clear();
        self.error = None;
        self.completed = false;
    }
}
