//! 网关响应的数据类型

use serde::{Deserialize, Serialize};

/// 网关流中的单个内容事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEvent {
    /// 文本内容
    pub text: String,
    /// 是否为思考片段
    pub is_thought: bool,
}

impl ContentEvent {
    /// 思考片段
    pub fn thought(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_thought: true,
        }
    }

    /// 回答片段
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_thought: false,
        }
    }
}

/// 网关流式响应的一帧（`data: ` 后的 JSON 对象）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFrame {
    /// 候选结果
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// 网关在流中返回的错误
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// 候选结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// 候选内容
    #[serde(default)]
    pub content: Option<Content>,
    /// 结束原因
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// 候选内容
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// 内容片段
    #[serde(default)]
    pub parts: Vec<Part>,
    /// 角色
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// 内容片段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    /// 文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// 是否为思考片段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl StreamFrame {
    /// 提取第一个候选中的文本事件，保持原有顺序
    pub fn content_events(&self) -> Vec<ContentEvent> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| {
                        part.text.as_ref().map(|text| ContentEvent {
                            text: text.clone(),
                            is_thought: part.thought.unwrap_or(false),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// 错误响应体：`{ "error": { "message": ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// 错误详情
    pub error: ErrorBody,
}

/// 错误详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 错误信息
    pub message: String,
    /// HTTP 状态码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// 状态名，如 `INVALID_ARGUMENT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorEnvelope {
    /// 只带错误信息的错误响应
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                code: None,
                status: None,
            },
        }
    }
}
