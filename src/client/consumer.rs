//! 单个流式响应的消费

use futures::StreamExt;

use crate::api::error::{GenerationError, StreamError};
use crate::api::response::{ErrorEnvelope, StreamFrame};
use crate::api::streaming::FrameDecoder;
use crate::gateway::GatewayResponse;
use crate::reformat::Reformatter;

/// 消费一个网关响应，逐个回调重排后的片段
///
/// 只在网络读取处挂起。非成功状态会读取错误体并返回其中的 `error.message`；
/// 传输失败或流在帧中途结束时返回 `GenerationError::Transport`。
/// 丢弃返回的 future 即可取消读取并释放连接。
pub async fn consume_response<F>(response: GatewayResponse, mut on_fragment: F) -> Result<(), GenerationError>
where
    F: FnMut(&str),
{
    if !response.is_success() {
        let status = response.status;
        let body = response
            .into_bytes()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        return Err(GenerationError::Gateway {
            status: status.as_u16(),
            message: error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string()),
        });
    }

    let mut body = response.body;
    let mut decoder = FrameDecoder::new();
    let mut reformatter = Reformatter::new();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| GenerationError::Transport(e.to_string()))?;
        for frame in decoder.push(&chunk) {
            emit_frame(frame, &mut reformatter, &mut on_fragment)?;
        }
    }

    for frame in decoder.finish()? {
        emit_frame(frame, &mut reformatter, &mut on_fragment)?;
    }
    Ok(())
}

fn emit_frame<F>(frame: StreamFrame, reformatter: &mut Reformatter, on_fragment: &mut F) -> Result<(), GenerationError>
where
    F: FnMut(&str),
{
    if let Some(error) = frame.error {
        return Err(StreamError::Gateway {
            status: error.code.unwrap_or(500),
            message: error.message,
        }
        .into());
    }

    for event in frame.content_events() {
        let fragment = reformatter.format(&event);
        if !fragment.is_empty() {
            on_fragment(&fragment);
        }
    }
    Ok(())
}

/// 从错误响应体中提取消息：优先 `error.message`，否则使用原始文本
fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        return Some(envelope.error.message);
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}
