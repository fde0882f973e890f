//! 流式响应帧解码
//!
//! 网关以类 SSE 的格式返回内容：每一帧以 `data: ` 开头，后跟一个 JSON 对象，
//! 帧之间以空行分隔。网络读取的边界与帧边界无关，一帧可能被拆分到多次读取中，
//! 因此解码器会缓存不完整的字节，直到帧结束后才解析。

use crate::api::error::StreamError;
use crate::api::response::StreamFrame;

/// 增量帧解码器
///
/// 每个流独占一个实例。不完整的帧只会被缓存，不会被输出。
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    /// 已确认不含帧边界的前缀长度，下次从这里继续查找
    scanned: usize,
}

enum Decoded {
    Frame(StreamFrame),
    Skip,
    Malformed(String),
}

impl FrameDecoder {
    /// 创建空的解码器
    pub fn new() -> Self {
        Self::default()
    }

    /// 尚未解析的缓存字节数
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// 追加一次网络读取的数据，返回其中所有已完整的帧
    ///
    /// 无法解析的完整帧会被记录并跳过，不会中断整个流。
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        // 边界最长 4 字节，可能跨越上一次读取的末尾
        let mut from = self.scanned.saturating_sub(3);
        while let Some((end, next)) = find_event_boundary(&self.buffer, from) {
            let event: Vec<u8> = self.buffer.drain(..next).take(end).collect();
            from = 0;
            match decode_event(&event) {
                Decoded::Frame(frame) => frames.push(frame),
                Decoded::Skip => {}
                Decoded::Malformed(reason) => {
                    tracing::warn!(bytes = event.len(), "Skipping malformed stream frame: {}", reason);
                }
            }
        }
        self.scanned = self.buffer.len();
        frames
    }

    /// 流结束时调用
    ///
    /// 末尾没有空行但内容完整的帧仍会被输出；残留的不完整帧视为传输错误。
    pub fn finish(&mut self) -> Result<Vec<StreamFrame>, StreamError> {
        let rest = std::mem::take(&mut self.buffer);
        self.scanned = 0;
        if rest.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match decode_event(&rest) {
            Decoded::Frame(frame) => Ok(vec![frame]),
            Decoded::Skip => Ok(Vec::new()),
            Decoded::Malformed(reason) => {
                tracing::debug!("Trailing stream bytes did not form a frame: {}", reason);
                Err(StreamError::IncompleteFrame { pending: rest.len() })
            }
        }
    }
}

/// 从 `from` 开始查找第一个事件结束位置，返回 (事件结束, 下一个事件开始)
fn find_event_boundary(buf: &[u8], from: usize) -> Option<(usize, usize)> {
    (from..buf.len()).find_map(|i| {
        let tail = &buf[i..];
        if tail.starts_with(b"\r\n\r\n") {
            Some((i, i + 4))
        } else if tail.starts_with(b"\n\n") || tail.starts_with(b"\r\r") {
            Some((i, i + 2))
        } else {
            None
        }
    })
}

/// 不携带内容的 SSE 字段
const IGNORED_FIELDS: [&str; 3] = ["event", "id", "retry"];

fn decode_event(event: &[u8]) -> Decoded {
    let text = match std::str::from_utf8(event) {
        Ok(text) => text,
        Err(e) => return Decoded::Malformed(format!("invalid UTF-8: {}", e)),
    };

    let mut data_lines = Vec::new();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        match line.split_once(':') {
            Some(("data", data)) => data_lines.push(data.strip_prefix(' ').unwrap_or(data)),
            Some((field, _)) if IGNORED_FIELDS.contains(&field) => {}
            _ => return Decoded::Malformed(format!("unexpected line {:?}", line)),
        }
    }

    // 只有注释或 event/id/retry 字段的事件（例如 keep-alive）
    if data_lines.is_empty() {
        return Decoded::Skip;
    }

    let payload = data_lines.join("\n");
    if payload.trim() == "[DONE]" {
        return Decoded::Skip;
    }

    match serde_json::from_str::<StreamFrame>(&payload) {
        Ok(frame) => Decoded::Frame(frame),
        Err(e) => Decoded::Malformed(e.to_string()),
    }
}
