//! 生成请求

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::defaults::DEFAULT_TEMPERATURE;

/// 目标应用类型，仅用作提示词构造的提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    /// 网页应用
    #[default]
    Web,
    /// 移动端应用
    Mobile,
    /// 桌面端应用
    Desktop,
}

impl ApplicationType {
    /// 线上格式的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::Web => "web",
            ApplicationType::Mobile => "mobile",
            ApplicationType::Desktop => "desktop",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(ApplicationType::Web),
            "mobile" => Ok(ApplicationType::Mobile),
            "desktop" => Ok(ApplicationType::Desktop),
            other => Err(format!(
                "unknown application type '{}' (expected web, mobile or desktop)",
                other
            )),
        }
    }
}

/// 生成请求
///
/// 由展示层在每次用户操作时构造，提交后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Base64 编码的图片（不带 data-URI 前缀）
    pub image: String,
    /// 目标应用类型
    pub application_type: ApplicationType,
    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl GenerationRequest {
    /// 创建请求
    pub fn new(image: impl Into<String>, application_type: ApplicationType, temperature: f32) -> Self {
        Self {
            image: image.into(),
            application_type,
            temperature,
        }
    }

    /// 限制在 [0, 1] 内的温度
    pub fn clamped_temperature(&self) -> f32 {
        if self.temperature.is_nan() {
            DEFAULT_TEMPERATURE
        } else {
            self.temperature.clamp(0.0, 1.0)
        }
    }

    /// 去掉可能存在的 `data:<mime>;base64,` 前缀
    pub fn normalized_image(&self) -> &str {
        match split_data_uri(&self.image) {
            Some((_, payload)) => payload,
            None => self.image.trim(),
        }
    }

    /// 图片的 MIME 类型
    ///
    /// 优先使用 data-URI 中声明的类型，否则根据文件头魔数判断，默认 `image/png`。
    pub fn mime_type(&self) -> String {
        if let Some((mime, _)) = split_data_uri(&self.image) {
            if !mime.is_empty() {
                return mime.to_string();
            }
        }
        sniff_mime_type(self.normalized_image()).to_string()
    }
}

fn split_data_uri(image: &str) -> Option<(&str, &str)> {
    let rest = image.trim().strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.split(';').next().unwrap_or_default();
    Some((mime, payload))
}

/// 根据 Base64 数据的文件头猜测图片类型
pub fn sniff_mime_type(base64_image: &str) -> &'static str {
    // 16 个 Base64 字符正好解码出 12 个字节，足够识别 WEBP
    let head: String = base64_image.chars().take(16).collect();
    let bytes = match STANDARD.decode(head.as_bytes()) {
        Ok(bytes) => bytes,
        Err(_) => return "image/png",
    };

    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}
