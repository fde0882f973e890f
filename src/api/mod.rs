//! 请求、响应、流解码和错误类型

pub mod error;
pub mod request;
pub mod response;
pub mod streaming;

pub use error::{PromptForgeError, Result};
pub use request::{ApplicationType, GenerationRequest};
pub use response::{ContentEvent, ErrorEnvelope, StreamFrame};
pub use streaming::FrameDecoder;
