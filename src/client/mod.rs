//! 展示层边界
//!
//! 客户端一侧的流消费：解码网关响应、重排片段、累积 DisplayText，
//! 并维护图片槽位和“生成中”状态。

pub mod consumer;
pub mod remote;
pub mod session;

pub use consumer::consume_response;
pub use remote::EndpointClient;
pub use session::GenerationSession;
