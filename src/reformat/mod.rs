//! 思考/回答流重排
//!
//! 把网关返回的事件序列转换为可直接渲染的 Markdown：思考内容以引用块显示，
//! 回答内容保持原样。

pub mod reformatter;

pub use reformatter::{reformat_all, Reformatter, ThoughtState, Transition};
