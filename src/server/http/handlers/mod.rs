//! HTTP 请求处理器

pub mod generate;
pub mod health;

pub use generate::generate;
pub use health::health;
