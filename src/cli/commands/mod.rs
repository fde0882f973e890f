//! 命令实现

pub mod generate;
pub mod serve;

pub use generate::{generate, GenerateOptions};
pub use serve::serve;
