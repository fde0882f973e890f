//! PromptForge - turn UI screenshots into prompts for AI coding tools
//!
//! PromptForge forwards an uploaded image to a generative model, proxies the
//! model's streamed answer back to the caller, and reformats the mixed
//! "thought" / "answer" stream into live-rendered Markdown.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod gateway;
pub mod prompt;
pub mod reformat;
pub mod server;
pub mod utils;

// Re-export commonly used types
pub use crate::api::error::{PromptForgeError, Result};
pub use crate::config::Config;

/// PromptForge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
