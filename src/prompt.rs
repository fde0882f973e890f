//! 提示词构造
//!
//! 应用类型只影响发给模型的指令文本，不参与其他逻辑。

use crate::api::request::ApplicationType;

const BASE_INSTRUCTIONS: &str = "\
You are an expert UI engineer. Study the attached image and write a single, \
self-contained prompt that another AI coding assistant (Bolt, v0, Cursor) can \
use to rebuild this interface.

The prompt must describe:
1. The overall purpose of the screen and its layout structure.
2. Every visible component, in reading order, with its content and state.
3. Colors, typography, spacing and visual hierarchy.
4. Interactions and behaviour that the design implies.

Write the prompt in Markdown. Do not add commentary before or after it.";

fn platform_guidance(application_type: ApplicationType) -> &'static str {
    match application_type {
        ApplicationType::Web => {
            "Target platform: a responsive web application. Mention breakpoints, \
             semantic HTML structure and a modern component framework."
        }
        ApplicationType::Mobile => {
            "Target platform: a native-feeling mobile application. Mention touch \
             targets, safe areas, navigation patterns and portrait layout."
        }
        ApplicationType::Desktop => {
            "Target platform: a desktop application. Mention window chrome, menus, \
             keyboard shortcuts and resizable panes."
        }
    }
}

/// 根据应用类型构造发送给模型的指令
pub fn build_prompt(application_type: ApplicationType) -> String {
    format!("{}\n\n{}", BASE_INSTRUCTIONS, platform_guidance(application_type))
}
