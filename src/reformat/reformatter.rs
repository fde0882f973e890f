//! 引用块状态机与重排器

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::response::ContentEvent;

static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());
static BLANK_QUOTE_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// 引用块状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThoughtState {
    /// 当前不在引用块中（初始状态）
    #[default]
    NotInThought,
    /// 已打开一个引用块
    InThought,
}

/// 状态迁移产生的边界动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 打开引用块，片段前加 `"> "`
    OpenThought,
    /// 关闭引用块，片段前加 `"\n\n"`
    CloseThought,
    /// 不跨越边界
    Stay,
}

impl ThoughtState {
    /// 根据下一个事件的类型计算新状态和边界动作
    pub fn transition(self, is_thought: bool) -> (ThoughtState, Transition) {
        match (self, is_thought) {
            (ThoughtState::NotInThought, true) => (ThoughtState::InThought, Transition::OpenThought),
            (ThoughtState::InThought, false) => (ThoughtState::NotInThought, Transition::CloseThought),
            (state, _) => (state, Transition::Stay),
        }
    }
}

/// 流重排器
///
/// 每个生成请求独占一个实例，事件必须按到达顺序逐个送入。
#[derive(Debug, Default)]
pub struct Reformatter {
    state: ThoughtState,
}

impl Reformatter {
    /// 创建处于初始状态的重排器
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前状态
    pub fn state(&self) -> ThoughtState {
        self.state
    }

    /// 把一个事件转换为要追加到 DisplayText 的片段
    pub fn format(&mut self, event: &ContentEvent) -> String {
        let (next, transition) = self.state.transition(event.is_thought);
        self.state = next;

        if event.is_thought {
            let quoted = quote_lines(&event.text);
            match transition {
                Transition::OpenThought => format!("> {}", quoted),
                _ => quoted,
            }
        } else {
            match transition {
                Transition::CloseThought => format!("\n\n{}", event.text),
                _ => event.text.clone(),
            }
        }
    }
}

/// 每一行都延续引用块，并去掉空的引用行
fn quote_lines(text: &str) -> String {
    let continued = NEWLINE_RUN.replace_all(text, "\n> ");
    BLANK_QUOTE_LINES.replace_all(&continued, "\n").into_owned()
}

/// 用新的重排器处理整个事件序列
pub fn reformat_all<'a, I>(events: I) -> String
where
    I: IntoIterator<Item = &'a ContentEvent>,
{
    let mut reformatter = Reformatter::new();
    events
        .into_iter()
        .map(|event| reformatter.format(event))
        .collect()
}
